use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::suggestion::errors::SuggestionError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for SuggestionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            SuggestionError::ProfileUnavailable => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "suggestion.profile_unavailable",
            ),
            SuggestionError::SubscriptionRequired => (
                StatusCode::FORBIDDEN,
                "Forbidden",
                "suggestion.subscription_required",
            ),
            SuggestionError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: message.to_string(),
            }),
        )
    }
}
