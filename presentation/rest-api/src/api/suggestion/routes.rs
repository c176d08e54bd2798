use std::sync::Arc;

use poem_openapi::{ApiResponse, OpenApi, param::Path, payload::Json};

use business::application::suggestion::scheduler::SuggestionScheduler;
use business::domain::suggestion::model::SuggestionKind;
use business::domain::suggestion::use_cases::generate::{
    GenerateSuggestionsParams, GenerateSuggestionsUseCase, GenerationOutcome,
};
use business::domain::suggestion::use_cases::get::{GetSuggestionsParams, GetSuggestionsUseCase};
use business::domain::suggestion::use_cases::refresh::{
    RefreshOutcome, RefreshSuggestionsParams, RefreshSuggestionsUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::UserIdHeader;
use crate::api::suggestion::dto::SuggestionsResponse;
use crate::api::tags::ApiTags;

pub struct SuggestionApi {
    get_use_case: Arc<dyn GetSuggestionsUseCase>,
    refresh_use_case: Arc<dyn RefreshSuggestionsUseCase>,
    generate_use_case: Arc<dyn GenerateSuggestionsUseCase>,
    scheduler: Arc<SuggestionScheduler>,
}

impl SuggestionApi {
    pub fn new(
        get_use_case: Arc<dyn GetSuggestionsUseCase>,
        refresh_use_case: Arc<dyn RefreshSuggestionsUseCase>,
        generate_use_case: Arc<dyn GenerateSuggestionsUseCase>,
        scheduler: Arc<SuggestionScheduler>,
    ) -> Self {
        Self {
            get_use_case,
            refresh_use_case,
            generate_use_case,
            scheduler,
        }
    }
}

fn parse_kind(raw: &str) -> Result<SuggestionKind, Json<ErrorResponse>> {
    raw.parse::<SuggestionKind>()
        .map_err(|_| ErrorResponse::validation("suggestion.invalid_kind"))
}

/// Meal and drink suggestions
///
/// Mounting a view subscribes it to the periodic poll; tearing it down
/// cancels any cycle still running for it.
#[OpenApi]
impl SuggestionApi {
    /// Mount a suggestion view
    ///
    /// Subscribes the caller to periodic refreshes, regenerates the batch
    /// when it is stale and returns what should be displayed. A view that
    /// stops calling this is dropped from the poll once it goes idle.
    #[oai(path = "/suggestions/:kind", method = "get", tag = "ApiTags::Suggestions")]
    async fn mount(&self, auth: UserIdHeader, kind: Path<String>) -> SuggestionsApiResponse {
        let kind = match parse_kind(&kind.0) {
            Ok(kind) => kind,
            Err(json) => return SuggestionsApiResponse::BadRequest(json),
        };
        let user_id = auth.0;
        let cancel = self.scheduler.subscribe(&user_id, kind);

        let outcome = match self
            .refresh_use_case
            .execute(RefreshSuggestionsParams {
                user_id: user_id.clone(),
                kind,
                cancel,
            })
            .await
        {
            Ok(RefreshOutcome::NotDue(store)) => {
                return SuggestionsApiResponse::Ok(Json(store.into()));
            }
            Ok(RefreshOutcome::Generated(outcome)) => outcome,
            Err(err) => return SuggestionsApiResponse::from_error(err.into_error_response()),
        };

        match self
            .get_use_case
            .execute(GetSuggestionsParams { user_id, kind })
            .await
        {
            Ok(store) => SuggestionsApiResponse::Ok(Json(
                SuggestionsResponse::from(store).with_outcome(&outcome),
            )),
            Err(err) => SuggestionsApiResponse::from_error(err.into_error_response()),
        }
    }

    /// Refresh suggestions now
    ///
    /// Runs a generation cycle regardless of cadence without subscribing
    /// the caller. Answers 409 while another cycle for the same kind is
    /// running.
    #[oai(
        path = "/suggestions/:kind/refresh",
        method = "post",
        tag = "ApiTags::Suggestions"
    )]
    async fn refresh(&self, auth: UserIdHeader, kind: Path<String>) -> SuggestionsApiResponse {
        let kind = match parse_kind(&kind.0) {
            Ok(kind) => kind,
            Err(json) => return SuggestionsApiResponse::BadRequest(json),
        };
        let user_id = auth.0;
        let cancel = self.scheduler.one_off_token();

        let outcome = match self
            .generate_use_case
            .execute(GenerateSuggestionsParams {
                user_id: user_id.clone(),
                kind,
                cancel,
            })
            .await
        {
            Ok(GenerationOutcome::AlreadyInFlight) => {
                return SuggestionsApiResponse::Conflict(Json(ErrorResponse {
                    name: "Conflict".to_string(),
                    message: "suggestion.already_in_flight".to_string(),
                }));
            }
            Ok(outcome) => outcome,
            Err(err) => return SuggestionsApiResponse::from_error(err.into_error_response()),
        };

        match self
            .get_use_case
            .execute(GetSuggestionsParams { user_id, kind })
            .await
        {
            Ok(store) => SuggestionsApiResponse::Ok(Json(
                SuggestionsResponse::from(store).with_outcome(&outcome),
            )),
            Err(err) => SuggestionsApiResponse::from_error(err.into_error_response()),
        }
    }

    /// Tear a suggestion view down
    ///
    /// Stops periodic refreshes and cancels any cycle still in flight.
    #[oai(
        path = "/suggestions/:kind/subscription",
        method = "delete",
        tag = "ApiTags::Suggestions"
    )]
    async fn unmount(&self, auth: UserIdHeader, kind: Path<String>) -> UnmountResponse {
        let kind = match parse_kind(&kind.0) {
            Ok(kind) => kind,
            Err(json) => return UnmountResponse::BadRequest(json),
        };

        self.scheduler.unsubscribe(&auth.0, kind);
        UnmountResponse::NoContent
    }
}

#[derive(ApiResponse)]
pub enum SuggestionsApiResponse {
    #[oai(status = 200)]
    Ok(Json<SuggestionsResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl SuggestionsApiResponse {
    fn from_error((status, json): (poem::http::StatusCode, Json<ErrorResponse>)) -> Self {
        match status.as_u16() {
            403 => SuggestionsApiResponse::Forbidden(json),
            404 => SuggestionsApiResponse::NotFound(json),
            _ => SuggestionsApiResponse::InternalError(json),
        }
    }
}

#[derive(ApiResponse)]
pub enum UnmountResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
}
