use poem::Request;
use poem_openapi::SecurityScheme;
use poem_openapi::auth::ApiKey;

use business::domain::shared::value_objects::UserId;

const MAX_USER_ID_LEN: usize = 128;

/// Caller identity forwarded by the gateway in front of this service.
#[derive(SecurityScheme)]
#[oai(
    ty = "api_key",
    key_name = "x-user-id",
    key_in = "header",
    checker = "user_id_checker"
)]
pub struct UserIdHeader(pub UserId);

async fn user_id_checker(_req: &Request, api_key: ApiKey) -> Option<UserId> {
    match parse_user_id(&api_key.key) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::warn!("Rejected caller identity: {e}");
            None
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("auth.empty_user_id");
    }
    if trimmed.len() > MAX_USER_ID_LEN {
        return Err("auth.user_id_too_long");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("auth.invalid_user_id");
    }
    Ok(UserId::new(trimmed))
}
