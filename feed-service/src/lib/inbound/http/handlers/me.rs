use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// The bearer token already identifies the caller; the profile is
/// re-fetched from the store so a deleted account stops resolving here.
pub async fn me<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Extension(identity): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user = state
        .auth_service
        .get_user(&identity.user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::Unauthorized("Unauthorized".to_string()),
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}
