use auth::TokenPair;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

pub async fn refresh<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let tokens = state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(|e| match e {
            // A vanished subject presents the same as a rejected token.
            UserError::NotFound(_) => {
                ApiError::Unauthorized(UserError::InvalidToken.to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&tokens).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&TokenPair> for RefreshResponseData {
    fn from(tokens: &TokenPair) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        }
    }
}
