use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// Logout is a no-op: tokens are stateless bearer credentials with no
/// server-side record, so there is nothing to tear down. Each token
/// simply stops verifying once its expiry passes.
pub async fn logout() -> ApiSuccess<LogoutResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
