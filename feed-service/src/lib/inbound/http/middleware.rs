use std::sync::Arc;

use auth::TokenCodec;
use auth::TokenType;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;

/// Extension type carrying the identity resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

/// Middleware guarding protected routes.
///
/// Every failure mode - missing header, malformed credential, bad
/// signature, expiry, wrong token type - yields the same 401 body; the
/// distinct reason is only logged.
pub async fn authenticate(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    match resolve(&codec, &req) {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => Err(unauthorized()),
    }
}

/// Resolve the request's bearer credential into an authenticated identity.
///
/// Absence or rejection is `None`, not an error - the route decides
/// whether it requires authentication. The identity comes straight from
/// the verified claims; callers needing a fresh profile re-fetch from the
/// store themselves.
fn resolve(codec: &TokenCodec, req: &Request) -> Option<AuthenticatedUser> {
    let token = bearer_token(req)?;

    let claims = match codec.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(reason = %e, "Bearer token rejected");
            return None;
        }
    };

    if claims.token_type != TokenType::Access {
        tracing::debug!("Non-access token presented as bearer credential");
        return None;
    }

    let user_id = match UserId::from_string(&claims.sub) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(reason = %e, "Token subject is not a user id");
            return None;
        }
    };

    Some(AuthenticatedUser {
        user_id,
        username: claims.username,
        email: claims.email,
    })
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}
