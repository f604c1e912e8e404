use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;

pub struct AppState<UR: UserRepository> {
    pub auth_service: Arc<AuthService<UR>>,
    pub token_codec: Arc<TokenCodec>,
}

// Manual impl: the derive would demand UR: Clone, but only the Arcs are
// cloned.
impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            token_codec: Arc::clone(&self.token_codec),
        }
    }
}

pub fn create_router<UR: UserRepository>(
    auth_service: Arc<AuthService<UR>>,
    token_codec: Arc<TokenCodec>,
) -> Router {
    let state = AppState {
        auth_service,
        token_codec,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register::<UR>))
        .route("/auth/login", post(login::<UR>))
        .route("/auth/refresh", post(refresh::<UR>))
        .route("/auth/logout", post(logout));

    let protected_routes = Router::new()
        .route("/users/me", get(me::<UR>))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.token_codec),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
