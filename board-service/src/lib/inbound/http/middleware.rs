use axum::extract::Request;
use axum::extract::State;
use axum::http::Method;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Paths served without a token. Matched by exact path, so nested or
/// prefixed routes stay protected.
const WHITELIST: [&str; 2] = ["/api/auth/login", "/api/auth/register"];

/// Middleware that authenticates requests before handlers run.
///
/// CORS pre-flights and whitelisted paths pass through untouched. For
/// everything else the token is resolved from the `Authorization: Bearer`
/// header or, failing that, the `X-Token` header, and handed to the
/// configured strategy. On success the resolved identity rides the
/// request's extensions to the handler; on failure the handler never runs
/// and the failure goes out as a `{"message": ...}` JSON body.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if should_skip(&req) {
        return Ok(next.run(req).await);
    }

    let token = resolve_token(&req);
    let identity = state
        .token_authenticator
        .verify(token)
        .await
        .map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            ApiError::from(e).into_response()
        })?;

    // Extensions are owned by the request, so the identity is visible to
    // this request only and dropped with it
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn should_skip(req: &Request) -> bool {
    req.method() == Method::OPTIONS || WHITELIST.contains(&req.uri().path())
}

fn resolve_token(req: &Request) -> Option<&str> {
    let headers = req.headers();

    if let Some(value) = headers.get(http::header::AUTHORIZATION) {
        if let Ok(s) = value.to_str() {
            if let Some(token) = s.strip_prefix("Bearer ") {
                return Some(token);
            }
        }
    }

    // Fallback for clients that send the raw token in a custom header
    headers.get("X-Token").and_then(|v| v.to_str().ok())
}
