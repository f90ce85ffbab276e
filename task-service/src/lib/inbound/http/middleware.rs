use auth::AuthorizationError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;

use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that checks the bearer token and adds the caller's identity to
/// request extensions.
///
/// Rejections carry only a generic message; the precise cause is logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // A header that is not visible ASCII is a malformed one.
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| reject(&req, AuthorizationError::BadFormat))?;

    let identity = state
        .auth_service
        .authorize(header, Utc::now())
        .map_err(|e| reject(&req, e))?;

    tracing::debug!(user_id = %identity.user_id, "Request authenticated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn reject(req: &Request, reason: AuthorizationError) -> Response {
    tracing::warn!(
        method = %req.method(),
        uri = %req.uri(),
        reason = %reason,
        "Request rejected"
    );

    ApiError::from(reason).into_response()
}
