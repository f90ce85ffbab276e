use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let user = state
        .auth_service
        .login(LoginCommand {
            email: body.email,
            password: body.password,
        })
        .await?;
    let token = state.auth_service.issue_token(&user, Utc::now())?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            token,
            user: (&user).into(),
        },
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
