use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let user = state.auth_service.register(body.try_into_command()?).await?;
    let token = state.auth_service.issue_token(&user, Utc::now())?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SessionData {
            token,
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;

        Ok(RegisterUserCommand::new(username, email, password))
    }
}
