use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    state
        .task_service
        .create_task(body.try_into_command()?, identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, TaskError> {
        Ok(CreateTaskCommand {
            title: TaskTitle::new(&self.title)?,
        })
    }
}
