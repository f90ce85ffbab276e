use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

/// HTTP request body for updating a task (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        let title = self
            .title
            .as_deref()
            .map(TaskTitle::new)
            .transpose()?;

        Ok(UpdateTaskCommand {
            title,
            completed: self.completed,
        })
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::parse(&task_id).map_err(TaskError::from)?;
    let command = req.try_into_command()?;

    state
        .task_service
        .update_task(task_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
