use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::models::TaskId;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::parse(&task_id).map_err(TaskError::from)?;

    state
        .task_service
        .get_task(task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
