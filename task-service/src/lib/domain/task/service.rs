use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::task::errors::TaskError;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.repository.list_all().await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    async fn create_task(
        &self,
        command: CreateTaskCommand,
        created_by: UserId,
    ) -> Result<Task, TaskError> {
        let task = self
            .repository
            .create(NewTask {
                title: command.title,
                created_by,
            })
            .await?;

        tracing::info!(task_id = %task.id, created_by = %created_by, "Task created");

        Ok(task)
    }

    async fn update_task(
        &self,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let updated = self.repository.update(id, command).await?;
        tracing::debug!(task_id = %updated.id, "Task updated");

        Ok(updated)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), TaskError> {
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, "Task deleted");

        Ok(())
    }
}
