use async_trait::async_trait;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::task::errors::TaskError;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// List every task, ordered by id.
    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError>;

    /// Retrieve task by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn get_task(&self, id: TaskId) -> Result<Task, TaskError>;

    /// Create a task owned by `created_by`.
    ///
    /// # Errors
    /// * `TitleAlreadyExists` - Another task has the same title, ignoring case
    async fn create_task(
        &self,
        command: CreateTaskCommand,
        created_by: UserId,
    ) -> Result<Task, TaskError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `TitleAlreadyExists` - New title collides with another task
    async fn update_task(&self, id: TaskId, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// Delete a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete_task(&self, id: TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for task aggregate.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Persist new task and allocate its identifier.
    ///
    /// # Errors
    /// * `TitleAlreadyExists` - Title taken, ignoring case
    async fn create(&self, task: NewTask) -> Result<Task, TaskError>;

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError>;

    /// All tasks ordered by id.
    async fn list_all(&self) -> Result<Vec<Task>, TaskError>;

    /// Apply a partial update to a stored task and refresh `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `TitleAlreadyExists` - Title taken by another task
    async fn update(&self, id: TaskId, command: UpdateTaskCommand) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    async fn delete(&self, id: TaskId) -> Result<(), TaskError>;
}
