use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::task::errors::TaskError;
use crate::task::models::TaskTitle;

#[derive(Default)]
struct TaskStore {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl TaskStore {
    fn title_taken(&self, title: &TaskTitle, except: Option<TaskId>) -> bool {
        let key = title.normalized();

        self.tasks
            .values()
            .any(|task| Some(task.id) != except && task.title.normalized() == key)
    }
}

/// Process-local task store, ordered by id.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    store: RwLock<TaskStore>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, TaskError> {
        let mut store = self.store.write().await;

        if store.title_taken(&task.title, None) {
            return Err(TaskError::TitleAlreadyExists(task.title.to_string()));
        }

        let id = TaskId::new(store.last_id + 1)?;
        store.last_id = id.as_i64();

        let now = Utc::now();
        let created = Task {
            id,
            title: task.title,
            completed: false,
            created_by: task.created_by,
            created_at: now,
            updated_at: now,
        };
        store.tasks.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.store.read().await.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.read().await.tasks.values().cloned().collect())
    }

    async fn update(&self, id: TaskId, command: UpdateTaskCommand) -> Result<Task, TaskError> {
        let mut store = self.store.write().await;

        if !store.tasks.contains_key(&id) {
            return Err(TaskError::NotFound(id));
        }
        if let Some(title) = &command.title {
            if store.title_taken(title, Some(id)) {
                return Err(TaskError::TitleAlreadyExists(title.to_string()));
            }
        }

        let task = store.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        if let Some(title) = command.title {
            task.title = title;
        }
        if let Some(completed) = command.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        self.store
            .write()
            .await
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::UserId;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: TaskTitle::new(title).unwrap(),
            created_by: UserId(1),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_id_order() {
        let repository = InMemoryTaskRepository::new();

        for title in ["Third", "First", "Second"] {
            repository.create(new_task(title)).await.unwrap();
        }

        let ids: Vec<i64> = repository
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|task| task.id.as_i64())
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_title_unique_ignoring_case() {
        let repository = InMemoryTaskRepository::new();
        repository.create(new_task("Buy milk")).await.unwrap();

        let result = repository.create(new_task("BUY MILK")).await;

        assert!(matches!(
            result.unwrap_err(),
            TaskError::TitleAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_title() {
        let repository = InMemoryTaskRepository::new();
        let task = repository.create(new_task("Buy milk")).await.unwrap();

        let command = UpdateTaskCommand {
            title: Some(TaskTitle::new("BUY MILK").unwrap()),
            completed: Some(true),
        };
        let updated = repository.update(task.id, command).await.unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title.as_str(), "BUY MILK");
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_other_tasks_title() {
        let repository = InMemoryTaskRepository::new();
        repository.create(new_task("Buy milk")).await.unwrap();
        let task = repository.create(new_task("Walk dog")).await.unwrap();

        let command = UpdateTaskCommand {
            title: Some(TaskTitle::new("buy milk").unwrap()),
            completed: Some(true),
        };
        let result = repository.update(task.id, command).await;

        assert!(matches!(
            result.unwrap_err(),
            TaskError::TitleAlreadyExists(_)
        ));
        let stored = repository.find_by_id(task.id).await.unwrap().unwrap();
        assert!(!stored.completed);
    }

    #[tokio::test]
    async fn test_update_unknown_task() {
        let repository = InMemoryTaskRepository::new();

        let result = repository
            .update(TaskId::new(9).unwrap(), UpdateTaskCommand::default())
            .await;

        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_partial_updates_both_apply() {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let task = repository.create(new_task("Draft")).await.unwrap();

        let rename = {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move {
                let command = UpdateTaskCommand {
                    title: Some(TaskTitle::new("Final").unwrap()),
                    completed: None,
                };
                repository.update(task.id, command).await
            })
        };
        let complete = {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move {
                let command = UpdateTaskCommand {
                    title: None,
                    completed: Some(true),
                };
                repository.update(task.id, command).await
            })
        };

        rename.await.unwrap().unwrap();
        complete.await.unwrap().unwrap();

        let stored = repository.find_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.title.as_str(), "Final");
        assert!(stored.completed);
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let repository = InMemoryTaskRepository::new();
        let task = repository.create(new_task("Buy milk")).await.unwrap();

        repository.delete(task.id).await.unwrap();

        assert!(repository.find_by_id(task.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(task.id).await.unwrap_err(),
            TaskError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repository = InMemoryTaskRepository::new();
        let first = repository.create(new_task("One")).await.unwrap();
        repository.delete(first.id).await.unwrap();

        let second = repository.create(new_task("Two")).await.unwrap();
        assert_eq!(second.id.as_i64(), 2);
    }
}
