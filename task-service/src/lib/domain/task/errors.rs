use thiserror::Error;

use crate::task::models::TaskId;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Task id must be a positive integer, got {0}")]
    NotPositive(i64),

    #[error("Task id is not a number: {0}")]
    NotANumber(String),
}

/// Error for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task id: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Task title already exists: {0}")]
    TitleAlreadyExists(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
