use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::task::errors::TaskIdError;
use crate::task::errors::TaskTitleError;
use crate::user::models::UserId;

/// Task aggregate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub completed: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task about to be stored; the store allocates the identifier.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: TaskTitle,
    pub created_by: UserId,
}

/// Task identifier, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i64);

impl TaskId {
    /// # Errors
    /// * `NotPositive` - Zero or negative id
    pub fn new(id: i64) -> Result<Self, TaskIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(TaskIdError::NotPositive(id))
        }
    }

    /// Parse a task id from a path segment.
    ///
    /// # Errors
    /// * `NotANumber` - Segment is not an integer
    /// * `NotPositive` - Zero or negative id
    pub fn parse(raw: &str) -> Result<Self, TaskIdError> {
        let id = raw
            .parse::<i64>()
            .map_err(|_| TaskIdError::NotANumber(raw.to_string()))?;

        Self::new(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type
///
/// Trimmed, non-empty, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Title is blank after trimming
    /// * `TooLong` - Title longer than 200 characters
    pub fn new(title: &str) -> Result<Self, TaskTitleError> {
        let title = title.trim();
        let length = title.chars().count();

        if length == 0 {
            Err(TaskTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TaskTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key used for case-insensitive uniqueness.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a task
#[derive(Debug)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
}

/// Command to update a task. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub completed: Option<bool>,
}
