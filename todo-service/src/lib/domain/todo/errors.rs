use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo id format: {0}")]
    InvalidFormat(String),

    #[error("Todo id must be positive, got {0}")]
    NotPositive(i64),
}

/// Length violation of a free-text todo field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextFieldError {
    #[error("too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Priority must be between {min} and {max}, got {actual}")]
pub struct PriorityError {
    pub min: i64,
    pub max: i64,
    pub actual: i64,
}

/// Top-level error for todo operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("Invalid todo ID: {0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(TextFieldError),

    #[error("Invalid description: {0}")]
    InvalidDescription(TextFieldError),

    #[error("Invalid priority: {0}")]
    InvalidPriority(#[from] PriorityError),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Todo {0} belongs to another user")]
    NotOwned(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
