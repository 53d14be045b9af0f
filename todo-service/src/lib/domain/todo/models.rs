use std::fmt;

use crate::domain::todo::errors::PriorityError;
use crate::domain::todo::errors::TextFieldError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Todo item owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub owner_id: UserId,
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub priority: Priority,
    pub completed: bool,
}

impl Todo {
    /// Owners and administrators may read and modify a todo.
    pub fn is_accessible_by(&self, actor: &User) -> bool {
        self.owner_id == actor.id || actor.role.is_admin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl TodoId {
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        let id = s
            .parse::<i64>()
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))?;

        if id < 1 {
            return Err(TodoIdError::NotPositive(id));
        }

        Ok(Self(id))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn bounded_text(value: String, min: usize, max: usize) -> Result<String, TextFieldError> {
    let length = value.chars().count();
    if length < min {
        Err(TextFieldError::TooShort {
            min,
            actual: length,
        })
    } else if length > max {
        Err(TextFieldError::TooLong {
            max,
            actual: length,
        })
    } else {
        Ok(value)
    }
}

/// Title, 3-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(title: String) -> Result<Self, TextFieldError> {
        bounded_text(title, 3, 100).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Description, 3-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    pub fn new(description: String) -> Result<Self, TextFieldError> {
        bounded_text(description, 3, 100).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Priority from 1 (lowest) to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    const MIN: i64 = 1;
    const MAX: i64 = 5;

    pub fn new(priority: i64) -> Result<Self, PriorityError> {
        if (Self::MIN..=Self::MAX).contains(&priority) {
            Ok(Self(priority as u8))
        } else {
            Err(PriorityError {
                min: Self::MIN,
                max: Self::MAX,
                actual: priority,
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Row to insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub owner_id: UserId,
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub priority: Priority,
    pub completed: bool,
}

#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub priority: Priority,
    pub completed: bool,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<TodoDescription>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}
