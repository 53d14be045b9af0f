use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for todo operations. Every call acts on behalf of an authenticated user.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Todos owned by `actor`.
    async fn list_todos(&self, actor: &User) -> Result<Vec<Todo>, TodoError>;

    async fn create_todo(&self, actor: &User, command: CreateTodoCommand)
        -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `NotOwned` - Todo belongs to someone else and actor is not an admin
    async fn get_todo(&self, actor: &User, id: &TodoId) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `NotOwned` - Todo belongs to someone else and actor is not an admin
    async fn update_todo(
        &self,
        actor: &User,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `NotOwned` - Todo belongs to someone else and actor is not an admin
    async fn delete_todo(&self, actor: &User, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
}
