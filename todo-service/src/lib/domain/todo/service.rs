use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::models::User;

/// Domain service for todo operations, scoped to the acting user.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    /// Fetch a todo the actor is allowed to touch.
    async fn find_accessible(&self, actor: &User, id: &TodoId) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))?;

        if !todo.is_accessible_by(actor) {
            tracing::warn!(todo_id = %id, user_id = %actor.id, "Rejected access to foreign todo");
            return Err(TodoError::NotOwned(id.to_string()));
        }

        Ok(todo)
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn list_todos(&self, actor: &User) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_by_owner(&actor.id).await
    }

    async fn create_todo(
        &self,
        actor: &User,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let new_todo = NewTodo {
            owner_id: actor.id,
            title: command.title,
            description: command.description,
            priority: command.priority,
            completed: command.completed,
        };

        let todo = self.repository.create(new_todo).await?;
        tracing::debug!(todo_id = %todo.id, owner_id = %todo.owner_id, "Todo created");

        Ok(todo)
    }

    async fn get_todo(&self, actor: &User, id: &TodoId) -> Result<Todo, TodoError> {
        self.find_accessible(actor, id).await
    }

    async fn update_todo(
        &self,
        actor: &User,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.find_accessible(actor, id).await?;

        if let Some(title) = command.title {
            todo.title = title;
        }

        if let Some(description) = command.description {
            todo.description = description;
        }

        if let Some(priority) = command.priority {
            todo.priority = priority;
        }

        if let Some(completed) = command.completed {
            todo.completed = completed;
        }

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, actor: &User, id: &TodoId) -> Result<(), TodoError> {
        self.find_accessible(actor, id).await?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::todo::models::Priority;
    use crate::domain::todo::models::TodoDescription;
    use crate::domain::todo::models::TodoTitle;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;
            async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;
            async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Todo>, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
        }
    }

    fn test_user(id: i64, role: Role) -> User {
        User {
            id: UserId(id),
            username: Username::new(format!("user{}", id)).unwrap(),
            email: EmailAddress::new(format!("user{}@example.com", id)).unwrap(),
            first_name: PersonName::new("Test".to_string()).unwrap(),
            last_name: PersonName::new("User".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn test_todo(id: i64, owner: i64) -> Todo {
        Todo {
            id: TodoId(id),
            owner_id: UserId(owner),
            title: TodoTitle::new("Buy milk".to_string()).unwrap(),
            description: TodoDescription::new("Two litres".to_string()).unwrap(),
            priority: Priority::new(3).unwrap(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_create_todo_sets_owner() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_create()
            .withf(|todo| todo.owner_id == UserId(7) && todo.title.as_str() == "Buy milk")
            .times(1)
            .returning(|todo| {
                Ok(Todo {
                    id: TodoId(1),
                    owner_id: todo.owner_id,
                    title: todo.title,
                    description: todo.description,
                    priority: todo.priority,
                    completed: todo.completed,
                })
            });

        let service = TodoService::new(Arc::new(repository));

        let command = CreateTodoCommand {
            title: TodoTitle::new("Buy milk".to_string()).unwrap(),
            description: TodoDescription::new("Two litres".to_string()).unwrap(),
            priority: Priority::new(2).unwrap(),
            completed: false,
        };

        let todo = service
            .create_todo(&test_user(7, Role::User), command)
            .await
            .unwrap();
        assert_eq!(todo.id, TodoId(1));
        assert_eq!(todo.owner_id, UserId(7));
    }

    #[tokio::test]
    async fn test_list_todos_scoped_to_actor() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_list_by_owner()
            .withf(|owner| *owner == UserId(7))
            .times(1)
            .returning(|_| Ok(vec![test_todo(1, 7), test_todo(2, 7)]));

        let service = TodoService::new(Arc::new(repository));

        let todos = service.list_todos(&test_user(7, Role::User)).await.unwrap();
        assert_eq!(todos.len(), 2);
    }

    #[tokio::test]
    async fn test_get_foreign_todo_not_owned() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_todo(1, 8))));

        let service = TodoService::new(Arc::new(repository));

        let result = service.get_todo(&test_user(7, Role::User), &TodoId(1)).await;
        assert!(matches!(result, Err(TodoError::NotOwned(_))));
    }

    #[tokio::test]
    async fn test_admin_reads_foreign_todo() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_todo(1, 8))));

        let service = TodoService::new(Arc::new(repository));

        let todo = service
            .get_todo(&test_user(1, Role::Admin), &TodoId(1))
            .await
            .unwrap();
        assert_eq!(todo.owner_id, UserId(8));
    }

    #[tokio::test]
    async fn test_get_missing_todo() {
        let mut repository = MockTestTodoRepository::new();
        repository.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = TodoService::new(Arc::new(repository));

        let result = service.get_todo(&test_user(7, Role::User), &TodoId(5)).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_todo_partial_fields() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_todo(1, 7))));
        repository
            .expect_update()
            .withf(|todo| {
                todo.completed && todo.title.as_str() == "Buy milk" && todo.priority.value() == 3
            })
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository));

        let command = UpdateTodoCommand {
            completed: Some(true),
            ..Default::default()
        };

        let todo = service
            .update_todo(&test_user(7, Role::User), &TodoId(1), command)
            .await
            .unwrap();
        assert!(todo.completed);
    }

    #[tokio::test]
    async fn test_delete_foreign_todo_rejected() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_todo(1, 8))));
        repository.expect_delete().times(0);

        let service = TodoService::new(Arc::new(repository));

        let result = service
            .delete_todo(&test_user(7, Role::User), &TodoId(1))
            .await;
        assert!(matches!(result, Err(TodoError::NotOwned(_))));
    }
}
