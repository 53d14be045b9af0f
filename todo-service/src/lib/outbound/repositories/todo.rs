use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    owner_id: i64,
    title: String,
    description: String,
    priority: i64,
    completed: bool,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: TodoId(row.id),
            owner_id: UserId(row.owner_id),
            title: TodoTitle::new(row.title).map_err(TodoError::InvalidTitle)?,
            description: TodoDescription::new(row.description)
                .map_err(TodoError::InvalidDescription)?,
            priority: Priority::new(row.priority)?,
            completed: row.completed,
        })
    }
}

fn database_error(e: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(e.to_string())
}

pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (owner_id, title, description, priority, completed)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, owner_id, title, description, priority, completed
            "#,
        )
        .bind(todo.owner_id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(i64::from(todo.priority.value()))
        .bind(todo.completed)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, owner_id, title, description, priority, completed
            FROM todos
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Todo::try_from).transpose()
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, owner_id, title, description, priority, completed
            FROM todos
            WHERE owner_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = ?, description = ?, priority = ?, completed = ?
            WHERE id = ?
            "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(i64::from(todo.priority.value()))
        .bind(todo.completed)
        .bind(todo.id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::Username;
    use crate::domain::user::ports::UserRepository;
    use crate::outbound::repositories::test_pool;
    use crate::outbound::repositories::SqliteUserRepository;

    async fn seed_owner(pool: &SqlitePool, username: &str) -> UserId {
        let users = SqliteUserRepository::new(pool.clone());
        users
            .create(NewUser {
                username: Username::new(username.to_string()).unwrap(),
                email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
                first_name: PersonName::new("Test".to_string()).unwrap(),
                last_name: PersonName::new("Owner".to_string()).unwrap(),
                password_hash: "$argon2id$stored".to_string(),
                role: Role::User,
                is_active: true,
                created_at: Utc::now(),
            })
            .await
            .unwrap()
            .id
    }

    fn new_todo(owner_id: UserId, title: &str) -> NewTodo {
        NewTodo {
            owner_id,
            title: TodoTitle::new(title.to_string()).unwrap(),
            description: TodoDescription::new("Something to do".to_string()).unwrap(),
            priority: Priority::new(3).unwrap(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner() {
        let pool = test_pool().await;
        let alice = seed_owner(&pool, "alice").await;
        let bob = seed_owner(&pool, "bob").await;
        let repository = SqliteTodoRepository::new(pool);

        repository.create(new_todo(alice, "Buy milk")).await.unwrap();
        repository.create(new_todo(alice, "Walk dog")).await.unwrap();
        repository.create(new_todo(bob, "Fix bike")).await.unwrap();

        let todos = repository.list_by_owner(&alice).await.unwrap();
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Walk dog"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let alice = seed_owner(&pool, "alice").await;
        let repository = SqliteTodoRepository::new(pool);

        let mut todo = repository.create(new_todo(alice, "Buy milk")).await.unwrap();
        todo.completed = true;
        todo.priority = Priority::new(5).unwrap();
        repository.update(todo.clone()).await.unwrap();

        let stored = repository.find_by_id(&todo.id).await.unwrap().unwrap();
        assert!(stored.completed);
        assert_eq!(stored.priority.value(), 5);

        repository.delete(&todo.id).await.unwrap();
        assert!(repository.find_by_id(&todo.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(&todo.id).await,
            Err(TodoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_todos_removed_with_owner() {
        let pool = test_pool().await;
        let alice = seed_owner(&pool, "alice").await;
        let repository = SqliteTodoRepository::new(pool.clone());
        let todo = repository.create(new_todo(alice, "Buy milk")).await.unwrap();

        SqliteUserRepository::new(pool).delete(&alice).await.unwrap();

        assert!(repository.find_by_id(&todo.id).await.unwrap().is_none());
    }
}
