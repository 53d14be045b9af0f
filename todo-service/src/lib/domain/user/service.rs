use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }

    fn ensure_can_manage(actor: &User, id: &UserId) -> Result<(), UserError> {
        if actor.can_manage(id) {
            Ok(())
        } else {
            Err(UserError::Forbidden(format!(
                "user {} may not manage user {}",
                actor.id, id
            )))
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            role: Role::User,
            is_active: true,
            created_at: Utc::now(),
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn get_user(&self, actor: &User, id: &UserId) -> Result<User, UserError> {
        Self::ensure_can_manage(actor, id)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        actor: &User,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        Self::ensure_can_manage(actor, id)?;

        if command.touches_privileges() && !actor.role.is_admin() {
            return Err(UserError::Forbidden(
                "only administrators may change role or activation".to_string(),
            ));
        }

        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(new_password.expose())?;
        }

        if let Some(role) = command.role {
            user.role = role;
        }

        if let Some(is_active) = command.is_active {
            user.is_active = is_active;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, actor: &User, id: &UserId) -> Result<(), UserError> {
        Self::ensure_can_manage(actor, id)?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, deleted_by = %actor.id, "User deleted");

        Ok(())
    }
}
