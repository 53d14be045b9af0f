use std::str::FromStr;

use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ApiError> {
        // An unknown role in a request is a client error, not a corrupt row.
        let role = self
            .role
            .as_deref()
            .map(Role::from_str)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(UserError::from(e).to_string()))?;

        // The placeholder role belongs to anonymous callers, never to a stored account.
        if role == Some(Role::Unauthenticated) {
            return Err(ApiError::UnprocessableEntity(format!(
                "Role cannot be assigned: {}",
                Role::Unauthenticated
            )));
        }

        Ok(UpdateUserCommand {
            username: self
                .username
                .map(Username::new)
                .transpose()
                .map_err(UserError::from)?,
            email: self
                .email
                .map(EmailAddress::new)
                .transpose()
                .map_err(UserError::from)?,
            first_name: self
                .first_name
                .map(PersonName::new)
                .transpose()
                .map_err(UserError::from)?,
            last_name: self
                .last_name
                .map(PersonName::new)
                .transpose()
                .map_err(UserError::from)?,
            password: self
                .password
                .map(Password::new)
                .transpose()
                .map_err(UserError::from)?,
            role,
            is_active: self.is_active,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // Parse user ID and request at HTTP boundary - errors automatically converted
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&actor, &user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
