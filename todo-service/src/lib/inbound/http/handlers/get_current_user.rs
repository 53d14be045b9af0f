use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use super::UserData;
use crate::domain::authentication::models::CurrentUser;

/// The caller's own account, or the anonymous placeholder when no token was sent.
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
) -> ApiSuccess<CurrentUserData> {
    ApiSuccess::new(StatusCode::OK, (&current_user).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserData {
    pub is_authenticated: bool,
    pub id: i64,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserData>,
}

impl From<&CurrentUser> for CurrentUserData {
    fn from(current_user: &CurrentUser) -> Self {
        Self {
            is_authenticated: current_user.is_authenticated(),
            id: current_user.id().0,
            username: current_user.username().to_string(),
            role: current_user.role().to_string(),
            is_active: current_user.is_active(),
            user: current_user.as_user().map(UserData::from),
        }
    }
}
