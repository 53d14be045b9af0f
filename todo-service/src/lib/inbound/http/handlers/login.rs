use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use axum_extra::extract::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::middleware::access_token_cookie;
use crate::inbound::http::router::AppState;

/// Exchange a username/password form for an access token.
///
/// The token is returned in the body and also set as an http-only cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let token = state
        .auth_service
        .login(&body.username, &body.password)
        .await?;

    let cookie = access_token_cookie(token.access_token.clone(), state.cookie_secure);

    Ok((
        jar.add(cookie),
        ApiSuccess::new(StatusCode::OK, (&token).into()),
    ))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for LoginResponseData {
    fn from(token: &AccessToken) -> Self {
        Self {
            access_token: token.access_token.clone(),
            token_type: token.token_type.to_string(),
            expires_at: token.expires_at,
        }
    }
}
