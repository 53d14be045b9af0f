use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use crate::domain::authentication::models::CurrentUser;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

/// Name of the cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Access token cookie with the attributes shared by login and logout.
pub fn access_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Request extension set by [`require_user`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Resolves the caller and rejects the request when no valid token is presented.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers());

    let user = state
        .auth_service
        .resolve_required(token.as_deref())
        .await?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Resolves the caller, falling back to the anonymous placeholder when no
/// token is presented. A present but invalid token is still rejected.
pub async fn optional_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers());

    let current_user = state
        .auth_service
        .resolve_optional(token.as_deref())
        .await?;

    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

/// Raw token from `Authorization: Bearer`, else from the access token cookie.
///
/// Any Authorization header counts as a presented token, even a malformed one.
/// An empty cookie (as left behind by logout) counts as no token.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let raw = value.to_str().unwrap_or_default().trim();
        let token = match raw.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => raw,
        };
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
