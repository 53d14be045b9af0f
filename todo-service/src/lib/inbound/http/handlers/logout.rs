use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use super::ApiSuccess;
use crate::inbound::http::middleware::access_token_cookie;
use crate::inbound::http::router::AppState;

/// Clear the access token cookie. Tokens are not tracked server side, so a
/// copy held elsewhere stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<()>) {
    // Always emit the removal, even when the request carried no cookie.
    let mut removal = access_token_cookie(String::new(), state.cookie_secure);
    removal.make_removal();

    (jar.add(removal), ApiSuccess::new(StatusCode::OK, ()))
}
