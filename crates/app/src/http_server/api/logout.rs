use axum::extract::State;
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::session::SESSION_COOKIE;
use crate::ServiceState;

/// Destroy the server-side session and clear the cookie.
pub async fn handler(State(state): State<ServiceState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token = cookie.value().to_string();
        if let Err(e) = state.database().delete_session(&token).await {
            tracing::error!("failed to delete session: {}", e);
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Redirect::to("/"))
}
