use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;

use common::prelude::{Role, SessionUser};

use crate::session::SESSION_COOKIE;
use crate::ServiceState;

/// The caller's session, if any. Used by the login page to bounce
/// already-authenticated users to their dashboard.
pub struct MaybeUser(pub Option<SessionUser>);

/// Admin gate for HTML routes: anonymous or non-admin callers are
/// sent back to the login page.
pub struct AdminPage(pub SessionUser);

/// Student gate for HTML routes, same redirect behavior.
pub struct StudentPage(pub SessionUser);

/// Admin gate for API routes: structured 401/403 instead of a
/// redirect.
pub struct AdminApi(pub SessionUser);

async fn session_user(parts: &mut Parts, state: &ServiceState) -> Option<SessionUser> {
    let jar = CookieJar::from_request_parts(parts, state)
        .await
        .unwrap_or_default();
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    match state.database().session_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("failed to resolve session: {}", e);
            None
        }
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts, state).await))
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for AdminPage {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await {
            Some(user) if user.role == Role::Admin => Ok(Self(user)),
            _ => Err(Redirect::to("/")),
        }
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for StudentPage {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await {
            Some(user) if user.role == Role::Student => Ok(Self(user)),
            _ => Err(Redirect::to("/")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiAuthError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("admin access required")]
    Forbidden,
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unauthenticated => http::StatusCode::UNAUTHORIZED,
            Self::Forbidden => http::StatusCode::FORBIDDEN,
        };
        let body = serde_json::json!({ "success": false, "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for AdminApi {
    type Rejection = ApiAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await {
            Some(user) if user.role == Role::Admin => Ok(Self(user)),
            Some(_) => Err(ApiAuthError::Forbidden),
            None => Err(ApiAuthError::Unauthenticated),
        }
    }
}
