use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use common::prelude::{IdentityError, Role};

use crate::database::SqliteUserProviderError;
use crate::session::{SESSION_COOKIE, SESSION_TTL};
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
}

pub async fn handler(
    State(state): State<ServiceState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, LoginError> {
    let user = state
        .identity()
        .authenticate(&request.email, &request.password)
        .await?;

    let token = state
        .database()
        .create_session(&user, SESSION_TTL)
        .await
        .map_err(LoginError::Session)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(SESSION_TTL)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            role: user.role,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("identity error: {0}")]
    Identity(IdentityError<SqliteUserProviderError>),
    #[error("session error: {0}")]
    Session(sqlx::Error),
}

impl From<IdentityError<SqliteUserProviderError>> for LoginError {
    fn from(err: IdentityError<SqliteUserProviderError>) -> Self {
        match err {
            IdentityError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Identity(other),
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidCredentials => (
                http::StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Invalid email or password",
                })),
            )
                .into_response(),
            Self::Identity(e) => {
                tracing::error!("login failed: {}", e);
                server_error()
            }
            Self::Session(e) => {
                tracing::error!("failed to create session: {}", e);
                server_error()
            }
        }
    }
}

fn server_error() -> Response {
    (
        http::StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "success": false,
            "message": "Server error during login",
        })),
    )
        .into_response()
}
