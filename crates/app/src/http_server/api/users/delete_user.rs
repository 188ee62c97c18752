use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use common::prelude::IdentityError;

use crate::database::SqliteUserProviderError;
use crate::http_server::auth::AdminApi;
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub email: String,
}

#[instrument(skip(state))]
pub async fn handler(
    AdminApi(_admin): AdminApi,
    State(state): State<ServiceState>,
    Json(request): Json<DeleteUserRequest>,
) -> Result<Json<serde_json::Value>, DeleteUserError> {
    state.identity().delete_user(&request.email).await?;

    tracing::info!("deleted account {}", request.email);
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "User deleted successfully!",
    })))
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("User not found")]
    NotFound,
    #[error("identity error: {0}")]
    Identity(IdentityError<SqliteUserProviderError>),
}

impl From<IdentityError<SqliteUserProviderError>> for DeleteUserError {
    fn from(err: IdentityError<SqliteUserProviderError>) -> Self {
        match err {
            IdentityError::NotFound => Self::NotFound,
            other => Self::Identity(other),
        }
    }
}

impl IntoResponse for DeleteUserError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (http::StatusCode::NOT_FOUND, self.to_string()),
            Self::Identity(e) => {
                tracing::error!("failed to delete user: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error while deleting user".to_string(),
                )
            }
        };
        (
            status,
            Json(serde_json::json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
