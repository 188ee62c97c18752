use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use common::prelude::{IdentityError, Role, SessionUser};

use crate::database::SqliteUserProviderError;
use crate::http_server::auth::AdminApi;
use crate::ServiceState;

#[derive(Deserialize)]
pub struct AddUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl std::fmt::Debug for AddUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The password never goes near the log.
        f.debug_struct("AddUserRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct AddUserResponse {
    pub message: String,
    pub user: SessionUser,
}

/// Register a student or faculty account on behalf of an admin.
#[instrument(skip(state))]
pub async fn handler(
    AdminApi(_admin): AdminApi,
    State(state): State<ServiceState>,
    Json(request): Json<AddUserRequest>,
) -> Result<(http::StatusCode, Json<AddUserResponse>), AddUserError> {
    let user = state
        .identity()
        .create_user(&request.email, &request.password, &request.name, request.role)
        .await?;

    tracing::info!("created {} account for {}", user.role, user.email);
    Ok((
        http::StatusCode::CREATED,
        Json(AddUserResponse {
            message: "User added successfully!".to_string(),
            user: SessionUser::from(&user),
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum AddUserError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Email already registered.")]
    DuplicateEmail,
    #[error("identity error: {0}")]
    Identity(IdentityError<SqliteUserProviderError>),
}

impl From<IdentityError<SqliteUserProviderError>> for AddUserError {
    fn from(err: IdentityError<SqliteUserProviderError>) -> Self {
        match err {
            IdentityError::Validation(_) => Self::MissingFields,
            IdentityError::DuplicateEmail => Self::DuplicateEmail,
            other => Self::Identity(other),
        }
    }
}

impl IntoResponse for AddUserError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingFields | Self::DuplicateEmail => {
                (http::StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::Identity(e) => {
                tracing::error!("failed to add user: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error while adding user".to_string(),
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

// Keeps the response from silently drifting away from what the admin
// page scripts expect.
#[cfg(test)]
mod tests {
    use super::*;
    use common::prelude::User;
    use uuid::Uuid;

    #[test]
    fn test_add_user_response_shape() {
        let user = User {
            id: Uuid::new_v4(),
            email: "grace@campus.edu".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Student,
            name: "Grace".to_string(),
        };
        let response = AddUserResponse {
            message: "User added successfully!".to_string(),
            user: SessionUser::from(&user),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["user"]["email"], "grace@campus.edu");
        assert_eq!(value["user"]["role"], "student");
        assert!(value["user"].get("password_hash").is_none());
    }
}
