use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};

use common::prelude::{TreeError, TreeLevel};

use crate::database::SqliteDepartmentProviderError;

pub mod add_department;
pub mod add_resource;
pub mod add_subject;
pub mod add_year;
pub mod delete_department;
pub mod delete_resource;
pub mod delete_subject;
pub mod delete_year;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/addDepartment", post(add_department::handler))
        .route("/:dep_id/addYear", post(add_year::handler))
        .route(
            "/:dep_id/years/:year_id/addSubject",
            post(add_subject::handler),
        )
        .route(
            "/:dep_id/years/:year_id/subjects/:subject_id/addResource",
            post(add_resource::handler),
        )
        .route("/:dep_id", delete(delete_department::handler))
        .route("/:dep_id/years/:year_id", delete(delete_year::handler))
        .route(
            "/:dep_id/years/:year_id/subjects/:subject_id",
            delete(delete_subject::handler),
        )
        .route(
            "/:dep_id/years/:year_id/subjects/:subject_id/resources/:resource_id",
            delete(delete_resource::handler),
        )
        .with_state(state)
}

/// Error surface for the form-posted mutations. Validation problems
/// come back as 400 text, a missing ancestor as 404, anything else as
/// a 500 with the detail kept in the log.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(TreeLevel),
    #[error("tree error: {0}")]
    Tree(TreeError<SqliteDepartmentProviderError>),
}

impl From<TreeError<SqliteDepartmentProviderError>> for MutationError {
    fn from(err: TreeError<SqliteDepartmentProviderError>) -> Self {
        match err {
            TreeError::Validation(message) => Self::Validation(message),
            TreeError::NotFound(level) => Self::NotFound(level),
            other => Self::Tree(other),
        }
    }
}

impl IntoResponse for MutationError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => {
                (http::StatusCode::BAD_REQUEST, message).into_response()
            }
            Self::NotFound(level) => (
                http::StatusCode::NOT_FOUND,
                format!("{} not found", level),
            )
                .into_response(),
            Self::Tree(e) => {
                tracing::error!("academics mutation failed: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

/// Error surface for the delete routes, which speak JSON to the
/// dashboard scripts.
#[derive(Debug, thiserror::Error)]
pub enum DeletionError {
    #[error("{0} not found")]
    NotFound(TreeLevel),
    #[error("tree error: {0}")]
    Tree(TreeError<SqliteDepartmentProviderError>),
}

impl From<TreeError<SqliteDepartmentProviderError>> for DeletionError {
    fn from(err: TreeError<SqliteDepartmentProviderError>) -> Self {
        match err {
            TreeError::NotFound(level) => Self::NotFound(level),
            other => Self::Tree(other),
        }
    }
}

impl IntoResponse for DeletionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(level) => {
                (http::StatusCode::NOT_FOUND, format!("{} not found", level))
            }
            Self::Tree(e) => {
                tracing::error!("academics deletion failed: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
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

pub(super) fn deleted(message: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true, "message": message }))
}
