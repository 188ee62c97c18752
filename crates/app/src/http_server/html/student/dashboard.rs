use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use tracing::instrument;

use common::prelude::{Department, SessionUser};

use crate::http_server::auth::StudentPage;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "student/dashboard.html")]
pub struct DashboardTemplate {
    pub user: SessionUser,
    pub departments: Vec<Department>,
}

/// Read-only browse over the fully populated tree.
#[instrument(skip(state))]
pub async fn handler(
    StudentPage(user): StudentPage,
    State(state): State<ServiceState>,
) -> askama_axum::Response {
    let departments = match state.tree().list_departments(true).await {
        Ok(departments) => departments,
        Err(e) => {
            tracing::error!("failed to load academic structure: {}", e);
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Error loading academic structure.".to_string(),
            )
                .into_response();
        }
    };

    DashboardTemplate { user, departments }.into_response()
}
