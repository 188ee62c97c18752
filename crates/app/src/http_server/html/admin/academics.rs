use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use tracing::instrument;

use common::prelude::{Department, SessionUser};

use super::error_response;
use crate::http_server::auth::AdminPage;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "admin/academics.html")]
pub struct AcademicsTemplate {
    pub user: SessionUser,
    pub departments: Vec<Department>,
}

/// The full academic structure with the add/delete controls.
#[instrument(skip(state))]
pub async fn handler(
    AdminPage(user): AdminPage,
    State(state): State<ServiceState>,
) -> askama_axum::Response {
    let departments = match state.tree().list_departments(true).await {
        Ok(departments) => departments,
        Err(e) => {
            tracing::error!("failed to load academic structure: {}", e);
            return error_response("Error loading academic structure.");
        }
    };

    AcademicsTemplate { user, departments }.into_response()
}
