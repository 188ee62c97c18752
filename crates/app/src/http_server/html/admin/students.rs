use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;

use crate::http_server::auth::AdminPage;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "admin/students.html")]
pub struct StudentsTemplate {
    pub students: Vec<UserDisplayInfo>,
}

#[derive(Debug, Clone)]
pub struct UserDisplayInfo {
    pub name: String,
    pub email: String,
}

pub async fn handler(
    AdminPage(_user): AdminPage,
    State(state): State<ServiceState>,
) -> askama_axum::Response {
    let students = match state.identity().students().await {
        Ok(students) => students,
        Err(e) => {
            tracing::error!("failed to list students: {}", e);
            return super::error_response("Error loading students.");
        }
    };

    let students = students
        .into_iter()
        .map(|u| UserDisplayInfo {
            name: u.name,
            email: u.email,
        })
        .collect();

    StudentsTemplate { students }.into_response()
}
