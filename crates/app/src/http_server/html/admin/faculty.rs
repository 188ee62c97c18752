use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;

use super::students::UserDisplayInfo;
use crate::http_server::auth::AdminPage;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "admin/faculties.html")]
pub struct FacultyTemplate {
    pub faculty: Vec<UserDisplayInfo>,
}

pub async fn handler(
    AdminPage(_user): AdminPage,
    State(state): State<ServiceState>,
) -> askama_axum::Response {
    let faculty = match state.identity().faculty().await {
        Ok(faculty) => faculty,
        Err(e) => {
            tracing::error!("failed to list faculty: {}", e);
            return super::error_response("Error loading faculty.");
        }
    };

    let faculty = faculty
        .into_iter()
        .map(|u| UserDisplayInfo {
            name: u.name,
            email: u.email,
        })
        .collect();

    FacultyTemplate { faculty }.into_response()
}
