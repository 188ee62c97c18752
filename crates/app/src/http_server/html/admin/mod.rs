pub mod academics;
pub mod dashboard;
pub mod faculty;
pub mod students;

use askama_axum::IntoResponse;

pub(super) fn error_response(message: &str) -> askama_axum::Response {
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        format!("Error: {}", message),
    )
        .into_response()
}
