use axum::routing::get;
use axum::Router;

mod admin;
mod login;
mod student;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(login::handler))
        .route("/admin/dashboard", get(admin::dashboard::handler))
        .route("/admin/academics", get(admin::academics::handler))
        .route("/admin/students", get(admin::students::handler))
        .route("/admin/faculty", get(admin::faculty::handler))
        .route("/student/dashboard", get(student::dashboard::handler))
        .with_state(state)
}
