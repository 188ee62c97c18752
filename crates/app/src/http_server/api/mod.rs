use axum::routing::{delete, get, post};
use axum::Router;

pub mod academics;
pub mod login;
pub mod logout;
pub mod upload;
pub mod users;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/login", post(login::handler))
        .route("/logout", get(logout::handler))
        .route("/admin/addUser", post(users::add_user::handler))
        .route("/admin/deleteUser", delete(users::delete_user::handler))
        .nest("/admin/academics", academics::router(state.clone()))
        .nest("/upload", upload::router(state.clone()))
        .with_state(state)
}
