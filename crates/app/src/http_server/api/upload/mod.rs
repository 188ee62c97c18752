use axum::routing::{get, post};
use axum::Router;

pub mod authorize;
pub mod callback;
pub mod upload;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(upload::handler))
        .route("/auth", get(authorize::handler))
        .route("/oauth2callback", get(callback::handler))
        .with_state(state)
}
