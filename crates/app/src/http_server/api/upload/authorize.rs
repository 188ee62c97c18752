use axum::extract::State;
use axum::response::Redirect;
use tracing::instrument;

use crate::http_server::auth::AdminPage;
use crate::ServiceState;

/// Kick off the consent flow by sending the operator to the external
/// store's authorization screen.
#[instrument(skip(state))]
pub async fn handler(AdminPage(_user): AdminPage, State(state): State<ServiceState>) -> Redirect {
    let url = state.drive().auth_url();
    Redirect::to(url.as_str())
}
