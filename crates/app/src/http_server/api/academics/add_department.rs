use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use crate::http_server::auth::AdminPage;
use crate::ServiceState;

use super::MutationError;

#[derive(Debug, Deserialize)]
pub struct AddDepartmentRequest {
    pub name: String,
}

/// Create a department from the academics form and bounce back to the
/// management page.
#[instrument(skip(state))]
pub async fn handler(
    AdminPage(_user): AdminPage,
    State(state): State<ServiceState>,
    Form(request): Form<AddDepartmentRequest>,
) -> Result<Redirect, MutationError> {
    let department = state.tree().add_department(&request.name).await?;
    tracing::info!("created department {} ({})", department.name, department.id);
    Ok(Redirect::to("/admin/academics"))
}
