use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::http_server::auth::AdminPage;
use crate::ServiceState;

use super::MutationError;

#[derive(Debug, Deserialize)]
pub struct AddYearRequest {
    pub year: u32,
}

/// Append a year to a department. Duplicate year numbers are allowed,
/// so repeated submits simply add another entry.
#[instrument(skip(state))]
pub async fn handler(
    AdminPage(_user): AdminPage,
    State(state): State<ServiceState>,
    Path(dep_id): Path<Uuid>,
    Form(request): Form<AddYearRequest>,
) -> Result<Redirect, MutationError> {
    state.tree().add_year(dep_id, request.year).await?;
    Ok(Redirect::to("/admin/academics"))
}
