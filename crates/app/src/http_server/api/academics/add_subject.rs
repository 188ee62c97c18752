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
pub struct AddSubjectRequest {
    pub name: String,
}

#[instrument(skip(state))]
pub async fn handler(
    AdminPage(_user): AdminPage,
    State(state): State<ServiceState>,
    Path((dep_id, year_id)): Path<(Uuid, Uuid)>,
    Form(request): Form<AddSubjectRequest>,
) -> Result<Redirect, MutationError> {
    state
        .tree()
        .add_subject(dep_id, year_id, &request.name)
        .await?;
    Ok(Redirect::to("/admin/academics"))
}
