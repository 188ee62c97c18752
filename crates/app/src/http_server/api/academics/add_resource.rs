use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use common::prelude::ResourceKind;

use crate::http_server::auth::AdminPage;
use crate::ServiceState;

use super::MutationError;

#[derive(Debug, Deserialize)]
pub struct AddResourceRequest {
    pub description: String,
    pub link: String,
    /// Resource type as submitted by the form. Anything we do not
    /// recognize is stored as a plain link.
    #[serde(rename = "type")]
    pub kind: String,
}

#[instrument(skip(state))]
pub async fn handler(
    AdminPage(_user): AdminPage,
    State(state): State<ServiceState>,
    Path((dep_id, year_id, subject_id)): Path<(Uuid, Uuid, Uuid)>,
    Form(request): Form<AddResourceRequest>,
) -> Result<Redirect, MutationError> {
    let kind = ResourceKind::parse_or_link(&request.kind);
    state
        .tree()
        .add_resource(
            dep_id,
            year_id,
            subject_id,
            &request.description,
            &request.link,
            kind,
        )
        .await?;
    Ok(Redirect::to("/admin/academics"))
}
