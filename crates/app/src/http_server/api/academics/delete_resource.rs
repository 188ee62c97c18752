use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::http_server::auth::AdminApi;
use crate::ServiceState;

use super::{deleted, DeletionError};

#[instrument(skip(state))]
pub async fn handler(
    AdminApi(_user): AdminApi,
    State(state): State<ServiceState>,
    Path((dep_id, year_id, subject_id, resource_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, DeletionError> {
    state
        .tree()
        .delete_resource(dep_id, year_id, subject_id, resource_id)
        .await?;
    Ok(deleted("Resource deleted successfully"))
}
