use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::http_server::auth::AdminApi;
use crate::ServiceState;

use super::{deleted, DeletionError};

/// Remove a department and everything nested under it.
#[instrument(skip(state))]
pub async fn handler(
    AdminApi(_user): AdminApi,
    State(state): State<ServiceState>,
    Path(dep_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, DeletionError> {
    state.tree().delete_department(dep_id).await?;
    tracing::info!("deleted department {}", dep_id);
    Ok(deleted("Department deleted successfully"))
}
