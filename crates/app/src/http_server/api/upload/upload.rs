use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::drive::DriveError;
use crate::http_server::auth::AdminApi;
use crate::ServiceState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_id: String,
    pub web_view_link: Option<String>,
    pub web_content_link: Option<String>,
}

/// Accept one file from a multipart form and proxy it to the external
/// store. The response carries the links an admin pastes into a
/// resource form.
#[instrument(skip(state, multipart))]
pub async fn handler(
    AdminApi(_user): AdminApi,
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("multipart parsing error: {}", e);
        UploadError::Multipart(e.to_string())
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());
                let mime_type = match field.content_type() {
                    Some(mime) => mime.to_string(),
                    None => mime_guess::from_path(&filename)
                        .first_or_octet_stream()
                        .to_string(),
                };

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("error reading file data for {}: {}", filename, e);
                        UploadError::Multipart(e.to_string())
                    })?
                    .to_vec();

                file = Some((filename, mime_type, data));
            }
            _ => {
                tracing::warn!("ignoring unknown field: {}", field_name);
            }
        }
    }

    let (filename, mime_type, data) = file.ok_or(UploadError::NoFile)?;
    tracing::info!("uploading {} ({} bytes, {})", filename, data.len(), mime_type);

    let stored = state.drive().upload(&filename, &mime_type, data).await?;

    Ok(Json(UploadResponse {
        success: true,
        file_id: stored.id,
        web_view_link: stored.web_view_link,
        web_content_link: stored.web_content_link,
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,
    #[error("Multipart error: {0}")]
    Multipart(String),
    #[error(transparent)]
    Drive(#[from] DriveError),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NoFile => (
                http::StatusCode::BAD_REQUEST,
                "No file uploaded".to_string(),
            ),
            Self::Multipart(msg) => (
                http::StatusCode::BAD_REQUEST,
                format!("Bad request: {}", msg),
            ),
            Self::Drive(DriveError::NotAuthorized) => (
                http::StatusCode::FORBIDDEN,
                DriveError::NotAuthorized.to_string(),
            ),
            Self::Drive(e) => {
                tracing::error!("upload to external store failed: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Upload failed: {}", e),
                )
            }
        };
        (
            status,
            Json(serde_json::json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
