use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::drive::DriveError;
use crate::ServiceState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
}

/// OAuth redirect target. Exchanges the authorization code for tokens
/// and persists them; from here on uploads work without a browser.
#[instrument(skip(state, query))]
pub async fn handler(
    State(state): State<ServiceState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Html<&'static str>, CallbackError> {
    let code = query.code.ok_or(CallbackError::MissingCode)?;

    state.drive().exchange_code(&code).await?;

    tracing::info!("external store authorization completed");
    Ok(Html(
        "<h2>Authorization successful.</h2><p>You can close this tab; uploads are now enabled.</p>",
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("No code provided")]
    MissingCode,
    #[error("authorization exchange failed: {0}")]
    Exchange(#[from] DriveError),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingCode => {
                (http::StatusCode::BAD_REQUEST, "No code provided".to_string()).into_response()
            }
            Self::Exchange(e) => {
                tracing::error!("token exchange failed: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Authorization failed".to_string(),
                )
                    .into_response()
            }
        }
    }
}
