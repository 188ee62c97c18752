mod token;

pub use token::TokenSet;

use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use crate::state::DriveConfig;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_ENDPOINT: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FILES_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";

/// drive.file: manage files the app creates; drive.metadata: read
/// listings for the target folder.
const SCOPES: &str =
    "https://www.googleapis.com/auth/drive.file https://www.googleapis.com/auth/drive.metadata";

/// Gateway to the external blob store. Unauthorized until an operator
/// completes the consent flow; tokens are persisted to the state dir
/// and re-read on every upload, so only the authorize and upload
/// paths ever rewrite them.
#[derive(Debug, Clone)]
pub struct DriveGateway {
    client: reqwest::Client,
    config: DriveConfig,
    tokens_path: PathBuf,
    uploads_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Unauthorized,
    Authorized,
}

/// Upload result handed back to the caller: the object id plus the
/// provider's browser and direct-download links.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub web_content_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("server not authorized; visit /upload/auth and complete authorization in browser")]
    NotAuthorized,

    #[error("external store rejected the call ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    #[error("transport error talking to the external store: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DriveGateway {
    pub fn new(config: DriveConfig, tokens_path: PathBuf, uploads_dir: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            tokens_path,
            uploads_dir,
        }
    }

    /// Authorized as soon as a persisted token set exists.
    pub fn status(&self) -> GatewayStatus {
        match TokenSet::load(&self.tokens_path) {
            Ok(Some(_)) => GatewayStatus::Authorized,
            Ok(None) => GatewayStatus::Unauthorized,
            Err(e) => {
                tracing::warn!("failed to read token file: {}", e);
                GatewayStatus::Unauthorized
            }
        }
    }

    /// Consent-screen URL the operator is redirected to.
    /// `access_type=offline` + `prompt=consent` force a refresh token
    /// on the first grant.
    pub fn auth_url(&self) -> Url {
        let mut url = Url::parse(AUTH_ENDPOINT).expect("static auth endpoint parses");
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");
        url
    }

    /// Exchange the authorization code for tokens and persist them.
    /// Completes the Unauthorized -> Authorizing -> Authorized walk.
    pub async fn exchange_code(&self, code: &str) -> Result<(), DriveError> {
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let tokens = Self::token_set_from_response(response, None).await?;
        tokens.save(&self.tokens_path)?;
        Ok(())
    }

    /// Upload one payload: spool to a scoped temp file, push it to
    /// the external store, make it link-readable, return the links.
    /// The temp file is deleted when the handle drops, success or
    /// failure.
    pub async fn upload(
        &self,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile, DriveError> {
        // Fails with NotAuthorized before any network traffic
        let access_token = self.access_token().await?;

        let mut spool = tempfile::NamedTempFile::new_in(&self.uploads_dir)?;
        spool.write_all(&data)?;
        spool.flush()?;
        drop(data);

        let payload = tokio::fs::read(spool.path()).await?;
        let result = self
            .push_to_store(&access_token, filename, mime_type, payload)
            .await;

        // spool drops here, removing the temp file either way
        drop(spool);
        result
    }

    async fn push_to_store(
        &self,
        access_token: &str,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile, DriveError> {
        let mut metadata = serde_json::json!({ "name": filename });
        if !self.config.folder_id.is_empty() {
            metadata["parents"] = serde_json::json!([self.config.folder_id]);
        }

        // Drive's multipart upload wants multipart/related, which
        // reqwest's form support does not produce; build the body by
        // hand.
        let boundary = format!("campus-{}", Uuid::new_v4().simple());
        let mut body: Vec<u8> = Vec::with_capacity(data.len() + 512);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.to_string().as_bytes());
        body.extend_from_slice(format!("\r\n--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
        body.extend_from_slice(&data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let response = self
            .client
            .post(UPLOAD_ENDPOINT)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id,webViewLink,webContentLink"),
                ("supportsAllDrives", "true"),
            ])
            .bearer_auth(access_token)
            .header(
                http::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::Upstream {
                status: status.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }

        let file: DriveFile = response.json().await?;
        self.make_link_readable(access_token, &file.id).await?;
        Ok(file)
    }

    /// Grant anyone-with-the-link read access so the stored links
    /// work without a Drive account.
    async fn make_link_readable(&self, access_token: &str, file_id: &str) -> Result<(), DriveError> {
        let response = self
            .client
            .post(format!("{}/{}/permissions", FILES_ENDPOINT, file_id))
            .query(&[("supportsAllDrives", "true")])
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::Upstream {
                status: status.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Current access token, refreshed and re-persisted when stale.
    /// Always re-reads the token file rather than caching, so a
    /// refresh done by another request is picked up.
    async fn access_token(&self) -> Result<String, DriveError> {
        let tokens = TokenSet::load(&self.tokens_path)?.ok_or(DriveError::NotAuthorized)?;

        if !tokens.is_stale(OffsetDateTime::now_utc()) {
            return Ok(tokens.access_token);
        }

        let refresh_token = tokens
            .refresh_token
            .clone()
            .ok_or(DriveError::NotAuthorized)?;

        tracing::debug!("access token stale, refreshing");
        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("refresh_token", refresh_token.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        // Refresh responses usually omit the refresh token; carry the
        // old one forward and persist before returning.
        let refreshed = Self::token_set_from_response(response, Some(refresh_token)).await?;
        refreshed.save(&self.tokens_path)?;
        Ok(refreshed.access_token)
    }

    async fn token_set_from_response(
        response: reqwest::Response,
        fallback_refresh_token: Option<String>,
    ) -> Result<TokenSet, DriveError> {
        let status = response.status();
        if !status.is_success() {
            return Err(DriveError::Upstream {
                status: status.as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: TokenResponse = response.json().await?;
        let expires_at = parsed
            .expires_in
            .map(|secs| OffsetDateTime::now_utc().unix_timestamp() + secs);

        Ok(TokenSet {
            access_token: parsed.access_token,
            refresh_token: parsed.refresh_token.or(fallback_refresh_token),
            expires_at,
            token_type: parsed.token_type,
            scope: parsed.scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(dir: &std::path::Path) -> DriveGateway {
        let config = DriveConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:3000/upload/oauth2callback".to_string(),
            folder_id: String::new(),
        };
        DriveGateway::new(config, dir.join("tokens.json"), dir.to_path_buf())
    }

    #[tokio::test]
    async fn test_upload_unauthorized_makes_no_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = gateway(dir.path());

        assert_eq!(gateway.status(), GatewayStatus::Unauthorized);

        let result = gateway
            .upload("syllabus.pdf", "application/pdf", b"%PDF-".to_vec())
            .await;
        assert!(matches!(result, Err(DriveError::NotAuthorized)));

        // No spool file should linger either
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_status_follows_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = gateway(dir.path());
        assert_eq!(gateway.status(), GatewayStatus::Unauthorized);

        let tokens = TokenSet {
            access_token: "at".to_string(),
            refresh_token: Some("rt".to_string()),
            expires_at: None,
            token_type: None,
            scope: None,
        };
        tokens.save(&dir.path().join("tokens.json")).unwrap();

        assert_eq!(gateway.status(), GatewayStatus::Authorized);
    }

    #[test]
    fn test_auth_url_requests_offline_consent() {
        let dir = tempfile::tempdir().unwrap();
        let url = gateway(dir.path()).auth_url();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(pairs.contains(&("client_id".to_string(), "client".to_string())));
        assert!(pairs.contains(&("access_type".to_string(), "offline".to_string())));
        assert!(pairs.contains(&("prompt".to_string(), "consent".to_string())));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
    }
}
