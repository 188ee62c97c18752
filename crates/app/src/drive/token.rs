use std::path::Path;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::DriveError;

/// Persisted OAuth credentials for the external store. Written on
/// every successful exchange or refresh, read back on every upload
/// so an out-of-band refresh is never missed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Unix timestamp after which the access token is stale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Refresh when within a minute of expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

impl TokenSet {
    pub fn is_stale(&self, now: OffsetDateTime) -> bool {
        match self.expires_at {
            Some(expires_at) => now.unix_timestamp() + EXPIRY_MARGIN_SECS >= expires_at,
            None => false,
        }
    }

    /// Read the token file, `None` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, DriveError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), DriveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "saved OAuth tokens");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: Option<i64>) -> TokenSet {
        TokenSet {
            access_token: "at".to_string(),
            refresh_token: Some("rt".to_string()),
            expires_at,
            token_type: Some("Bearer".to_string()),
            scope: None,
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let tokens = token(Some(1_900_000_000));
        tokens.save(&path).unwrap();

        let loaded = TokenSet::load(&path).unwrap().unwrap();
        assert_eq!(loaded, tokens);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TokenSet::load(&dir.path().join("tokens.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_staleness() {
        let now = OffsetDateTime::now_utc();
        let ts = now.unix_timestamp();

        assert!(token(Some(ts - 10)).is_stale(now));
        assert!(token(Some(ts + 30)).is_stale(now)); // inside the margin
        assert!(!token(Some(ts + 3600)).is_stale(now));
        assert!(!token(None).is_stale(now));
    }
}
