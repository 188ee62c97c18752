use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "campus";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";
pub const TOKENS_FILE_NAME: &str = "tokens.json";
pub const UPLOADS_DIR_NAME: &str = "uploads";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the portal server
    #[serde(default = "default_port")]
    pub port: u16,
    /// Google Drive credentials for the upload gateway
    #[serde(default)]
    pub drive: DriveConfig,
}

fn default_port() -> u16 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            drive: DriveConfig::default(),
        }
    }
}

/// OAuth client settings for the external blob store. The secret is
/// operator-supplied via config, never baked into the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Must match an authorized redirect URI on the OAuth client
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    /// Target Drive folder for uploaded files (empty: Drive root)
    #[serde(default)]
    pub folder_id: String,
}

fn default_redirect_uri() -> String {
    "http://localhost:3000/upload/oauth2callback".to_string()
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
            folder_id: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the campus directory (~/.campus)
    pub campus_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the persisted Drive token file
    pub tokens_path: PathBuf,
    /// Scratch directory for upload spool files
    pub uploads_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the campus directory path (custom or default ~/.campus)
    pub fn campus_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new campus state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let campus_dir = Self::campus_dir(custom_path)?;

        if campus_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&campus_dir)?;

        let uploads_path = campus_dir.join(UPLOADS_DIR_NAME);
        fs::create_dir_all(&uploads_path)?;

        let config = config.unwrap_or_default();
        let config_path = campus_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Create empty database (touched here, initialized by the service)
        let db_path = campus_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        // The tokens file appears once the operator completes the
        // Drive authorization flow
        let tokens_path = campus_dir.join(TOKENS_FILE_NAME);

        Ok(Self {
            campus_dir,
            db_path,
            tokens_path,
            uploads_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the campus directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let campus_dir = Self::campus_dir(custom_path)?;

        if !campus_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = campus_dir.join(DB_FILE_NAME);
        let tokens_path = campus_dir.join(TOKENS_FILE_NAME);
        let uploads_path = campus_dir.join(UPLOADS_DIR_NAME);
        let config_path = campus_dir.join(CONFIG_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }
        if !uploads_path.exists() {
            fs::create_dir_all(&uploads_path)?;
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            campus_dir,
            db_path,
            tokens_path,
            uploads_path,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("campus directory not initialized. Run 'campus init' first")]
    NotInitialized,

    #[error("campus directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
