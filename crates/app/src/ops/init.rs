use clap::Args;

use crate::state::{AppConfig, AppState, DriveConfig};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Portal server port
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// OAuth client id for the Drive upload gateway
    #[arg(long, default_value = "")]
    pub drive_client_id: String,

    /// OAuth client secret for the Drive upload gateway
    #[arg(long, default_value = "")]
    pub drive_client_secret: String,

    /// OAuth redirect URI (must be registered on the client)
    #[arg(long)]
    pub drive_redirect_uri: Option<String>,

    /// Drive folder uploads land in (empty: Drive root)
    #[arg(long, default_value = "")]
    pub drive_folder_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut drive = DriveConfig {
            client_id: self.drive_client_id.clone(),
            client_secret: self.drive_client_secret.clone(),
            folder_id: self.drive_folder_id.clone(),
            ..DriveConfig::default()
        };
        if let Some(redirect_uri) = &self.drive_redirect_uri {
            drive.redirect_uri = redirect_uri.clone();
        }

        let config = AppConfig {
            port: self.port,
            drive,
        };
        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized campus directory at: {}\n\
             - Database: {}\n\
             - Config: {}\n\
             - Uploads: {}\n\
             - Port: {}",
            state.campus_dir.display(),
            state.db_path.display(),
            state.config_path.display(),
            state.uploads_path.display(),
            state.config.port,
        );

        Ok(output)
    }
}
