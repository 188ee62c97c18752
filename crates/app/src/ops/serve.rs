use clap::Args;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::database::Database;
use crate::drive::DriveGateway;
use crate::http_server;
use crate::state::AppState;
use crate::ServiceState;

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Override the configured port
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("state error: {0}")]
    State(#[from] crate::state::StateError),

    #[error("database error: {0}")]
    Database(#[from] crate::database::DatabaseSetupError),

    #[error("server error: {0}")]
    Server(#[from] http_server::HttpServerError),
}

#[async_trait::async_trait]
impl crate::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Initialize tracing; the guard has to live until the server
        // stops or buffered log lines are dropped.
        let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
        let log_level: tracing::Level = self.log_level.parse().unwrap_or(tracing::Level::INFO);
        let env_filter = EnvFilter::builder()
            .with_default_directive(log_level.into())
            .from_env_lossy();

        let stdout_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(non_blocking_writer)
            .with_filter(env_filter);

        tracing_subscriber::registry().with(stdout_layer).init();

        let state = AppState::load(ctx.config_path.clone())?;
        let database = Database::connect(&state.db_path).await?;
        let drive = DriveGateway::new(
            state.config.drive.clone(),
            state.tokens_path.clone(),
            state.uploads_path.clone(),
        );
        let service_state = ServiceState::new(database, drive);

        let mut config = http_server::Config::new(self.port.unwrap_or(state.config.port));
        config.log_level = log_level;

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {}", e);
                return;
            }
            tracing::info!("received shutdown signal");
            let _ = shutdown_tx.send(());
        });

        http_server::run(config, service_state, shutdown_rx).await?;

        Ok("portal server stopped".to_string())
    }
}
