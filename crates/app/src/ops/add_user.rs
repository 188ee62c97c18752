use clap::Args;

use common::prelude::{IdentityError, IdentityService, Role};

use crate::database::{Database, SqliteUserProvider, SqliteUserProviderError};
use crate::state::AppState;

/// Accounts are admin-curated; this op exists to bootstrap the first
/// admin before the web UI is reachable.
#[derive(Args, Debug, Clone)]
pub struct AddUser {
    /// Email address, used as the login identifier
    #[arg(long)]
    pub email: String,

    /// Initial password
    #[arg(long)]
    pub password: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account role
    #[arg(long, default_value = "admin")]
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum AddUserError {
    #[error("state error: {0}")]
    State(#[from] crate::state::StateError),

    #[error("database error: {0}")]
    Database(#[from] crate::database::DatabaseSetupError),

    #[error("failed to create user: {0}")]
    Identity(#[from] IdentityError<SqliteUserProviderError>),
}

#[async_trait::async_trait]
impl crate::op::Op for AddUser {
    type Error = AddUserError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let database = Database::connect(&state.db_path).await?;
        let identity = IdentityService::new(SqliteUserProvider::new(database));

        let user = identity
            .create_user(&self.email, &self.password, &self.name, self.role)
            .await?;

        Ok(format!("created {} account {}", user.role, user.email))
    }
}
