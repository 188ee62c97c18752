use clap::Args;

use common::prelude::{IdentityError, IdentityService};

use crate::database::{Database, SqliteUserProvider, SqliteUserProviderError};
use crate::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct DeleteUser {
    /// Email of the account to remove
    #[arg(long)]
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("state error: {0}")]
    State(#[from] crate::state::StateError),

    #[error("database error: {0}")]
    Database(#[from] crate::database::DatabaseSetupError),

    #[error("failed to delete user: {0}")]
    Identity(#[from] IdentityError<SqliteUserProviderError>),
}

#[async_trait::async_trait]
impl crate::op::Op for DeleteUser {
    type Error = DeleteUserError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let database = Database::connect(&state.db_path).await?;
        let identity = IdentityService::new(SqliteUserProvider::new(database));

        identity.delete_user(&self.email).await?;

        Ok(format!("deleted account {}", self.email))
    }
}
