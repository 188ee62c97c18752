use std::fmt::Display;
use std::path::PathBuf;

/// Shared context passed to every CLI operation.
#[derive(Debug, Clone)]
pub struct OpContext {
    /// Override for the state directory (default: ~/.campus)
    pub config_path: Option<PathBuf>,
}

#[async_trait::async_trait]
pub trait Op {
    type Error: std::error::Error;
    type Output: Display;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}
