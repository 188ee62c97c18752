use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ops::{AddUser, DeleteUser, Init, Serve, Version};

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Academic content portal", version)]
pub struct Args {
    /// Path to the campus state directory (default: ~/.campus)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the state directory and config
    Init(Init),
    /// Run the portal server
    Serve(Serve),
    /// Create a user account (needed to bootstrap the first admin)
    AddUser(AddUser),
    /// Delete a user account by email
    DeleteUser(DeleteUser),
    /// Print version information
    Version(Version),
}
