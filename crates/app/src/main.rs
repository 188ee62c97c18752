// CLI modules
mod args;
mod op;
mod ops;
mod state;

// Service modules (HTTP server, database, sessions, Drive gateway)
mod database;
mod drive;
mod http_server;
mod session;

// Re-export types that handler modules need
pub use http_server::ServiceState;

use args::{Args, Command};
use clap::Parser;
use op::Op;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let ctx = op::OpContext {
        config_path: args.config_path,
    };

    let result = match args.command {
        Command::Init(op) => op.execute(&ctx).await.map_err(|e| e.to_string()),
        Command::Serve(op) => op.execute(&ctx).await.map_err(|e| e.to_string()),
        Command::AddUser(op) => op.execute(&ctx).await.map_err(|e| e.to_string()),
        Command::DeleteUser(op) => op.execute(&ctx).await.map_err(|e| e.to_string()),
        Command::Version(op) => op.execute(&ctx).await.map_err(|e| e.to_string()),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
