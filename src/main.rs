//! Unified assist-rs CLI.
//!
//! This binary provides a unified interface to the assist components:
//! - `assist-rs auth` - Authenticate accounts and work with exported account data
//!
//! Each subcommand can also be run as a standalone binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// assist-rs unified CLI.
#[derive(Parser)]
#[command(
    name = "assist-rs",
    version = assist_core::VERSION,
    about = "Account authentication against a remote assistant API",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate accounts against the configured backend.
    #[command(name = "auth")]
    Auth(assist_auth::AuthArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Auth(args) => assist_auth::cli::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
