//! assist-auth standalone binary.

use std::process::ExitCode;

use assist_auth::{AuthArgs, cli};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = AuthArgs::parse();

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
