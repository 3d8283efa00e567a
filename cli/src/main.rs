use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
pub mod ux_error;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast::<notes_client::ClientError>() {
            Ok(client_err) => {
                ux_error::from_client_error(&client_err).display();
                Ok(ExitCode::FAILURE)
            }
            Err(other) => Err(other)
        }
    }
}
