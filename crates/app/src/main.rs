//! Ihram storefront CLI

use std::process::ExitCode;

use clap::Parser;
use ihram_app::{config::load_dotenv, observability::init_subscriber};

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
