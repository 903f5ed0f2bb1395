//! items-server - item CRUD service with a concurrent batch processor

#![allow(missing_docs)]

use clap::Parser;
use items_rs::config::{Config, ServerArgs};
use items_rs::utils::logging::init_tracing;
use items_rs::{ItemService, Result};
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let dotenv = dotenvy::dotenv();
    let args = ServerArgs::parse();

    match run(args, dotenv.is_ok()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line bind errors readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ServerArgs, dotenv_loaded: bool) -> Result<()> {
    let (mut config, file_error) = match Config::from_file(&args.config).await {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_env()?;
    args.apply_to(&mut config);
    config.validate()?;

    init_tracing(&config.logging);

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }
    match file_error {
        None => info!("Configuration loaded from {}", args.config.display()),
        Some(e) => warn!("Using default configuration: {}", e),
    }

    ItemService::new(config).await?.run().await
}
