//! Main entry point for the netscope service

use clap::Parser;
use common::journal::init_logging;
use netscope::{config::Config, server::Server, Error, Result};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "netscope",
    about = "Local network diagnostics over HTTP",
    version,
    author
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate example configuration file
    #[arg(long)]
    gen_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.gen_config {
        let example_config = Config::generate_example()?;
        println!("{example_config}");
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;

    let log_level = if args.debug { "debug" } else { "info" };
    init_logging(config.telemetry.log_format, log_level).map_err(|e| Error::Internal {
        message: format!("Failed to initialize logging: {e}"),
    })?;

    info!("Starting netscope v{}", netscope::VERSION);
    info!(
        "Configuration loaded, binding to {}",
        config.server.bind_address
    );

    let server = Server::new(config).await?;

    info!("Netscope initialized successfully");

    match server.run().await {
        Ok(()) => {
            info!("Netscope shut down gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Netscope error: {}", e);
            Err(e)
        }
    }
}
