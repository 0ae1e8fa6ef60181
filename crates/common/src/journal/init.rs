//! Tracing subscriber initialization

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable console output
    Text,
    /// One JSON object per line on stdout
    #[default]
    Json,
    /// systemd journald, console text if journald is not reachable
    Journald,
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(
    format: LogFormat,
    default_level: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()?;
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(true))
                .try_init()?;
        }
        LogFormat::Journald => match tracing_journald::layer() {
            Ok(journal) => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(journal)
                    .try_init()?;
                info!("Logging initialized with systemd journald");
            }
            Err(e) => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_target(false))
                    .try_init()?;
                warn!("journald not available ({e}), logging to console");
            }
        },
    }

    Ok(())
}
