//! # BOSSWAVE Telemetry
//!
//! One place to turn `tracing` events from the core crates into output.
//! The libraries only emit events; binaries call [`init_logging`] once at
//! startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bw_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), bw_telemetry::TelemetryError> {
//!     let config = TelemetryConfig::from_env().for_service("bw-router");
//!     init_logging(&config)?;
//!     tracing::info!("router starting");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BW_SERVICE_NAME` | `bosswave` | Service name in log events |
//! | `BW_LOG_LEVEL` | `info` | `EnvFilter` directive (falls back to `RUST_LOG`) |
//! | `BW_JSON_LOGS` | `false` | Emit JSON lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install log subscriber: {0}")]
    Init(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
