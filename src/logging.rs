//! Logging
//!
//! `tracing` output goes to a log file, since the terminal belongs to the
//! TUI while it runs.
//!
//! ## Environment Variables
//!
//! - `PASSBOOK_LOG` or `RUST_LOG`: log filter (e.g. `debug`, `passbook=debug,warn`)

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "passbook=info,warn";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log filter directive (e.g., "debug", "passbook=debug,warn")
    pub filter: String,
    /// File that receives log lines, appended to
    pub file: PathBuf,
    /// Include file/line in logs
    pub with_file: bool,
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env(file: PathBuf) -> Self {
        let filter = std::env::var("PASSBOOK_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_FILTER.to_string());

        Self {
            filter,
            file,
            with_file: false,
        }
    }

    /// Create a debug configuration
    pub fn debug(file: PathBuf) -> Self {
        Self {
            filter: "passbook=debug,info".to_string(),
            file,
            with_file: true,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup; later calls leave the first subscriber in place.
pub fn init(config: &LogConfig) -> io::Result<()> {
    if let Some(parent) = config.file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&config.file)?;

    let env_filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_file(config.with_file)
        .with_line_number(config.with_file);

    let _ = tracing_subscriber::registry().with(env_filter).with(layer).try_init();
    Ok(())
}
