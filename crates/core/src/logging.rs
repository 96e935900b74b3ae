//! Unified logging integration
//!
//! Library code logs through `tracing`. With the default `ftlog` feature the
//! events are bridged through `log` into ftlog's background writer; without it
//! a `tracing_subscriber` fmt subscriber filtered by `RUST_LOG` is installed.

use std::sync::Once;
use tracing::Level;
#[cfg(not(feature = "ftlog"))]
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static INIT: Once = Once::new();

/// Initialize the logging backend once per process; later calls are no-ops
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(feature = "ftlog")]
        {
            init_ftlog();
        }

        #[cfg(not(feature = "ftlog"))]
        {
            init_tracing();
        }
    });
}

#[cfg(feature = "ftlog")]
fn init_ftlog() {
    let result = ftlog::builder()
        .max_log_level(ftlog::LevelFilter::Debug)
        .bounded(100_000, false) // 100k buffer, non-blocking
        .utc()
        .try_init();

    match result {
        Ok(guard) => {
            // flushes on drop; the logger lives for the whole process
            std::mem::forget(guard);
            tracing::info!("Initialized ftlog unified logging");
        }
        Err(e) => eprintln!("Failed to initialize ftlog: {e}"),
    }
}

#[cfg(not(feature = "ftlog"))]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return;
    }

    tracing::info!("Initialized tracing logging (ftlog disabled)");
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Log how long an operation took, in nanoseconds per call
#[macro_export]
macro_rules! log_latency {
    ($operation:expr, $nanos:expr) => {
        if $nanos < 1_000 {
            tracing::debug!("{} completed in {}ns", $operation, $nanos);
        } else {
            tracing::info!("{} completed in {:.3}μs", $operation, $nanos as f64 / 1_000.0);
        }
    };
}

/// Log a rejected chunk without aborting the caller
#[macro_export]
macro_rules! log_conversion_error {
    ($input:expr, $error:expr) => {
        tracing::warn!("Rejected chunk {:?}: {}", $input, $error);
    };
}
