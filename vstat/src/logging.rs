// src/logging.rs
use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable read when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "VSTAT_LOG";

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` or `VSTAT_LOG` win over the flags. Otherwise `log_level` wins
/// over `verbose`; a bare level such as `trace` applies to this crate only.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> Result<()> {
    let directive = match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_owned(),
        (_, Some(level)) => format!("vstat={level}"),
        (true, None) => "vstat=debug".to_owned(),
        (false, None) => "vstat=warn".to_owned(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize logging: {err}"))
}
