//! Tracing setup.  Output goes to a file because the terminal is the
//! playfield.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{GameError, GameResult};

/// Install the global subscriber.  `RUST_LOG` selects the filter and
/// defaults to `info`.
pub fn init(config: &Config) -> GameResult<()> {
    let file = File::create(&config.log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::Logging(format!("Failed to set tracing subscriber: {e}")))?;

    Ok(())
}
