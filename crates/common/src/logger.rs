use crate::error::NusantaraError;
use std::path::Path;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const LOG_FILE_NAME: &str = "nusantara.log";

/// Initialize logging for the long-running server
///
/// Logs go to both the console and `<log_dir>/nusantara.log`.
///
/// # Arguments
/// * `log_dir` - Directory where the log file will be stored
/// * `log_level` - Filter directive (e.g. `info`, `nusantara_story=debug`)
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), NusantaraError> {
    // Create log directory
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            NusantaraError::config(format!(
                "Failed to create log directory {}: {}",
                log_dir.display(),
                e
            ))
        })?;
    }

    // Log file path
    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            NusantaraError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    // Console output layer
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(build_filter(log_level)?);

    // File output layer
    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false) // No ANSI color codes in files
        .with_filter(build_filter(log_level)?);

    // Initialize subscriber
    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| NusantaraError::config(format!("Failed to install logger: {}", e)))?;

    tracing::info!(
        "Logging initialized: level={}, log_file={}",
        log_level,
        log_file_path.display()
    );

    Ok(())
}

/// Console-only logging for one-shot CLI runs
///
/// Writes to stderr so stdout stays clean for `--json` output.
pub fn setup_console_logging(log_level: &str) -> Result<(), NusantaraError> {
    // Console output layer on stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(log_level)?)
        .try_init()
        .map_err(|e| NusantaraError::config(format!("Failed to install logger: {}", e)))?;

    Ok(())
}

/// Build the env filter; `RUST_LOG` takes precedence over the configured level
fn build_filter(log_level: &str) -> Result<EnvFilter, NusantaraError> {
    // RUST_LOG env var takes precedence
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(log_level).map_err(|e| {
        NusantaraError::config(format!("Invalid log level '{}': {}", log_level, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(build_filter("info").is_ok());
        assert!(build_filter("warn,nusantara_story=debug").is_ok());
    }
}
