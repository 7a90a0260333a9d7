use crate::config::Config;
use crate::consts;
use anyhow::Context;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Send `tracing` output to the configured log file.  The terminal belongs to
/// the game, so nothing is ever logged there.
///
/// The filter comes from the [`LOG_ENV_VAR`][consts::LOG_ENV_VAR]
/// environment variable if set, otherwise from the configuration.
///
/// # Errors
///
/// Returns `Err` if the log file could not be opened or the filter could not
/// be parsed.
pub(crate) fn init(config: &Config) -> anyhow::Result<()> {
    if !config.log.enabled {
        return Ok(());
    }
    let path = config
        .log_file()
        .context("failed to determine path to local data directory")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let filter = match std::env::var(consts::LOG_ENV_VAR) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {} value", consts::LOG_ENV_VAR))?,
        Err(_) => EnvFilter::try_new(&config.log.level).context("invalid log level")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(())
}
