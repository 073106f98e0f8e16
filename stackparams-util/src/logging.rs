use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILTER_ENV_VAR: &str = "STACKPARAMS_LOG";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to initialize tracing: {source}")]
    TracingFilterFromEnv { #[from] source: tracing_subscriber::filter::FromEnvError },
    #[error("Unable to initialize tracing: {source}")]
    TracingInit { #[from] source: tracing_subscriber::util::TryInitError },
    #[error("Failed to open log file at '{}': {source}", path.display())]
    LogFile { path: PathBuf, #[source] source: io::Error },
}

/// Sets up logging to stderr, which keeps stdout free for the actual output.
///
/// The filter can be changed with the `STACKPARAMS_LOG` environment variable, e.g. `STACKPARAMS_LOG=debug`.
pub fn initialize_with_config(config: LoggingConfig) -> Result<(), Error> {

    let tracing_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_FILTER_ENV_VAR)
        .from_env()?;

    let logging_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact();

    let file_logging_layer =
        if let Some(log_file) = config.file_logging {

            let file = File::options()
                .append(true)
                .create(true)
                .open(&log_file)
                .map_err(|source| Error::LogFile { path: log_file, source })?;

            Some(tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)))
        } else {
            None
        };

    tracing_subscriber::registry()
        .with(tracing_filter)
        .with(logging_layer)
        .with(file_logging_layer)
        .try_init()?;

    Ok(())
}

#[derive(Clone, Debug, Default)]
pub struct LoggingConfig {
    pub file_logging: Option<PathBuf>,
}
