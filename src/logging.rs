use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("cannot open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// Send log output to a file so it stays off the alternate screen.
///
/// Level comes from `RUST_LOG`, defaulting to `info`. On error nothing is
/// installed and the app runs without a log.
pub fn init<P: AsRef<Path>>(path: P) -> Result<(), LogInitError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}
