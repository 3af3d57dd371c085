use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

// the shell only ever shows the text, never the kind
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to launch {}: {source}", tool.display())]
    Launch {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} failed ({status})", tool.display())]
    Exit { tool: PathBuf, status: ExitStatus },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to locate settings file: {0}")]
    Locate(#[source] confy::ConfyError),
    #[error("failed to load settings: {0}")]
    Load(#[source] confy::ConfyError),
    #[error("failed to save settings: {0}")]
    Store(#[source] confy::ConfyError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to install logging subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
    #[error("failed to start background runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error(transparent)]
    Gui(#[from] eframe::Error),
}
