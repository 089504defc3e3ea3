use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{var} not set\n   Export it: export {var}='your-key-here'")]
    MissingCredential { var: String },

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot determine home directory; set --logs-dir, --agents-dir and --root-dir")]
    NoHomeDir,

    #[error("Cannot create log directory {}: {source}", path.display())]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingCredential { .. } => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum LaunchError {
    #[error("Cannot find {file}")]
    NotFound { file: String, searched: Vec<PathBuf> },

    #[error("Error launching {name}: {source}")]
    Spawn {
        name: String,
        source: std::io::Error,
    },
}
