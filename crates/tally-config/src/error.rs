use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures reading or writing the preferences file. Both carry the path so
/// the shell can tell the user which file to fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid tally config: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ConfigError::Io { path, source }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        ConfigError::Malformed {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
