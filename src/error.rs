use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the configuration layer.
///
/// Cookie reading and HTML rewriting never fail; only loading a
/// [`BannerConfig`](crate::BannerConfig) from disk or from the environment
/// can return an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// The configuration file is not valid TOML for a banner config.
    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    /// The bootstrap payload could not be serialized.
    #[error("failed to serialize banner payload")]
    Json(#[from] serde_json::Error),

    /// An environment override carried a value of the wrong shape.
    #[error("invalid value for `{key}`: {message}")]
    Env {
        /// The environment variable name
        key: String,
        /// Human-readable message explaining the rejection
        message: String,
    },
}

impl Error {
    /// Creates an environment override error.
    pub fn env(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Env {
            key: key.into(),
            message: message.into(),
        }
    }
}
