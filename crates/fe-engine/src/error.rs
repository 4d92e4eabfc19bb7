use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the fe engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The OS refused a global hotkey registration (typically a duplicate).
    #[error("Hotkey registration failed for {chord}: {message}")]
    Hotkey {
        /// Canonical combination string.
        chord: String,
        /// Reason reported by the hotkey facility.
        message: String,
    },

    /// A key combination string did not resolve to a key.
    #[error("Invalid key combination: {0}")]
    InvalidKey(String),

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] config::Error),

    /// An entry had a missing or malformed argument.
    #[error(transparent)]
    Action(#[from] config::ActionError),

    /// An external capability call failed.
    #[error("{op} failed: {message}")]
    Os {
        /// Name of the failed operation.
        op: &'static str,
        /// Reason reported by the system.
        message: String,
    },

    /// I/O failure while performing a system operation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding or writing failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Generic error with context.
    #[error("Engine error: {0}")]
    Msg(String),
}

impl Error {
    /// Shorthand for an [`Error::Os`] value.
    pub fn os(op: &'static str, message: impl Into<String>) -> Self {
        Self::Os {
            op,
            message: message.into(),
        }
    }
}
