#![forbid(unsafe_code)]

//! Top-level error type.
//!
//! The drawer itself never fails once constructed: missing elements degrade
//! to no-ops. Errors only surface while setting it up, either from a bad
//! [`DrawerConfig`](navdrawer_runtime::DrawerConfig) or from a host that
//! cannot provide a document.

use std::fmt;

use navdrawer_runtime::ConfigError;

/// Setup failure.
#[derive(Debug)]
pub enum Error {
    /// The configuration failed to load or validate.
    Config(ConfigError),
    /// The host environment could not be bound (no window, no document).
    Host(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Host(msg) => write!(f, "host unavailable: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Host(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for navdrawer setup.
pub type Result<T> = std::result::Result<T, Error>;
