//! Error types for `Tridex`.
//!
//! Index operations themselves never fail; errors only come from the
//! surfaces around them (configuration, conversions).

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for `Tridex` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around `Tridex` operations.
///
/// Error codes follow the pattern `TRIDEX-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Byte slice of the wrong length for a trigram (TRIDEX-001).
    #[error("[TRIDEX-001] Invalid trigram: expected 3 bytes, got {0}")]
    InvalidTrigram(usize),

    /// Configuration error (TRIDEX-002).
    #[error("[TRIDEX-002] Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Prune threshold outside `(0.0, 1.0]` (TRIDEX-003).
    #[error("[TRIDEX-003] Invalid prune threshold: {0}")]
    InvalidThreshold(f64),
}

impl Error {
    /// Returns the error code (e.g., "TRIDEX-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidTrigram(_) => "TRIDEX-001",
            Self::Config(_) => "TRIDEX-002",
            Self::InvalidThreshold(_) => "TRIDEX-003",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// All current errors are caller input problems, so this is always true.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}
