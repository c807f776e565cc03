//! Error types for bigfield.
//!
//! Column type resolution never fails: an internal type missing from a
//! connection's type-format table resolves to `None`. [`BigFieldError`] only
//! covers the surrounding machinery (settings, connections, the CLI).

use thiserror::Error;

/// The primary error type for bigfield.
#[derive(Error, Debug)]
pub enum BigFieldError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A database engine identifier that no connection type understands.
    #[error("Unsupported database engine: {0}")]
    UnsupportedEngine(String),

    /// A database alias that is not present in the settings.
    #[error("Database '{0}' not configured")]
    UnknownDatabase(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BigFieldError {
    /// Returns `true` for errors caused by the user's configuration rather
    /// than the environment.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError(_) | Self::UnsupportedEngine(_) | Self::UnknownDatabase(_)
        )
    }
}

impl From<serde_json::Error> for BigFieldError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, BigFieldError>`.
pub type BigFieldResult<T> = Result<T, BigFieldError>;
