//! Error type for the core. FFI entry points flatten it to `String`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorTapError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid click count {0:?}")]
    InvalidClickCount(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Manual color input did not match `#RRGGBB`.
    #[error("invalid hex color {0:?}")]
    InvalidHexColor(String),
}

impl ColorTapError {
    /// True for the failures the user is told about; everything else is a storage failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ColorTapError::InvalidHexColor(_))
    }
}

pub type Result<T> = std::result::Result<T, ColorTapError>;
