//! Error types for store composition and strict lookups

use thiserror::Error;

/// Errors raised by the namespacing layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A strict dictionary was read with a key it does not contain
    #[error("invalid property \"{key}\"")]
    InvalidProperty { key: String },

    /// Nothing is registered at the requested namespace path
    #[error("nothing registered at \"{path}\"")]
    KeyNotFound { path: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
