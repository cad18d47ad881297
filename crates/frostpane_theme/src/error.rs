//! Theme engine error types

use thiserror::Error;

/// Errors surfaced by the theming engine.
///
/// Native attribute application is fire-and-forget and never errors;
/// the fallible surface is theme pack configuration and loading.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The theme source was empty or blank
    #[error("invalid theme source: {0:?}")]
    InvalidSource(String),

    /// Reading a theme pack from disk failed
    #[error("failed to read theme pack {source}: {cause}")]
    PackRead {
        source: String,
        #[source]
        cause: std::io::Error,
    },

    /// A theme pack document did not parse
    #[error("failed to parse theme pack {source}: {cause}")]
    PackParse {
        source: String,
        #[source]
        cause: toml::de::Error,
    },

    /// A `builtin://` source named no shipped pack
    #[error("unknown built-in theme pack: {0}")]
    UnknownBuiltin(String),
}

/// Result type for theming operations
pub type Result<T> = std::result::Result<T, ThemeError>;
