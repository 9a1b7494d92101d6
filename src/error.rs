//! Error types for the rendering helpers.

use thiserror::Error;

/// Everything that can go wrong while rendering lexicographic text.
///
/// Malformed markup is never an error: unmatched markers are emitted as
/// literal text. Errors are reserved for broken caller contracts and for
/// the configuration and batch I/O layers.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A Roman numeral was requested outside `1..=3999`.
    #[error("ordinal {0} is outside the representable range 1..=3999")]
    OrdinalOutOfRange(usize),

    /// An entry reached the disambiguation engine without any headword form.
    #[error("lexeme {id} has no headword forms")]
    MissingHeadword { id: u64 },

    /// A strict locale lookup named a locale the catalog doesn't know.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse locale catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A batch input line was not a valid lexeme record.
    #[error("invalid record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
