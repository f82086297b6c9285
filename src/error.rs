//! Error types

use thiserror::Error;

/// Error raised while resolving backslash escapes in a delimiter list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// A backslash introduces a character with no defined meaning
    #[error("invalid escape sequence '\\{escape}' in delimiter at byte {position}")]
    Invalid { escape: char, position: usize },

    /// The delimiter list ends with a lone backslash
    #[error("null escape sequence in delimiter at byte {position}")]
    Dangling { position: usize },
}

/// Errors produced while building delimiters or merging streams
#[derive(Debug, Error)]
pub enum PasteError {
    #[error(transparent)]
    Escape(#[from] EscapeError),

    /// The resolved delimiter list holds no runes
    #[error("delimiter list is empty")]
    EmptyDelimiter,

    #[error("fopen {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Bytes that are not valid UTF-8 text
    #[error("{name}: invalid UTF-8 sequence at byte {offset}")]
    Decode { name: String, offset: u64 },

    #[error("write {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PasteError>;
