//! Error types for kind declaration, parsing, and comparison.

use thiserror::Error;

/// Errors produced by the base-36 decoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input string is empty.
    #[error("encoded value cannot be empty")]
    Empty,

    /// The input contains a character outside `[0-9a-z]`.
    #[error("invalid base-36 character {ch:?} at index {index}")]
    InvalidChar { ch: char, index: usize },

    /// The decoded value does not fit in 128 bits.
    #[error("encoded value overflows 128 bits")]
    Overflow,
}

/// Broad category of an [`IdError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised while declaring a kind or minting through an unbound kind.
    Configuration,
    /// Raised while parsing untrusted input.
    Format,
    /// Raised when ordering identifiers of two different kinds.
    TypeMismatch,
}

/// Errors that can occur when declaring kinds or parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// A kind was declared with an empty prefix.
    #[error("ID prefix cannot be empty")]
    EmptyPrefix,

    /// A kind was declared with a prefix containing the separator.
    #[error("ID prefix '{prefix}' must not contain the '_' separator")]
    PrefixContainsSeparator { prefix: String },

    /// A kind was declared with a prefix outside `[a-z0-9]`.
    #[error("ID prefix '{prefix}' contains invalid character {ch:?}")]
    InvalidPrefix { prefix: String, ch: char },

    /// A kind was declared with a prefix that is already registered.
    #[error("ID prefix '{prefix}' collides with an existing registration")]
    DuplicatePrefix { prefix: String },

    /// An identifier was requested for a prefix no kind is bound to.
    #[error("no identifier kind is bound to prefix '{prefix}'")]
    UnboundKind { prefix: String },

    /// The ID string is empty.
    #[error("ID cannot be empty")]
    Empty,

    /// The ID does not start with the expected prefix and separator.
    #[error("ID '{input}' has {}, expected '{expected}'", describe_found(.actual))]
    PrefixMismatch {
        input: String,
        expected: String,
        actual: Option<String>,
    },

    /// The ID does not start with any registered prefix.
    #[error("ID '{input}' has no known matching prefix")]
    UnknownPrefix { input: String },

    /// Nothing follows the separator.
    #[error("ID '{input}' has an empty payload")]
    EmptyPayload { input: String },

    /// The payload is not valid base-36.
    #[error("ID '{input}' has an invalid payload: {source}")]
    InvalidPayload {
        input: String,
        #[source]
        source: DecodeError,
    },

    /// Two identifiers of different kinds were ordered against each other.
    #[error("cannot compare '{left}' IDs with '{right}' IDs")]
    KindMismatch { left: String, right: String },
}

fn describe_found(actual: &Option<String>) -> String {
    match actual {
        Some(actual) => format!("prefix '{actual}'"),
        None => "no prefix".to_string(),
    }
}

impl IdError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdError::EmptyPrefix
            | IdError::PrefixContainsSeparator { .. }
            | IdError::InvalidPrefix { .. }
            | IdError::DuplicatePrefix { .. }
            | IdError::UnboundKind { .. } => ErrorKind::Configuration,
            IdError::Empty
            | IdError::PrefixMismatch { .. }
            | IdError::UnknownPrefix { .. }
            | IdError::EmptyPayload { .. }
            | IdError::InvalidPayload { .. } => ErrorKind::Format,
            IdError::KindMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }

    /// Returns true if this error was raised while declaring a kind.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Returns true if this error rejects untrusted input.
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// Returns true if this error indicates a prefix mismatch.
    pub fn is_prefix_error(&self) -> bool {
        matches!(
            self,
            IdError::PrefixMismatch { .. } | IdError::UnknownPrefix { .. }
        )
    }
}
