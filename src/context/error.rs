//! Errors for descriptor and value parsing.

use thiserror::Error;

/// Errors that can occur while reading descriptors or values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A delimiter was expected and something else was found.
    #[error("unexpected {found} at position {position}, expected '{expected}'")]
    UnexpectedToken {
        /// The delimiter the grammar requires here.
        expected: char,
        /// What was found instead (quoted character or "end of input").
        found: String,
        /// Byte offset in the input.
        position: usize,
    },

    /// An identifier does not name a known constructor.
    #[error("invalid {category} name '{name}' at position {position}")]
    InvalidName {
        /// What kind of constructor was expected (labelset, weightset, ...).
        category: &'static str,
        /// The offending identifier.
        name: String,
        /// Byte offset of the identifier.
        position: usize,
    },

    /// The descriptor was parsed but input remains.
    #[error("unexpected trailing characters '{trailing}' after '{parsed}'")]
    TrailingCharacters {
        /// The descriptor read so far, printed back.
        parsed: String,
        /// The unread input.
        trailing: String,
    },

    /// An alphabet literal has no closing parenthesis.
    #[error("unterminated alphabet starting at position {position}")]
    UnterminatedAlphabet {
        /// Byte offset of the opening parenthesis.
        position: usize,
    },

    /// A value is not valid in its value set.
    #[error("{valueset}: invalid value '{input}': {reason}")]
    InvalidValue {
        /// The value set, printed.
        valueset: String,
        /// The offending text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A well-formed descriptor of the wrong kind.
    #[error("expected a {expected} descriptor, found '{found}'")]
    Mismatch {
        /// The expected type name.
        expected: String,
        /// The descriptor found, printed back.
        found: String,
    },

    /// This value set cannot read values from text.
    #[error("{valueset}: reading values is not supported")]
    Unsupported {
        /// The value set, printed.
        valueset: String,
    },
}

/// A specialized `Result` type for parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
