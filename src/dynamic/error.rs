//! Errors of the dynamic layer.

use thiserror::Error;

use super::Signature;

/// Errors raised while routing a call to a static instantiation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No instantiation registered for these argument types.
    #[error("{algorithm}: no instantiation for ({signature})")]
    NoSuchInstantiation {
        /// The algorithm looked up.
        algorithm: &'static str,
        /// The run-time type names of the arguments.
        signature: Signature,
    },

    /// A handle does not wrap the type the instantiation expects.
    #[error("wrong type: expected {expected}, found {found}")]
    WrongType {
        /// The type name the instantiation works on.
        expected: String,
        /// The type name actually wrapped.
        found: String,
    },
}
