//! Crate-wide error type.
//!
//! Every module reports its own `thiserror` enum; this type unifies them for
//! the dynamic entry points, which may fail at any stage (descriptor parsing,
//! dispatch, or the algorithm itself).

use thiserror::Error;

use crate::algos::AlgoError;
use crate::context::ParseError;
use crate::dynamic::DispatchError;
use crate::weightset::StarError;

/// Errors surfaced by the public API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed descriptor or value text.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No instantiation for the argument types, or wrong wrapped type.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// An algorithm rejected its input (precondition or divergence).
    #[error(transparent)]
    Algo(#[from] AlgoError),

    /// A weight outside the closure domain of its semiring.
    #[error(transparent)]
    Star(#[from] StarError),
}

/// A specialized `Result` type for libkleene operations.
pub type Result<T> = std::result::Result<T, Error>;
