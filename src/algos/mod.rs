//! Algorithms on automata and expressions.
//!
//! Every algorithm is generic over the automaton type and builds its result
//! as a fresh [`MutableAutomaton`](crate::automaton::MutableAutomaton):
//! inputs are never aliased.

mod copy;
mod determinize;
mod enumerate;
mod eval;
mod indexed_heap;
mod product;
mod proper;
mod sum;
mod thompson;
mod to_expression;

pub use copy::{copy, copy_convert, strip};
pub use determinize::determinize;
pub use enumerate::enumerate;
pub use eval::eval;
pub use indexed_heap::IndexedHeap;
pub use product::product;
pub use proper::{
    is_proper, is_valid, proper, proper_with, proper_with_map, Direction, EliminationOrder,
    EpsilonRemover, ProperAutomaton, ProperConfig,
};
pub use sum::sum;
pub use thompson::thompson;
pub use to_expression::to_expression;

use thiserror::Error;

use crate::automaton::{Automaton, StateId, TransposeAutomaton};
use crate::weightset::{OverflowError, StarError};

/// Errors reported by algorithms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlgoError {
    /// A spontaneous loop has a weight with no star; the automaton has no
    /// proper equivalent.
    #[error("invalid automaton: spontaneous loop on state {state}: {source}")]
    InvalidAutomaton {
        /// The state carrying the loop.
        state: StateId,
        /// The failed star.
        source: StarError,
    },

    /// A weight computed along the way is out of range of the weight set.
    #[error("weight overflow: {0}")]
    Overflow(#[from] OverflowError),

    /// The input does not meet the algorithm's requirements. Checked before
    /// any work is done.
    #[error("{algorithm}: {reason}")]
    Precondition {
        /// The algorithm name.
        algorithm: &'static str,
        /// What is wrong with the input.
        reason: String,
    },
}

/// A result for algorithm operations.
pub type Result<T> = std::result::Result<T, AlgoError>;

/// View `aut` backwards.
pub fn transpose<A: Automaton>(aut: A) -> TransposeAutomaton<A> {
    TransposeAutomaton::new(aut)
}
