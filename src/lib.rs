//! # libkleene
//!
//! Weighted finite automata and rational expressions over semirings.
//!
//! Automata are parameterized by a *context*: a label set (the alphabet
//! model) paired with a weight set (the semiring). Algorithms are written
//! once against the [`LabelSet`](labelset::LabelSet) and
//! [`WeightSet`](weightset::WeightSet) traits and instantiated statically.
//! The [`dynamic`] layer erases the concrete context behind uniform handles
//! and routes calls to the matching instantiation, keyed by the run-time
//! type names of the arguments.
//!
//! ## Example
//!
//! ```rust,ignore
//! use libkleene::prelude::*;
//!
//! let ctx = dynamic::make_context("lan_char(ab)_z")?;
//! let mut edit = dynamic::make_automaton_editor(&ctx)?;
//! edit.add_initial("0", None)?;
//! edit.add_transition("0", "1", "\\e", Some("3"))?;
//! edit.add_transition("1", "2", "a", None)?;
//! edit.add_final("2", None)?;
//! let aut = edit.result();
//!
//! let proper = dynamic::proper(&aut, ProperConfig::default())?;
//! assert_eq!(dynamic::eval(&proper, "a")?.print(), "3");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algos;
pub mod automaton;
pub mod context;
pub mod dynamic;
pub mod error;
pub mod expression;
pub mod labelset;
pub mod polynomial;
pub mod valueset;
pub mod weightset;

pub use error::{Error, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::algos::{
        copy, copy_convert, determinize, enumerate, eval, is_proper, is_valid, proper,
        proper_with, proper_with_map, product, sum, thompson, to_expression, transpose,
        AlgoError,
        Direction, EliminationOrder, EpsilonRemover, ProperConfig,
    };
    pub use crate::automaton::{
        Automaton, AutomatonMut, MutableAutomaton, PartitionAutomaton, StateId, TransitionId,
        TransposeAutomaton,
    };
    pub use crate::context::{AstNode, Context, ContextParser, ParseError};
    pub use crate::dynamic::{
        self, AutomatonEditor, DispatchError, DynAutomaton, DynContext, DynValue, DynValueSet,
        Signature,
    };
    pub use crate::expression::{Expression, ExpressionRef, ExpressionSet, Identities};
    pub use crate::labelset::{
        LabelSet, LanChar, LetterSet, NullableSet, OneSet, TupleSet, WordSet,
    };
    pub use crate::polynomial::{Polynomial, PolynomialSet};
    pub use crate::valueset::{Convert, Join, ValueSet};
    pub use crate::weightset::{OverflowError, Rational, StarError, WeightSet, B, Q, Z, ZMin};
    pub use crate::{Error, Result};
}
