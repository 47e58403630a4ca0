//! Contexts: the pairing of a label set and a weight set.
//!
//! A context identifies one automaton species, e.g. `lal_char(ab)_b`
//! (letters `a` and `b`, Boolean weights). Contexts are immutable and cheap
//! to clone: both halves are shared through `Arc`, so many automata can
//! refer to the same sets.

mod ast;
mod error;
mod parser;

pub use ast::AstNode;
pub use error::{ParseError, Result};
pub use parser::ContextParser;

use std::fmt;
use std::sync::Arc;

use crate::labelset::LabelSet;
use crate::valueset::Join;
use crate::weightset::WeightSet;

/// An immutable `(LabelSet, WeightSet)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Context<L, W> {
    labelset: Arc<L>,
    weightset: Arc<W>,
}

impl<L: LabelSet, W: WeightSet> Context<L, W> {
    /// Pair `labelset` with `weightset`.
    pub fn new(labelset: L, weightset: W) -> Self {
        Context {
            labelset: Arc::new(labelset),
            weightset: Arc::new(weightset),
        }
    }

    /// The label set.
    pub fn labelset(&self) -> &L {
        &self.labelset
    }

    /// The weight set.
    pub fn weightset(&self) -> &W {
        &self.weightset
    }

    /// The static type name, e.g. `lal_char_b`.
    pub fn sname() -> String {
        format!("{}_{}", L::sname(), W::sname())
    }

    /// The full descriptor, e.g. `lal_char(ab)_b`.
    pub fn vname(&self) -> String {
        format!("{}_{}", self.labelset.vname(), self.weightset.vname())
    }

    /// Build a context from a parsed descriptor.
    pub fn from_ast(node: &AstNode) -> Result<Self> {
        match node {
            AstNode::Context {
                labelset,
                weightset,
            } => Ok(Context::new(L::from_ast(labelset)?, W::from_ast(weightset)?)),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    /// Build a context from a descriptor string such as `lal_char(ab)_b`.
    pub fn make(descriptor: &str) -> Result<Self> {
        let ast = ContextParser::new(descriptor).parse_context()?;
        Self::from_ast(&ast)
    }
}

impl<L: LabelSet, W: WeightSet> fmt::Display for Context<L, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vname())
    }
}

impl<L1, W1, L2, W2> Join<Context<L2, W2>> for Context<L1, W1>
where
    L1: LabelSet + Join<L2>,
    W1: WeightSet + Join<W2>,
    L2: LabelSet,
    W2: WeightSet,
    <L1 as Join<L2>>::Output: LabelSet,
    <W1 as Join<W2>>::Output: WeightSet,
{
    type Output = Context<<L1 as Join<L2>>::Output, <W1 as Join<W2>>::Output>;

    fn join(&self, rhs: &Context<L2, W2>) -> Self::Output {
        Context::new(
            self.labelset().join(rhs.labelset()),
            self.weightset().join(rhs.weightset()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelset::{LetterSet, NullableSet, WordSet};
    use crate::valueset::ValueSet;
    use crate::weightset::{B, Q, Z};

    #[test]
    fn test_make_and_print() {
        let ctx: Context<LetterSet, B> = Context::make("lal_char(ab)_b").unwrap();
        assert_eq!(ctx.vname(), "lal_char(ab)_b");
        assert_eq!(Context::<LetterSet, B>::sname(), "lal_char_b");
        assert_eq!(ctx.labelset().generators(), vec!['a', 'b']);
    }

    #[test]
    fn test_round_trip() {
        let ctx: Context<NullableSet<LetterSet>, Q> = Context::make("lan_char(xyz), q").unwrap();
        let again: Context<NullableSet<LetterSet>, Q> = Context::make(&ctx.vname()).unwrap();
        assert_eq!(ctx, again);
    }

    #[test]
    fn test_wrong_kind_is_a_mismatch() {
        let err = Context::<LetterSet, B>::make("lal_char(ab)_z").unwrap_err();
        assert!(matches!(err, ParseError::Mismatch { .. }));
        let err = Context::<LetterSet, B>::make("law_char(ab)_b").unwrap_err();
        assert!(matches!(err, ParseError::Mismatch { .. }));
    }

    #[test]
    fn test_join() {
        let l: Context<LetterSet, B> = Context::make("lal_char(ab)_b").unwrap();
        let r: Context<WordSet, Z> = Context::make("law_char(bc)_z").unwrap();
        let j = l.join(&r);
        assert_eq!(j.vname(), "law_char(abc)_z");
        assert_eq!(j.labelset().vname(), WordSet::make("law_char(abc)").unwrap().vname());
    }
}
