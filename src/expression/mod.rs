//! Rational expressions.
//!
//! Expressions are immutable trees with shared subterms
//! ([`ExpressionRef`] is an `Arc`). They are built through an
//! [`ExpressionSet`], which applies the simplifications selected by its
//! [`Identities`] as terms are constructed. Reading expressions from text
//! is left to front ends: [`ExpressionSet::conv`](crate::valueset::ValueSet::conv)
//! only reads atoms.

mod expressionset;

pub use expressionset::ExpressionSet;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::context::ParseError;

/// A shared expression node.
pub type ExpressionRef<L, W> = Arc<Expression<L, W>>;

/// A rational expression over labels `L` and weights `W`.
///
/// Sums and products are n-ary; the constructors of [`ExpressionSet`]
/// flatten them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expression<L, W> {
    /// The empty language, `\z`.
    Zero,
    /// The empty word, `\e`.
    One,
    /// A label.
    Atom(L),
    /// `e + f + ...`.
    Sum(Vec<ExpressionRef<L, W>>),
    /// `ef...`.
    Prod(Vec<ExpressionRef<L, W>>),
    /// `e*`.
    Star(ExpressionRef<L, W>),
    /// `<w>e`.
    LWeight(W, ExpressionRef<L, W>),
    /// `e<w>`.
    RWeight(ExpressionRef<L, W>, W),
}

impl<L, W> Expression<L, W> {
    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Expression::Zero | Expression::One | Expression::Atom(_) => 1,
            Expression::Sum(es) | Expression::Prod(es) => {
                1 + es.iter().map(|e| e.size()).sum::<usize>()
            }
            Expression::Star(e) | Expression::LWeight(_, e) | Expression::RWeight(e, _) => {
                1 + e.size()
            }
        }
    }

    /// Binding strength when printed; higher binds tighter.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Expression::Sum(_) => 0,
            Expression::Prod(_) => 1,
            Expression::LWeight(..) | Expression::RWeight(..) => 2,
            Expression::Star(_) => 3,
            Expression::Zero | Expression::One | Expression::Atom(_) => 4,
        }
    }
}

/// The rewriting rules applied while building expressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Identities {
    /// Neutral and absorbing elements only (`\z+e = e`, `\e.e = e`,
    /// `\z.e = \z`, `<1>e = e`), plus associativity.
    #[default]
    Trivial,
    /// Trivial identities, plus: sums are sorted and equal terms merged
    /// (`<2>a + <3>a = <5>a`), and left weights move out of products.
    Series,
}

impl fmt::Display for Identities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identities::Trivial => f.write_str("trivial"),
            Identities::Series => f.write_str("series"),
        }
    }
}

impl FromStr for Identities {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "trivial" => Ok(Identities::Trivial),
            "series" => Ok(Identities::Series),
            other => Err(ParseError::InvalidName {
                category: "identities",
                name: other.to_string(),
                position: 0,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_parse() {
        assert_eq!("series".parse(), Ok(Identities::Series));
        assert_eq!(Identities::default().to_string(), "trivial");
        assert!("associative".parse::<Identities>().is_err());
    }

    #[test]
    fn test_size() {
        let a: ExpressionRef<char, bool> = Arc::new(Expression::Atom('a'));
        let e = Expression::Prod(vec![a.clone(), Arc::new(Expression::Star(a))]);
        assert_eq!(e.size(), 4);
    }
}
