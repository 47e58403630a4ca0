//! Weight sets: the semirings automata are weighted over.
//!
//! A weight set provides `zero`, `one`, `add`, `mul` and a partial `star`
//! (the closure `1 + v + v^2 + ...`). Values outside the closure domain make
//! `star` fail with a [`StarError`] rather than approximate.
//!
//! Integer weight sets are bounded by `i64`. Their plain `add` and `mul`
//! saturate; algorithms that build new weights go through `checked_add`
//! and `checked_mul`, which report an [`OverflowError`] instead.

mod b;
mod join;
mod q;
mod z;
mod zmin;

pub use b::B;
pub use q::{Rational, Q};
pub use z::Z;
pub use zmin::ZMin;

use thiserror::Error;

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

/// The names of the scalar weight sets the descriptor parser recognizes.
pub const WEIGHTSET_NAMES: &[&str] = &["b", "z", "q", "zmin"];

/// A value has no star in its weight set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{weightset}: star: invalid value: {value}")]
pub struct StarError {
    /// The weight set the star was computed in.
    pub weightset: String,
    /// The offending value, printed.
    pub value: String,
}

impl StarError {
    /// Build the error for value `v` of `ws`.
    pub fn new<W: WeightSet>(ws: &W, v: &W::Value) -> Self {
        StarError {
            weightset: ws.vname(),
            value: ws.print(v),
        }
    }
}

/// An operation left the range of a bounded weight set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{weightset}: {op}: overflow: {lhs}, {rhs}")]
pub struct OverflowError {
    /// The weight set the operation was computed in.
    pub weightset: String,
    /// `add` or `mul`.
    pub op: &'static str,
    /// The left operand, printed.
    pub lhs: String,
    /// The right operand, printed.
    pub rhs: String,
}

impl OverflowError {
    /// Build the error for `op(l, r)` in `ws`.
    pub fn new<W: WeightSet>(ws: &W, op: &'static str, l: &W::Value, r: &W::Value) -> Self {
        OverflowError {
            weightset: ws.vname(),
            op,
            lhs: ws.print(l),
            rhs: ws.print(r),
        }
    }
}

/// A semiring.
pub trait WeightSet: ValueSet {
    /// The neutral element of `add`, absorbing for `mul`.
    fn zero(&self) -> Self::Value;

    /// The neutral element of `mul`.
    fn one(&self) -> Self::Value;

    /// Semiring addition.
    fn add(&self, l: &Self::Value, r: &Self::Value) -> Self::Value;

    /// Semiring multiplication.
    fn mul(&self, l: &Self::Value, r: &Self::Value) -> Self::Value;

    /// `add`, or an error when the sum is not representable.
    fn checked_add(&self, l: &Self::Value, r: &Self::Value) -> Result<Self::Value, OverflowError> {
        Ok(self.add(l, r))
    }

    /// `mul`, or an error when the product is not representable.
    fn checked_mul(&self, l: &Self::Value, r: &Self::Value) -> Result<Self::Value, OverflowError> {
        Ok(self.mul(l, r))
    }

    /// The star of `v`, when it exists.
    fn star(&self, v: &Self::Value) -> Result<Self::Value, StarError>;

    /// Whether `v` is the zero.
    fn is_zero(&self, v: &Self::Value) -> bool {
        *v == self.zero()
    }

    /// Whether `v` is the one.
    fn is_one(&self, v: &Self::Value) -> bool {
        *v == self.one()
    }

    /// Whether `mul` is commutative.
    fn is_commutative(&self) -> bool {
        true
    }

    /// Whether printers should show a weight equal to one.
    fn show_one(&self) -> bool {
        false
    }

    /// The mirror image of `v`, used by transposed automata.
    fn transpose(&self, v: &Self::Value) -> Self::Value {
        v.clone()
    }
}

/// Check that `node` is the scalar weight set `name`.
pub(crate) fn expect_weightset(node: &AstNode, name: &str) -> Result<(), ParseError> {
    match node {
        AstNode::WeightSet(found) if found == name => Ok(()),
        other => Err(ParseError::Mismatch {
            expected: name.to_string(),
            found: other.vname(),
        }),
    }
}

/// Fold `values` with `add`, starting from zero.
pub fn sum_of<W: WeightSet>(ws: &W, values: impl IntoIterator<Item = W::Value>) -> W::Value {
    values
        .into_iter()
        .fold(ws.zero(), |acc, v| ws.add(&acc, &v))
}

/// Fold `values` with `checked_add`, starting from zero.
pub fn checked_sum_of<W: WeightSet>(
    ws: &W,
    values: impl IntoIterator<Item = W::Value>,
) -> Result<W::Value, OverflowError> {
    values
        .into_iter()
        .try_fold(ws.zero(), |acc, v| ws.checked_add(&acc, &v))
}
