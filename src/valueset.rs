//! The contract shared by label sets, weight sets, and the other sets of
//! values (expressions, polynomials).
//!
//! A value set is a small, immutable descriptor object: values are plain
//! data and every operation goes through the set, so that the same value
//! type can mean different things (an `i64` is an integer in `z` and a
//! distance in `zmin`).

use std::fmt;
use std::hash::Hash;

use crate::context::{AstNode, ContextParser, ParseError};

/// A set of values that can name itself and read/print its values.
pub trait ValueSet: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The type of the values of this set.
    type Value: Clone + fmt::Debug + Eq + Ord + Hash + Send + Sync + 'static;

    /// The static type name, with run-time parameters (alphabets) erased.
    ///
    /// This is the name used in dispatch signatures, e.g. `lal_char`.
    fn sname() -> String;

    /// The full descriptor of this instance, e.g. `lal_char(abc)`.
    fn vname(&self) -> String;

    /// Build an instance from a parsed descriptor.
    fn from_ast(node: &AstNode) -> Result<Self, ParseError>;

    /// Build an instance from a descriptor string.
    fn make(descriptor: &str) -> Result<Self, ParseError> {
        let ast = ContextParser::new(descriptor).parse()?;
        Self::from_ast(&ast)
    }

    /// Whether two values are equal.
    fn equal(&self, l: &Self::Value, r: &Self::Value) -> bool {
        l == r
    }

    /// Total order on values, for canonicalization and sorting.
    ///
    /// This is not a semiring operation.
    fn less(&self, l: &Self::Value, r: &Self::Value) -> bool {
        l < r
    }

    /// Read a value.
    fn conv(&self, input: &str) -> Result<Self::Value, ParseError>;

    /// Print a value.
    fn print(&self, v: &Self::Value) -> String;
}

/// The least general value set both `Self` and `Rhs` convert into.
///
/// `join(b, z) = z`, `join(lal_char(a), lan_char(b)) = lan_char(ab)`.
pub trait Join<Rhs: ?Sized> {
    /// The joined set.
    type Output;

    /// Compute the join of two instances.
    fn join(&self, rhs: &Rhs) -> Self::Output;
}

/// Conversion of values from another value set into this one.
pub trait Convert<From: ValueSet>: ValueSet {
    /// Convert `v`, a value of `from`, into a value of `self`.
    fn conv_from(&self, from: &From, v: &From::Value) -> Self::Value;
}

/// Implement `Convert<T> for T` as the identity.
macro_rules! convert_identity {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::valueset::Convert<$t> for $t {
                fn conv_from(
                    &self,
                    _from: &$t,
                    v: &<$t as $crate::valueset::ValueSet>::Value,
                ) -> <$t as $crate::valueset::ValueSet>::Value {
                    v.clone()
                }
            }
        )*
    };
}

pub(crate) use convert_identity;
