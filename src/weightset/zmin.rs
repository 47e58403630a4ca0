//! The tropical (min, +) semiring over integers.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{expect_weightset, OverflowError, StarError, WeightSet};

/// Integers extended with `+oo`: `add` is `min`, `mul` is `+`.
///
/// The zero is `+oo` (so zero-weight transitions must never be stored) and
/// the one is `0`. Non-negative values are starrable, with star `0`.
/// Finite products saturate just below `+oo` in `mul` and fail in
/// `checked_mul`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ZMin;

impl ZMin {
    /// The representation of `+oo`.
    pub const INFINITY: i64 = i64::MAX;
}

impl ValueSet for ZMin {
    type Value = i64;

    fn sname() -> String {
        "zmin".to_string()
    }

    fn vname(&self) -> String {
        Self::sname()
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        expect_weightset(node, "zmin").map(|_| ZMin)
    }

    fn conv(&self, input: &str) -> Result<i64, ParseError> {
        match input.trim() {
            "oo" | "inf" => Ok(Self::INFINITY),
            text => text.parse().map_err(|e: std::num::ParseIntError| {
                ParseError::InvalidValue {
                    valueset: self.vname(),
                    input: input.to_string(),
                    reason: e.to_string(),
                }
            }),
        }
    }

    fn print(&self, v: &i64) -> String {
        if *v == Self::INFINITY {
            "oo".to_string()
        } else {
            v.to_string()
        }
    }
}

impl WeightSet for ZMin {
    fn zero(&self) -> i64 {
        Self::INFINITY
    }

    fn one(&self) -> i64 {
        0
    }

    fn add(&self, l: &i64, r: &i64) -> i64 {
        *l.min(r)
    }

    fn mul(&self, l: &i64, r: &i64) -> i64 {
        if *l == Self::INFINITY || *r == Self::INFINITY {
            Self::INFINITY
        } else {
            l.saturating_add(*r).min(Self::INFINITY - 1)
        }
    }

    fn checked_mul(&self, l: &i64, r: &i64) -> Result<i64, OverflowError> {
        if *l == Self::INFINITY || *r == Self::INFINITY {
            return Ok(Self::INFINITY);
        }
        match l.checked_add(*r) {
            Some(v) if v != Self::INFINITY => Ok(v),
            _ => Err(OverflowError::new(self, "mul", l, r)),
        }
    }

    fn star(&self, v: &i64) -> Result<i64, StarError> {
        if *v >= 0 {
            Ok(0)
        } else {
            Err(StarError::new(self, v))
        }
    }

    fn show_one(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinity_is_absorbing() {
        assert_eq!(ZMin.mul(&ZMin::INFINITY, &3), ZMin::INFINITY);
        assert_eq!(ZMin.add(&ZMin::INFINITY, &3), 3);
        assert!(ZMin.is_zero(&ZMin.zero()));
    }

    #[test]
    fn test_finite_overflow() {
        let big = ZMin::INFINITY - 1;
        assert_eq!(ZMin.mul(&big, &1), big);
        assert_eq!(ZMin.checked_mul(&big, &-1), Ok(big - 1));
        assert_eq!(ZMin.checked_mul(&ZMin::INFINITY, &5), Ok(ZMin::INFINITY));
        assert!(ZMin.checked_mul(&big, &1).is_err());
        assert!(ZMin.checked_mul(&i64::MIN, &-1).is_err());
    }

    #[test]
    fn test_star() {
        assert_eq!(ZMin.star(&5), Ok(0));
        assert_eq!(ZMin.star(&0), Ok(0));
        assert!(ZMin.star(&-1).is_err());
    }

    #[test]
    fn test_conv_print() {
        assert_eq!(ZMin.conv("oo"), Ok(ZMin::INFINITY));
        assert_eq!(ZMin.print(&ZMin::INFINITY), "oo");
        assert_eq!(ZMin.conv("-3"), Ok(-3));
    }
}
