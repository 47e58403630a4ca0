//! The ring of integers.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{expect_weightset, OverflowError, StarError, WeightSet};

/// Integers with the usual `+` and `*`.
///
/// Only `0` is starrable (its star is `1`): any other value would need an
/// infinite sum. Values are `i64`: `add` and `mul` saturate at the bounds,
/// `checked_add` and `checked_mul` fail there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Z;

impl ValueSet for Z {
    type Value = i64;

    fn sname() -> String {
        "z".to_string()
    }

    fn vname(&self) -> String {
        Self::sname()
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        expect_weightset(node, "z").map(|_| Z)
    }

    fn conv(&self, input: &str) -> Result<i64, ParseError> {
        input.trim().parse().map_err(|e: std::num::ParseIntError| {
            ParseError::InvalidValue {
                valueset: self.vname(),
                input: input.to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn print(&self, v: &i64) -> String {
        v.to_string()
    }
}

impl WeightSet for Z {
    fn zero(&self) -> i64 {
        0
    }

    fn one(&self) -> i64 {
        1
    }

    fn add(&self, l: &i64, r: &i64) -> i64 {
        l.saturating_add(*r)
    }

    fn mul(&self, l: &i64, r: &i64) -> i64 {
        l.saturating_mul(*r)
    }

    fn checked_add(&self, l: &i64, r: &i64) -> Result<i64, OverflowError> {
        l.checked_add(*r)
            .ok_or_else(|| OverflowError::new(self, "add", l, r))
    }

    fn checked_mul(&self, l: &i64, r: &i64) -> Result<i64, OverflowError> {
        l.checked_mul(*r)
            .ok_or_else(|| OverflowError::new(self, "mul", l, r))
    }

    fn star(&self, v: &i64) -> Result<i64, StarError> {
        if *v == 0 {
            Ok(1)
        } else {
            Err(StarError::new(self, v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_only_zero() {
        assert_eq!(Z.star(&0), Ok(1));
        assert!(Z.star(&1).is_err());
        assert!(Z.star(&2).is_err());
        assert!(Z.star(&-1).is_err());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Z.add(&i64::MAX, &1), i64::MAX);
        assert_eq!(Z.mul(&i64::MAX, &-2), i64::MIN);
        assert_eq!(Z.checked_mul(&3, &-4), Ok(-12));
        let err = Z.checked_mul(&i64::MAX, &2).unwrap_err();
        assert_eq!(err.op, "mul");
        assert_eq!(err.to_string(), "z: mul: overflow: 9223372036854775807, 2");
        assert!(Z.checked_add(&i64::MIN, &-1).is_err());
    }

    #[test]
    fn test_conv() {
        assert_eq!(Z.conv("-42"), Ok(-42));
        assert_eq!(Z.conv(" 7 "), Ok(7));
        assert!(Z.conv("1/2").is_err());
    }
}
