//! The field of rationals.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{expect_weightset, StarError, WeightSet};

/// An exact fraction, kept reduced with a positive denominator.
///
/// Numerator and denominator are arbitrary precision, so sums and products
/// never overflow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Rational(BigRational);

impl Rational {
    /// Build `num/den`, reduced.
    ///
    /// # Panics
    ///
    /// If `den` is zero.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "rational with a zero denominator");
        Rational(BigRational::new(num.into(), den.into()))
    }

    /// The numerator.
    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    /// The (positive) denominator.
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational(BigRational::from_integer(n.into()))
    }
}

impl From<BigRational> for Rational {
    fn from(r: BigRational) -> Self {
        Rational(r)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

/// Rationals with the usual `+` and `*`.
///
/// `star(v) = 1/(1-v)`, defined when `|v| < 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Q;

impl ValueSet for Q {
    type Value = Rational;

    fn sname() -> String {
        "q".to_string()
    }

    fn vname(&self) -> String {
        Self::sname()
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        expect_weightset(node, "q").map(|_| Q)
    }

    fn conv(&self, input: &str) -> Result<Rational, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidValue {
            valueset: self.vname(),
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let text = input.trim();
        let (num, den) = match text.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (text, "1"),
        };
        let num: BigInt = num.parse().map_err(|_| invalid("invalid numerator"))?;
        let den: BigInt = den.parse().map_err(|_| invalid("invalid denominator"))?;
        if den.is_zero() {
            return Err(invalid("zero denominator"));
        }
        Ok(Rational(BigRational::new(num, den)))
    }

    fn print(&self, v: &Rational) -> String {
        v.to_string()
    }
}

impl WeightSet for Q {
    fn zero(&self) -> Rational {
        Rational(BigRational::zero())
    }

    fn one(&self) -> Rational {
        Rational(BigRational::one())
    }

    fn add(&self, l: &Rational, r: &Rational) -> Rational {
        Rational(&l.0 + &r.0)
    }

    fn mul(&self, l: &Rational, r: &Rational) -> Rational {
        Rational(&l.0 * &r.0)
    }

    fn star(&self, v: &Rational) -> Result<Rational, StarError> {
        if v.0.abs() < BigRational::one() {
            Ok(Rational((BigRational::one() - &v.0).recip()))
        } else {
            Err(StarError::new(self, v))
        }
    }

    fn is_zero(&self, v: &Rational) -> bool {
        v.0.is_zero()
    }

    fn is_one(&self, v: &Rational) -> bool {
        v.0.is_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(Rational::new(2, 4), Rational::new(1, 2));
        assert_eq!(Rational::new(1, -2), Rational::new(-1, 2));
        assert_eq!(Rational::new(0, 5), Rational::from(0));
        assert_eq!(*Rational::new(3, -6).denom(), BigInt::from(2));
    }

    #[test]
    fn test_star() {
        assert_eq!(Q.star(&Rational::new(1, 2)), Ok(Rational::from(2)));
        assert_eq!(Q.star(&Rational::new(-1, 2)), Ok(Rational::new(2, 3)));
        assert!(Q.star(&Rational::from(1)).is_err());
        assert!(Q.star(&Rational::new(3, 2)).is_err());
    }

    #[test]
    fn test_conv_print() {
        assert_eq!(Q.conv("3/6"), Ok(Rational::new(1, 2)));
        assert_eq!(Q.print(&Rational::new(4, 2)), "2");
        assert_eq!(Q.print(&Rational::new(-1, 3)), "-1/3");
        assert!(Q.conv("1/0").is_err());
        assert!(Q.conv("x").is_err());
    }

    #[test]
    fn test_extreme_denominators() {
        let v = Q.conv("1/-9223372036854775808").unwrap();
        assert_eq!(Q.print(&v), "-1/9223372036854775808");
        let w = Q.conv("-9223372036854775808/-1").unwrap();
        assert_eq!(Q.print(&w), "9223372036854775808");
        assert_eq!(Q.print(&Q.mul(&v, &w)), "-1");
    }

    #[test]
    fn test_no_overflow() {
        let big = Rational::from(i64::MAX);
        let sum = Q.add(&big, &big);
        assert_eq!(Q.print(&sum), "18446744073709551614");
        let tiny = Rational::new(1, i64::MAX);
        let prod = Q.mul(&tiny, &tiny);
        assert_eq!(
            Q.print(&prod),
            "1/85070591730234615847396907784232501249"
        );
        assert!(Q.less(&prod, &tiny));
    }

    #[test]
    fn test_order() {
        assert!(Q.less(&Rational::new(1, 3), &Rational::new(1, 2)));
        assert!(Q.less(&Rational::new(-1, 2), &Rational::from(0)));
    }
}
