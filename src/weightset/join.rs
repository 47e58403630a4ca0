//! Joins and conversions between scalar weight sets.
//!
//! The lattice is `b < z < q` and `b < zmin`; `z` and `zmin` have no join.

use crate::valueset::{convert_identity, Convert, Join};

use super::{Rational, B, Q, Z, ZMin};

macro_rules! join_to {
    ($($lhs:ty, $rhs:ty => $out:ty);* $(;)?) => {
        $(
            impl Join<$rhs> for $lhs {
                type Output = $out;

                fn join(&self, _rhs: &$rhs) -> $out {
                    <$out>::default()
                }
            }
        )*
    };
}

join_to! {
    B, B => B;
    Z, Z => Z;
    Q, Q => Q;
    ZMin, ZMin => ZMin;
    B, Z => Z;
    Z, B => Z;
    B, Q => Q;
    Q, B => Q;
    Z, Q => Q;
    Q, Z => Q;
    B, ZMin => ZMin;
    ZMin, B => ZMin;
}

convert_identity!(B, Z, Q, ZMin);

impl Convert<B> for Z {
    fn conv_from(&self, _from: &B, v: &bool) -> i64 {
        i64::from(*v)
    }
}

impl Convert<B> for Q {
    fn conv_from(&self, _from: &B, v: &bool) -> Rational {
        Rational::from(i64::from(*v))
    }
}

impl Convert<Z> for Q {
    fn conv_from(&self, _from: &Z, v: &i64) -> Rational {
        Rational::from(*v)
    }
}

impl Convert<B> for ZMin {
    fn conv_from(&self, _from: &B, v: &bool) -> i64 {
        if *v {
            0
        } else {
            ZMin::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weightset::WeightSet;

    #[test]
    fn test_join_is_least_upper_bound() {
        assert_eq!(B.join(&Z), Z);
        assert_eq!(Z.join(&B), Z);
        assert_eq!(Z.join(&Q), Q);
        assert_eq!(B.join(&ZMin), ZMin);
    }

    #[test]
    fn test_conversions_preserve_zero_and_one() {
        assert!(Z.is_zero(&Z.conv_from(&B, &false)));
        assert!(Z.is_one(&Z.conv_from(&B, &true)));
        assert!(Q.is_one(&Q.conv_from(&Z, &1)));
        assert!(ZMin.is_zero(&ZMin.conv_from(&B, &false)));
        assert!(ZMin.is_one(&ZMin.conv_from(&B, &true)));
    }
}
