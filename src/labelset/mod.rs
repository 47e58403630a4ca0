//! Label sets: the models of transition labels.
//!
//! | descriptor   | type                         | labels                 |
//! |--------------|------------------------------|------------------------|
//! | `lal_char`   | [`LetterSet`]                | letters                |
//! | `lan<...>`   | [`NullableSet`]              | letters or `\e`        |
//! | `law_char`   | [`WordSet`]                  | words, `\e` is empty   |
//! | `lao`        | [`OneSet`]                   | only `\e`              |
//! | `lat<a,b>`   | [`TupleSet`]                 | pairs `x|y`            |
//!
//! Each label set also names three related label sets, used as the output
//! types of algorithms: the *stripped* set (labels left once spontaneous
//! transitions are gone), the *nullable* set (labels plus `\e`), and the
//! *word* set (labels concatenated along a path).

mod alphabet;
mod join;
mod letterset;
mod nullableset;
mod oneset;
mod tupleset;
mod wordset;

pub use alphabet::{CharAlphabet, SPECIAL_LETTER};
pub use letterset::LetterSet;
pub use nullableset::NullableSet;
pub use oneset::OneSet;
pub use tupleset::TupleSet;
pub use wordset::WordSet;

use crate::valueset::ValueSet;

/// `lal_char`.
pub type LalChar = LetterSet;

/// `lan_char`, i.e. `lan<lal_char>`.
pub type LanChar = NullableSet<LetterSet>;

/// `law_char`.
pub type LawChar = WordSet;

/// `lao`.
pub type Lao = OneSet;

/// `lat<lan_char,lan_char>`: two-tape labels.
pub type LatChar = TupleSet<LanChar, LanChar>;

/// The printed form of the identity label.
pub const ONE_TEXT: &str = "\\e";

/// A set of labels.
pub trait LabelSet: ValueSet {
    /// The labels that remain once spontaneous transitions are removed.
    type Stripped: LabelSet;

    /// This label set extended with an identity label.
    type Nullable: LabelSet;

    /// The words over this label set.
    type Word: LabelSet;

    /// Whether the set has an identity label.
    fn has_one() -> bool;

    /// Whether labels are exactly the generators (no words, no identity).
    fn is_free() -> bool;

    /// The identity label, when there is one.
    fn one(&self) -> Option<Self::Value>;

    /// Whether `v` is the identity label.
    fn is_one(&self, v: &Self::Value) -> bool {
        self.one().as_ref() == Some(v)
    }

    /// The label of the transitions from `pre` and to `post`.
    fn special(&self) -> Self::Value;

    /// Whether `v` is the special label.
    fn is_special(&self, v: &Self::Value) -> bool {
        *v == self.special()
    }

    /// Concatenation, when the result is a label of this set.
    fn mul(&self, l: &Self::Value, r: &Self::Value) -> Option<Self::Value>;

    /// The generators, in increasing order.
    fn generators(&self) -> Vec<Self::Value>;

    /// The mirror image of `v`.
    fn transpose(&self, v: &Self::Value) -> Self::Value {
        v.clone()
    }

    /// The stripped label set.
    fn stripped(&self) -> Self::Stripped;

    /// Convert a label to the stripped set; `None` for the identity.
    fn to_stripped(&self, v: &Self::Value) -> Option<<Self::Stripped as ValueSet>::Value>;

    /// The nullable label set.
    fn nullable(&self) -> Self::Nullable;

    /// Convert a label to the nullable set.
    fn to_nullable(&self, v: &Self::Value) -> <Self::Nullable as ValueSet>::Value;

    /// The word label set.
    fn word_labelset(&self) -> Self::Word;

    /// Convert a label to a word.
    fn to_word(&self, v: &Self::Value) -> <Self::Word as ValueSet>::Value;

    /// The empty word of the word label set.
    fn empty_word(&self) -> <Self::Word as ValueSet>::Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_special_is_stable<L: LabelSet>(ls: &L) {
        assert!(ls.is_special(&ls.special()));
        assert_eq!(ls.transpose(&ls.special()), ls.special());
        if ls.one() != Some(ls.special()) {
            assert!(!ls.is_one(&ls.special()));
        }
    }

    #[test]
    fn test_special_labels() {
        check_special_is_stable(&LetterSet::make("lal_char(ab)").unwrap());
        check_special_is_stable(&LanChar::make("lan_char(ab)").unwrap());
        check_special_is_stable(&WordSet::make("law_char(ab)").unwrap());
        check_special_is_stable(&OneSet);
        check_special_is_stable(&LatChar::make("lat<lan_char(a),lan_char(x)>").unwrap());
    }

    #[test]
    fn test_has_one() {
        assert!(!LalChar::has_one());
        assert!(LanChar::has_one());
        assert!(LawChar::has_one());
        assert!(Lao::has_one());
        assert!(LatChar::has_one());
        assert!(!TupleSet::<LetterSet, LanChar>::has_one());
    }
}
