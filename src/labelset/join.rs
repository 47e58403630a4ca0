//! Joins and value conversions between label sets.
//!
//! The lattice, for letters: `lal < lan < law`, and `lao < lan`. Alphabets
//! are merged by union. Tuples join tape by tape.

use crate::valueset::{convert_identity, Convert, Join};

use super::{CharAlphabet, LabelSet, LanChar, LetterSet, NullableSet, OneSet, TupleSet, WordSet};

macro_rules! join_by_alphabet {
    ($($l:ty, $r:ty => $out:ident);* $(;)?) => {
        $(
            impl Join<$r> for $l {
                type Output = $out;

                fn join(&self, rhs: &$r) -> $out {
                    $out::from_alphabet(self.alphabet().union(rhs.alphabet()))
                }
            }
        )*
    };
}

trait FromAlphabet {
    fn from_alphabet(alphabet: CharAlphabet) -> Self;
}

impl FromAlphabet for LetterSet {
    fn from_alphabet(alphabet: CharAlphabet) -> Self {
        LetterSet::new(alphabet)
    }
}

impl FromAlphabet for WordSet {
    fn from_alphabet(alphabet: CharAlphabet) -> Self {
        WordSet::new(alphabet)
    }
}

impl FromAlphabet for LanChar {
    fn from_alphabet(alphabet: CharAlphabet) -> Self {
        NullableSet::new(LetterSet::new(alphabet))
    }
}

trait HasAlphabet {
    fn alphabet(&self) -> &CharAlphabet;
}

impl HasAlphabet for LanChar {
    fn alphabet(&self) -> &CharAlphabet {
        self.inner().alphabet()
    }
}

join_by_alphabet! {
    LetterSet, LetterSet => LetterSet;
    LetterSet, LanChar => LanChar;
    LanChar, LetterSet => LanChar;
    LanChar, LanChar => LanChar;
    LetterSet, WordSet => WordSet;
    WordSet, LetterSet => WordSet;
    LanChar, WordSet => WordSet;
    WordSet, LanChar => WordSet;
    WordSet, WordSet => WordSet;
}

impl Join<OneSet> for OneSet {
    type Output = OneSet;

    fn join(&self, _rhs: &OneSet) -> OneSet {
        OneSet
    }
}

impl Join<OneSet> for LetterSet {
    type Output = LanChar;

    fn join(&self, _rhs: &OneSet) -> LanChar {
        self.nullable()
    }
}

impl Join<LetterSet> for OneSet {
    type Output = LanChar;

    fn join(&self, rhs: &LetterSet) -> LanChar {
        rhs.nullable()
    }
}

impl Join<OneSet> for LanChar {
    type Output = LanChar;

    fn join(&self, _rhs: &OneSet) -> LanChar {
        self.clone()
    }
}

impl Join<LanChar> for OneSet {
    type Output = LanChar;

    fn join(&self, rhs: &LanChar) -> LanChar {
        rhs.clone()
    }
}

impl Join<OneSet> for WordSet {
    type Output = WordSet;

    fn join(&self, _rhs: &OneSet) -> WordSet {
        self.clone()
    }
}

impl Join<WordSet> for OneSet {
    type Output = WordSet;

    fn join(&self, rhs: &WordSet) -> WordSet {
        rhs.clone()
    }
}

impl<A1, B1, A2, B2> Join<TupleSet<A2, B2>> for TupleSet<A1, B1>
where
    A1: LabelSet + Join<A2>,
    B1: LabelSet + Join<B2>,
    A2: LabelSet,
    B2: LabelSet,
    <A1 as Join<A2>>::Output: LabelSet,
    <B1 as Join<B2>>::Output: LabelSet,
{
    type Output = TupleSet<<A1 as Join<A2>>::Output, <B1 as Join<B2>>::Output>;

    fn join(&self, rhs: &TupleSet<A2, B2>) -> Self::Output {
        TupleSet::new(
            self.first().join(rhs.first()),
            self.second().join(rhs.second()),
        )
    }
}

convert_identity!(LetterSet, LanChar, WordSet, OneSet);

impl Convert<LetterSet> for LanChar {
    fn conv_from(&self, _from: &LetterSet, v: &char) -> Option<char> {
        Some(*v)
    }
}

impl Convert<OneSet> for LanChar {
    fn conv_from(&self, _from: &OneSet, _v: &()) -> Option<char> {
        None
    }
}

impl Convert<LetterSet> for WordSet {
    fn conv_from(&self, from: &LetterSet, v: &char) -> String {
        from.to_word(v)
    }
}

impl Convert<LanChar> for WordSet {
    fn conv_from(&self, from: &LanChar, v: &Option<char>) -> String {
        from.to_word(v)
    }
}

impl Convert<OneSet> for WordSet {
    fn conv_from(&self, _from: &OneSet, _v: &()) -> String {
        String::new()
    }
}

impl<A, B, A1, B1> Convert<TupleSet<A1, B1>> for TupleSet<A, B>
where
    A: LabelSet + Convert<A1>,
    B: LabelSet + Convert<B1>,
    A1: LabelSet,
    B1: LabelSet,
{
    fn conv_from(&self, from: &TupleSet<A1, B1>, v: &(A1::Value, B1::Value)) -> Self::Value {
        (
            self.first().conv_from(from.first(), &v.0),
            self.second().conv_from(from.second(), &v.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelset::LatChar;
    use crate::valueset::ValueSet;

    #[test]
    fn test_alphabets_merge() {
        let l = LetterSet::make("lal_char(ab)").unwrap();
        let n = LanChar::make("lan_char(bc)").unwrap();
        assert_eq!(l.join(&n).vname(), "lan<lal_char(abc)>");
        assert_eq!(n.join(&l).vname(), "lan<lal_char(abc)>");
        assert_eq!(l.join(&l).vname(), "lal_char(ab)");
    }

    #[test]
    fn test_words_absorb_letters() {
        let l = LetterSet::make("lal_char(a)").unwrap();
        let w = WordSet::make("law_char(z)").unwrap();
        assert_eq!(l.join(&w).vname(), "law_char(az)");
        assert_eq!(OneSet.join(&w).vname(), "law_char(z)");
    }

    #[test]
    fn test_oneset_adds_identity() {
        let l = LetterSet::make("lal_char(a)").unwrap();
        assert_eq!(OneSet.join(&l).vname(), "lan<lal_char(a)>");
    }

    #[test]
    fn test_convert() {
        let l = LetterSet::make("lal_char(ab)").unwrap();
        let n = l.nullable();
        let w = l.word_labelset();
        assert_eq!(n.conv_from(&l, &'a'), Some('a'));
        assert_eq!(w.conv_from(&n, &None), "");
        assert_eq!(w.conv_from(&l, &'b'), "b");
        assert_eq!(n.conv_from(&OneSet, &()), None);
    }

    #[test]
    fn test_tuples_join_per_tape() {
        let a = LatChar::make("lat<lan_char(a),lan_char(x)>").unwrap();
        let b = LatChar::make("lat<lan_char(b),lan_char(y)>").unwrap();
        let j = a.join(&b);
        assert_eq!(j.vname(), "lat<lan<lal_char(ab)>,lan<lal_char(xy)>>");
        assert_eq!(j.conv_from(&a, &(Some('a'), None)), (Some('a'), None));
    }
}
