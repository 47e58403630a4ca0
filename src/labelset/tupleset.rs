//! `lat<...>`: multi-tape labels.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::LabelSet;

/// Pairs of labels, one per tape, printed `x|y`.
///
/// The tuple has an identity only when every tape does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TupleSet<A, B> {
    first: A,
    second: B,
}

impl<A: LabelSet, B: LabelSet> TupleSet<A, B> {
    /// The two-tape label set `lat<first,second>`.
    pub fn new(first: A, second: B) -> Self {
        TupleSet { first, second }
    }

    /// The first tape.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second tape.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A: LabelSet, B: LabelSet> ValueSet for TupleSet<A, B> {
    type Value = (A::Value, B::Value);

    fn sname() -> String {
        format!("lat<{},{}>", A::sname(), B::sname())
    }

    fn vname(&self) -> String {
        format!("lat<{},{}>", self.first.vname(), self.second.vname())
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::TupleSet(tapes) if tapes.len() == 2 => Ok(TupleSet::new(
                A::from_ast(&tapes[0])?,
                B::from_ast(&tapes[1])?,
            )),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    fn conv(&self, input: &str) -> Result<Self::Value, ParseError> {
        match input.split_once('|') {
            Some((l, r)) => Ok((self.first.conv(l)?, self.second.conv(r)?)),
            None => Err(ParseError::InvalidValue {
                valueset: self.vname(),
                input: input.to_string(),
                reason: "expected 'first|second'".to_string(),
            }),
        }
    }

    fn print(&self, v: &Self::Value) -> String {
        format!("{}|{}", self.first.print(&v.0), self.second.print(&v.1))
    }
}

impl<A: LabelSet, B: LabelSet> LabelSet for TupleSet<A, B> {
    type Stripped = Self;
    type Nullable = TupleSet<A::Nullable, B::Nullable>;
    type Word = TupleSet<A::Word, B::Word>;

    fn has_one() -> bool {
        A::has_one() && B::has_one()
    }

    fn is_free() -> bool {
        A::is_free() && B::is_free()
    }

    fn one(&self) -> Option<Self::Value> {
        Some((self.first.one()?, self.second.one()?))
    }

    fn special(&self) -> Self::Value {
        (self.first.special(), self.second.special())
    }

    fn mul(&self, l: &Self::Value, r: &Self::Value) -> Option<Self::Value> {
        Some((self.first.mul(&l.0, &r.0)?, self.second.mul(&l.1, &r.1)?))
    }

    fn generators(&self) -> Vec<Self::Value> {
        let seconds = self.second.generators();
        self.first
            .generators()
            .into_iter()
            .flat_map(|a| seconds.iter().map(move |b| (a.clone(), b.clone())))
            .collect()
    }

    fn transpose(&self, v: &Self::Value) -> Self::Value {
        (self.first.transpose(&v.0), self.second.transpose(&v.1))
    }

    fn stripped(&self) -> Self {
        self.clone()
    }

    fn to_stripped(&self, v: &Self::Value) -> Option<Self::Value> {
        if self.is_one(v) {
            None
        } else {
            Some(v.clone())
        }
    }

    fn nullable(&self) -> Self::Nullable {
        TupleSet::new(self.first.nullable(), self.second.nullable())
    }

    fn to_nullable(&self, v: &Self::Value) -> <Self::Nullable as ValueSet>::Value {
        (self.first.to_nullable(&v.0), self.second.to_nullable(&v.1))
    }

    fn word_labelset(&self) -> Self::Word {
        TupleSet::new(self.first.word_labelset(), self.second.word_labelset())
    }

    fn to_word(&self, v: &Self::Value) -> <Self::Word as ValueSet>::Value {
        (self.first.to_word(&v.0), self.second.to_word(&v.1))
    }

    fn empty_word(&self) -> <Self::Word as ValueSet>::Value {
        (self.first.empty_word(), self.second.empty_word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelset::{LatChar, LetterSet};

    fn ax() -> LatChar {
        LatChar::make("lat<lan_char(ab),lan_char(xy)>").unwrap()
    }

    #[test]
    fn test_names() {
        assert_eq!(ax().vname(), "lat<lan<lal_char(ab)>,lan<lal_char(xy)>>");
        assert_eq!(LatChar::sname(), "lat<lan<lal_char>,lan<lal_char>>");
    }

    #[test]
    fn test_conv_print() {
        let ls = ax();
        assert_eq!(ls.conv("a|\\e"), Ok((Some('a'), None)));
        assert_eq!(ls.print(&(None, Some('y'))), "\\e|y");
        assert!(ls.conv("a").is_err());
        assert!(ls.conv("x|a").is_err());
    }

    #[test]
    fn test_one_needs_every_tape() {
        assert_eq!(ax().one(), Some((None, None)));
        let mixed = TupleSet::new(
            LetterSet::make("lal_char(a)").unwrap(),
            ax().second().clone(),
        );
        assert_eq!(mixed.one(), None);
    }

    #[test]
    fn test_generators_are_pairs() {
        let gens = ax().generators();
        assert_eq!(gens.len(), 4);
        assert_eq!(gens[0], (Some('a'), Some('x')));
    }
}
