//! `lan<...>`: a label set extended with the identity label.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{LabelSet, ONE_TEXT};

/// Labels of `L`, plus the identity `\e` represented by `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct NullableSet<L> {
    inner: L,
}

impl<L: LabelSet> NullableSet<L> {
    /// Extend `inner` with `\e`.
    pub fn new(inner: L) -> Self {
        NullableSet { inner }
    }

    /// The underlying label set.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: LabelSet> ValueSet for NullableSet<L> {
    type Value = Option<L::Value>;

    fn sname() -> String {
        format!("lan<{}>", L::sname())
    }

    fn vname(&self) -> String {
        format!("lan<{}>", self.inner.vname())
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::NullableSet(inner) => Ok(NullableSet::new(L::from_ast(inner)?)),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    fn conv(&self, input: &str) -> Result<Self::Value, ParseError> {
        if input == ONE_TEXT {
            Ok(None)
        } else {
            self.inner.conv(input).map(Some)
        }
    }

    fn print(&self, v: &Self::Value) -> String {
        match v {
            None => ONE_TEXT.to_string(),
            Some(l) => self.inner.print(l),
        }
    }
}

impl<L: LabelSet> LabelSet for NullableSet<L> {
    type Stripped = L;
    type Nullable = Self;
    type Word = L::Word;

    fn has_one() -> bool {
        true
    }

    fn is_free() -> bool {
        false
    }

    fn one(&self) -> Option<Self::Value> {
        Some(None)
    }

    fn is_one(&self, v: &Self::Value) -> bool {
        v.is_none()
    }

    fn special(&self) -> Self::Value {
        Some(self.inner.special())
    }

    fn mul(&self, l: &Self::Value, r: &Self::Value) -> Option<Self::Value> {
        match (l, r) {
            (None, _) => Some(r.clone()),
            (_, None) => Some(l.clone()),
            (Some(l), Some(r)) => self.inner.mul(l, r).map(Some),
        }
    }

    fn generators(&self) -> Vec<Self::Value> {
        self.inner.generators().into_iter().map(Some).collect()
    }

    fn transpose(&self, v: &Self::Value) -> Self::Value {
        v.as_ref().map(|l| self.inner.transpose(l))
    }

    fn stripped(&self) -> L {
        self.inner.clone()
    }

    fn to_stripped(&self, v: &Self::Value) -> Option<L::Value> {
        v.clone()
    }

    fn nullable(&self) -> Self {
        self.clone()
    }

    fn to_nullable(&self, v: &Self::Value) -> Self::Value {
        v.clone()
    }

    fn word_labelset(&self) -> L::Word {
        self.inner.word_labelset()
    }

    fn to_word(&self, v: &Self::Value) -> <L::Word as ValueSet>::Value {
        match v {
            Some(l) => self.inner.to_word(l),
            None => self.inner.empty_word(),
        }
    }

    fn empty_word(&self) -> <L::Word as ValueSet>::Value {
        self.inner.empty_word()
    }
}
