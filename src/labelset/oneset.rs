//! `lao`: the only label is the identity.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{LabelSet, ONE_TEXT};

/// A label set with a single label, `\e`.
///
/// Automata over `lao` are weighted graphs: every transition is
/// spontaneous. They are the natural support of state elimination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct OneSet;

impl ValueSet for OneSet {
    type Value = ();

    fn sname() -> String {
        "lao".to_string()
    }

    fn vname(&self) -> String {
        Self::sname()
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::OneSet => Ok(OneSet),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    fn conv(&self, input: &str) -> Result<(), ParseError> {
        if input.is_empty() || input == ONE_TEXT {
            Ok(())
        } else {
            Err(ParseError::InvalidValue {
                valueset: self.vname(),
                input: input.to_string(),
                reason: "the only label is \\e".to_string(),
            })
        }
    }

    fn print(&self, _v: &()) -> String {
        ONE_TEXT.to_string()
    }
}

impl LabelSet for OneSet {
    type Stripped = OneSet;
    type Nullable = OneSet;
    type Word = OneSet;

    fn has_one() -> bool {
        true
    }

    fn is_free() -> bool {
        false
    }

    fn one(&self) -> Option<()> {
        Some(())
    }

    fn special(&self) {}

    fn mul(&self, _l: &(), _r: &()) -> Option<()> {
        Some(())
    }

    fn generators(&self) -> Vec<()> {
        Vec::new()
    }

    fn stripped(&self) -> OneSet {
        OneSet
    }

    fn to_stripped(&self, _v: &()) -> Option<()> {
        None
    }

    fn nullable(&self) -> OneSet {
        OneSet
    }

    fn to_nullable(&self, _v: &()) {}

    fn word_labelset(&self) -> OneSet {
        OneSet
    }

    fn to_word(&self, _v: &()) {}

    fn empty_word(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_is_one() {
        assert_eq!(OneSet::make("lao"), Ok(OneSet));
        assert!(OneSet.is_one(&()));
        assert!(OneSet.is_special(&()));
        assert_eq!(OneSet.conv("\\e"), Ok(()));
        assert!(OneSet.conv("a").is_err());
        assert!(OneSet.generators().is_empty());
    }
}
