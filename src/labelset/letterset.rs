//! `lal_char`: labels are single letters.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{CharAlphabet, LabelSet, NullableSet, WordSet, SPECIAL_LETTER};

/// Labels are letters of an alphabet; there is no identity label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct LetterSet {
    alphabet: CharAlphabet,
}

impl LetterSet {
    /// A letter set over `alphabet`.
    pub fn new(alphabet: CharAlphabet) -> Self {
        LetterSet { alphabet }
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// Whether `c` is a letter of this set.
    pub fn has(&self, c: char) -> bool {
        self.alphabet.contains(c)
    }

    pub(crate) fn print_letter(c: char) -> String {
        if c == SPECIAL_LETTER {
            "$".to_string()
        } else {
            c.to_string()
        }
    }
}

impl ValueSet for LetterSet {
    type Value = char;

    fn sname() -> String {
        "lal_char".to_string()
    }

    fn vname(&self) -> String {
        format!("lal_char{}", self.alphabet)
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::LetterSet { alphabet } => Ok(LetterSet::new(CharAlphabet::parse(alphabet)?)),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    fn conv(&self, input: &str) -> Result<char, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidValue {
            valueset: self.vname(),
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if self.has(c) => Ok(c),
            (Some(_), None) => Err(invalid("not in the alphabet")),
            _ => Err(invalid("expected a single letter")),
        }
    }

    fn print(&self, v: &char) -> String {
        Self::print_letter(*v)
    }
}

impl LabelSet for LetterSet {
    type Stripped = LetterSet;
    type Nullable = NullableSet<LetterSet>;
    type Word = WordSet;

    fn has_one() -> bool {
        false
    }

    fn is_free() -> bool {
        true
    }

    fn one(&self) -> Option<char> {
        None
    }

    fn special(&self) -> char {
        SPECIAL_LETTER
    }

    fn mul(&self, _l: &char, _r: &char) -> Option<char> {
        None
    }

    fn generators(&self) -> Vec<char> {
        self.alphabet.letters().collect()
    }

    fn stripped(&self) -> LetterSet {
        self.clone()
    }

    fn to_stripped(&self, v: &char) -> Option<char> {
        Some(*v)
    }

    fn nullable(&self) -> NullableSet<LetterSet> {
        NullableSet::new(self.clone())
    }

    fn to_nullable(&self, v: &char) -> Option<char> {
        Some(*v)
    }

    fn word_labelset(&self) -> WordSet {
        WordSet::new(self.alphabet.clone())
    }

    fn to_word(&self, v: &char) -> String {
        v.to_string()
    }

    fn empty_word(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> LetterSet {
        LetterSet::make("lal_char(ab)").unwrap()
    }

    #[test]
    fn test_names() {
        assert_eq!(ab().vname(), "lal_char(ab)");
        assert_eq!(LetterSet::sname(), "lal_char");
    }

    #[test]
    fn test_conv() {
        assert_eq!(ab().conv("a"), Ok('a'));
        assert!(ab().conv("c").is_err());
        assert!(ab().conv("ab").is_err());
        assert!(ab().conv("").is_err());
        assert!(ab().conv("\\e").is_err());
    }

    #[test]
    fn test_special_prints_as_dollar() {
        assert_eq!(ab().print(&ab().special()), "$");
    }

    #[test]
    fn test_derived_sets() {
        let ls = ab();
        assert_eq!(ls.nullable().vname(), "lan<lal_char(ab)>");
        assert_eq!(ls.word_labelset().vname(), "law_char(ab)");
        assert_eq!(ls.to_word(&'b'), "b");
    }
}
