//! `law_char`: labels are words.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{CharAlphabet, LabelSet, LetterSet, ONE_TEXT, SPECIAL_LETTER};

/// Labels are words over an alphabet; the identity is the empty word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WordSet {
    alphabet: CharAlphabet,
}

impl WordSet {
    /// A word set over `alphabet`.
    pub fn new(alphabet: CharAlphabet) -> Self {
        WordSet { alphabet }
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// Bracket `w` with the special letter on both ends.
    pub fn delimit(&self, w: &str) -> String {
        let mut res = String::with_capacity(w.len() + 6);
        res.push(SPECIAL_LETTER);
        res.push_str(w);
        res.push(SPECIAL_LETTER);
        res
    }

    /// Remove the brackets added by [`delimit`](Self::delimit), if present.
    pub fn undelimit(&self, w: &str) -> String {
        let w = w.strip_prefix(SPECIAL_LETTER).unwrap_or(w);
        let w = w.strip_suffix(SPECIAL_LETTER).unwrap_or(w);
        w.to_string()
    }
}

impl ValueSet for WordSet {
    type Value = String;

    fn sname() -> String {
        "law_char".to_string()
    }

    fn vname(&self) -> String {
        format!("law_char{}", self.alphabet)
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::WordSet { alphabet } => Ok(WordSet::new(CharAlphabet::parse(alphabet)?)),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    fn conv(&self, input: &str) -> Result<String, ParseError> {
        if input == ONE_TEXT {
            return Ok(String::new());
        }
        match input.chars().find(|c| !self.alphabet.contains(*c)) {
            Some(c) => Err(ParseError::InvalidValue {
                valueset: self.vname(),
                input: input.to_string(),
                reason: format!("letter '{}' not in the alphabet", c),
            }),
            None => Ok(input.to_string()),
        }
    }

    fn print(&self, v: &String) -> String {
        if v.is_empty() {
            ONE_TEXT.to_string()
        } else {
            v.chars().map(LetterSet::print_letter).collect()
        }
    }
}

impl LabelSet for WordSet {
    type Stripped = WordSet;
    type Nullable = WordSet;
    type Word = WordSet;

    fn has_one() -> bool {
        true
    }

    fn is_free() -> bool {
        false
    }

    fn one(&self) -> Option<String> {
        Some(String::new())
    }

    fn is_one(&self, v: &String) -> bool {
        v.is_empty()
    }

    fn special(&self) -> String {
        SPECIAL_LETTER.to_string()
    }

    fn mul(&self, l: &String, r: &String) -> Option<String> {
        let mut res = String::with_capacity(l.len() + r.len());
        res.push_str(l);
        res.push_str(r);
        Some(res)
    }

    fn generators(&self) -> Vec<String> {
        self.alphabet.letters().map(String::from).collect()
    }

    fn transpose(&self, v: &String) -> String {
        v.chars().rev().collect()
    }

    fn stripped(&self) -> WordSet {
        self.clone()
    }

    fn to_stripped(&self, v: &String) -> Option<String> {
        if v.is_empty() {
            None
        } else {
            Some(v.clone())
        }
    }

    fn nullable(&self) -> WordSet {
        self.clone()
    }

    fn to_nullable(&self, v: &String) -> String {
        v.clone()
    }

    fn word_labelset(&self) -> WordSet {
        self.clone()
    }

    fn to_word(&self, v: &String) -> String {
        v.clone()
    }

    fn empty_word(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> WordSet {
        WordSet::make("law_char(ab)").unwrap()
    }

    #[test]
    fn test_conv_print() {
        let ws = ab();
        assert_eq!(ws.conv("abba"), Ok("abba".to_string()));
        assert_eq!(ws.conv("\\e"), Ok(String::new()));
        assert!(ws.conv("abc").is_err());
        assert_eq!(ws.print(&String::new()), "\\e");
        assert_eq!(ws.print(&"ab".to_string()), "ab");
    }

    #[test]
    fn test_mul_and_transpose() {
        let ws = ab();
        assert_eq!(ws.mul(&"ab".into(), &"b".into()), Some("abb".to_string()));
        assert_eq!(ws.transpose(&"aab".to_string()), "baa");
        assert!(ws.is_one(&ws.mul(&String::new(), &String::new()).unwrap()));
    }

    #[test]
    fn test_delimit() {
        let ws = ab();
        let d = ws.delimit("ab");
        assert_eq!(ws.print(&d), "$ab$");
        assert_eq!(ws.undelimit(&d), "ab");
        assert_eq!(ws.undelimit("ab"), "ab");
        assert_eq!(ws.undelimit(&ws.delimit("")), "");
    }
}
