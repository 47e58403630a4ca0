//! Finite sets of letters.

use std::collections::BTreeSet;
use std::fmt;

use crate::context::ParseError;

/// The letter reserved for the labels of initial and final transitions.
pub const SPECIAL_LETTER: char = '\u{FFFF}';

/// An ordered set of `char` letters.
///
/// Alphabets are written between parentheses in descriptors: `(abc)`.
/// `x-y` denotes the inclusive range of letters from `x` to `y`, and a
/// backslash quotes the next character (`(\-a)` is `-` and `a`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CharAlphabet {
    letters: BTreeSet<char>,
}

impl CharAlphabet {
    /// An empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the text between the parentheses of an alphabet literal.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidValue {
            valueset: "alphabet".to_string(),
            input: text.to_string(),
            reason: reason.to_string(),
        };
        let mut letters = BTreeSet::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            let first = if c == '\\' {
                chars.next().ok_or_else(|| invalid("dangling backslash"))?
            } else {
                c
            };
            if first == SPECIAL_LETTER {
                return Err(invalid("reserved letter"));
            }
            // A '-' followed by something makes a range; a trailing '-' is a letter.
            let mut lookahead = chars.clone();
            if lookahead.next() == Some('-') {
                if let Some(last) = lookahead.next() {
                    chars.next();
                    chars.next();
                    if last < first {
                        return Err(invalid("decreasing range"));
                    }
                    letters.extend((first..=last).filter(|c| *c != SPECIAL_LETTER));
                    continue;
                }
            }
            letters.insert(first);
        }
        Ok(CharAlphabet { letters })
    }

    /// Add a letter.
    pub fn insert(&mut self, letter: char) {
        self.letters.insert(letter);
    }

    /// Whether `letter` belongs to the alphabet.
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// The letters, in increasing order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the alphabet has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The union of two alphabets.
    pub fn union(&self, other: &CharAlphabet) -> CharAlphabet {
        CharAlphabet {
            letters: self.letters.union(&other.letters).copied().collect(),
        }
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharAlphabet {
            letters: iter.into_iter().filter(|c| *c != SPECIAL_LETTER).collect(),
        }
    }
}

/// Prints the letters between parentheses, quoting `\`, `(`, `)` and `-`.
impl fmt::Display for CharAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for c in &self.letters {
            if matches!(c, '\\' | '(' | ')' | '-') {
                f.write_str("\\")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str(")")
    }
}
