//! Recursive-descent parser for type descriptors.
//!
//! Grammar, informally:
//!
//! ```text
//! any        := automaton | context | labelset | weightset | other
//! automaton  := "mutable_automaton" "<" context ">"
//!             | unary-decorator "<" automaton ">"
//!             | ("product_automaton" | "tuple_automaton") "<" automaton ("," automaton)* ">"
//! context    := labelset ("_" | ",") weightset
//! labelset   := "lal_char" alphabet | "lan_char" alphabet | "lan" "<" labelset ">"
//!             | "law_char" alphabet | "lao" | "lat" "<" labelset ("," labelset)* ">"
//! weightset  := "b" | "z" | "q" | "zmin"
//!             | "ratexpset" "<" context ">" ["(" identities ")"]
//!             | "polynomialset" "<" context ">"
//! ```
//!
//! Identifiers end at `<`, `,`, `>`, `(` or `)`. There is no error recovery: the
//! first error aborts the parse.

use crate::expression::Identities;
use crate::weightset::WEIGHTSET_NAMES;

use super::ast::AstNode;
use super::error::{ParseError, Result};

/// Label set constructors, longest first so prefixes split correctly.
const LABELSET_KINDS: &[&str] = &["lal_char", "lan_char", "law_char", "lan", "lao", "lat"];

const UNARY_AUTOMATA: &[&str] = &[
    "determinized_automaton",
    "detweighted_automaton",
    "pair_automaton",
    "partition_automaton",
    "permutation_automaton",
    "ratexp_automaton",
    "transpose_automaton",
];

const VARIADIC_AUTOMATA: &[&str] = &["product_automaton", "tuple_automaton"];

fn is_automaton_kind(word: &str) -> bool {
    word == "mutable_automaton"
        || word == "blind_automaton"
        || UNARY_AUTOMATA.contains(&word)
        || VARIADIC_AUTOMATA.contains(&word)
}

/// Parser over one descriptor string.
///
/// # Example
///
/// ```rust,ignore
/// let ast = ContextParser::new("lal_char(ab)_b").parse()?;
/// assert_eq!(ast.sname(), "lal_char_b");
/// ```
#[derive(Debug)]
pub struct ContextParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ContextParser<'a> {
    /// Create a parser for `input`.
    pub fn new(input: &'a str) -> Self {
        ContextParser { input, pos: 0 }
    }

    /// Parse any descriptor: automaton, context, label set or weight set.
    pub fn parse(mut self) -> Result<AstNode> {
        let res = self.any()?;
        self.check_eof(&res)?;
        Ok(res)
    }

    /// Parse a context descriptor, e.g. `lal_char(ab)_b`.
    pub fn parse_context(mut self) -> Result<AstNode> {
        let res = self.context()?;
        self.check_eof(&res)?;
        Ok(res)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn check_eof(&mut self, res: &AstNode) -> Result<()> {
        self.skip_spaces();
        if self.pos < self.input.len() {
            return Err(ParseError::TrailingCharacters {
                parsed: res.vname(),
                trailing: self.input[self.pos..].to_string(),
            });
        }
        Ok(())
    }

    fn eat(&mut self, expected: char) -> Result<()> {
        self.skip_spaces();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            found => Err(ParseError::UnexpectedToken {
                expected,
                found: found.map_or("end of input".to_string(), |c| format!("'{}'", c)),
                position: self.pos,
            }),
        }
    }

    /// Read an identifier; returns its start position and text.
    fn word(&mut self) -> (usize, String) {
        self.skip_spaces();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '<' | ',' | '>' | '(' | ')') {
                break;
            }
            self.bump();
        }
        (start, self.input[start..self.pos].trim_end().to_string())
    }

    /// Read `(letters)`, verbatim, up to the matching parenthesis.
    fn alphabet(&mut self) -> Result<String> {
        if self.peek() != Some('(') {
            return Ok(String::new());
        }
        let open = self.pos;
        self.bump();
        let start = self.pos;
        let mut depth = 1;
        while let Some(c) = self.bump() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.input[start..self.pos - 1].to_string());
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::UnterminatedAlphabet { position: open })
    }

    /// Recognize a label set constructor at the head of `word`.
    ///
    /// `lao_b` is read as a single identifier; split it after `lao` and
    /// rewind so the separator is read next.
    fn labelset_kind(&mut self, start: usize, word: &str) -> Option<&'static str> {
        if let Some(kind) = LABELSET_KINDS.iter().find(|k| **k == word) {
            return Some(kind);
        }
        let kind = LABELSET_KINDS
            .iter()
            .find(|k| word.starts_with(**k) && word[k.len()..].starts_with('_'))?;
        self.pos = start + kind.len();
        Some(kind)
    }

    fn any(&mut self) -> Result<AstNode> {
        let (start, word) = self.word();
        if is_automaton_kind(&word) {
            return self.automaton_of(&word);
        }
        if let Some(kind) = self.labelset_kind(start, &word) {
            let ls = self.labelset_of(kind)?;
            self.skip_spaces();
            return match self.peek() {
                Some(',') | Some('_') => self.context_with(ls),
                _ => Ok(ls),
            };
        }
        if WEIGHTSET_NAMES.contains(&word.as_str())
            || matches!(word.as_str(), "ratexpset" | "seriesset" | "polynomialset")
        {
            return self.weightset_of(start, &word);
        }
        match word.as_str() {
            "" => Err(ParseError::InvalidName {
                category: "descriptor",
                name: word,
                position: start,
            }),
            "std::integral_constant" => {
                let mut text = word;
                self.eat('<')?;
                text.push('<');
                text.push_str(&self.word().1);
                self.eat(',')?;
                text.push(',');
                text.push_str(&self.word().1);
                self.eat('>')?;
                text.push('>');
                Ok(AstNode::Other(text))
            }
            _ => Ok(AstNode::Other(word)),
        }
    }

    fn context(&mut self) -> Result<AstNode> {
        let ls = self.labelset()?;
        self.context_with(ls)
    }

    fn context_with(&mut self, labelset: AstNode) -> Result<AstNode> {
        self.skip_spaces();
        match self.peek() {
            Some(',') | Some('_') => {
                self.bump();
            }
            found => {
                return Err(ParseError::UnexpectedToken {
                    expected: '_',
                    found: found.map_or("end of input".to_string(), |c| format!("'{}'", c)),
                    position: self.pos,
                })
            }
        }
        let weightset = self.weightset()?;
        Ok(AstNode::Context {
            labelset: Box::new(labelset),
            weightset: Box::new(weightset),
        })
    }

    fn labelset(&mut self) -> Result<AstNode> {
        let (start, word) = self.word();
        match self.labelset_kind(start, &word) {
            Some(kind) => self.labelset_of(kind),
            None => Err(ParseError::InvalidName {
                category: "labelset",
                name: word,
                position: start,
            }),
        }
    }

    fn labelset_of(&mut self, kind: &str) -> Result<AstNode> {
        match kind {
            "lal_char" => Ok(AstNode::LetterSet {
                alphabet: self.alphabet()?,
            }),
            "lan_char" => Ok(AstNode::NullableSet(Box::new(AstNode::LetterSet {
                alphabet: self.alphabet()?,
            }))),
            "lan" => {
                self.eat('<')?;
                let inner = self.labelset()?;
                self.eat('>')?;
                if inner.has_one() {
                    Ok(inner)
                } else {
                    Ok(AstNode::NullableSet(Box::new(inner)))
                }
            }
            "law_char" => Ok(AstNode::WordSet {
                alphabet: self.alphabet()?,
            }),
            "lao" => Ok(AstNode::OneSet),
            "lat" => {
                self.eat('<')?;
                let mut tapes = vec![self.labelset()?];
                self.skip_spaces();
                while self.peek() == Some(',') {
                    self.bump();
                    tapes.push(self.labelset()?);
                    self.skip_spaces();
                }
                self.eat('>')?;
                Ok(AstNode::TupleSet(tapes))
            }
            other => Err(ParseError::InvalidName {
                category: "labelset",
                name: other.to_string(),
                position: self.pos,
            }),
        }
    }

    fn weightset(&mut self) -> Result<AstNode> {
        let (start, word) = self.word();
        self.weightset_of(start, &word)
    }

    fn weightset_of(&mut self, start: usize, word: &str) -> Result<AstNode> {
        match word {
            w if WEIGHTSET_NAMES.contains(&w) => Ok(AstNode::WeightSet(w.to_string())),
            "ratexpset" => self.expressionset(None),
            "seriesset" => self.expressionset(Some(Identities::Series)),
            "polynomialset" => {
                self.eat('<')?;
                let context = self.context()?;
                self.eat('>')?;
                Ok(AstNode::PolynomialSet(Box::new(context)))
            }
            _ => Err(ParseError::InvalidName {
                category: "weightset",
                name: word.to_string(),
                position: start,
            }),
        }
    }

    fn expressionset(&mut self, identities: Option<Identities>) -> Result<AstNode> {
        self.eat('<')?;
        let context = self.context()?;
        self.eat('>')?;
        let identities = match identities {
            Some(ids) => ids,
            None if self.peek() == Some('(') => {
                self.bump();
                let (start, word) = self.word();
                self.eat(')')?;
                word.parse().map_err(|_| ParseError::InvalidName {
                    category: "identities",
                    name: word,
                    position: start,
                })?
            }
            None => Identities::Trivial,
        };
        Ok(AstNode::ExpressionSet {
            context: Box::new(context),
            identities,
        })
    }

    fn automaton(&mut self) -> Result<AstNode> {
        let (start, word) = self.word();
        if is_automaton_kind(&word) {
            self.automaton_of(&word)
        } else {
            Err(ParseError::InvalidName {
                category: "automaton",
                name: word,
                position: start,
            })
        }
    }

    fn automaton_of(&mut self, kind: &str) -> Result<AstNode> {
        self.eat('<')?;
        let mut args = Vec::new();
        if kind == "mutable_automaton" {
            args.push(self.context()?);
        } else if kind == "blind_automaton" {
            args.push(AstNode::Other(self.word().1));
            self.eat(',')?;
            args.push(self.automaton()?);
        } else if UNARY_AUTOMATA.contains(&kind) {
            args.push(self.automaton()?);
        } else {
            args.push(self.automaton()?);
            self.skip_spaces();
            while self.peek() == Some(',') {
                self.bump();
                args.push(self.automaton()?);
                self.skip_spaces();
            }
        }
        self.eat('>')?;
        Ok(AstNode::Automaton {
            kind: kind.to_string(),
            args,
        })
    }
}
