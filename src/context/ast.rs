//! Abstract syntax of type descriptors.
//!
//! A descriptor such as `mutable_automaton<lal_char(ab)_b>` parses to a tree
//! of constructors. The tree prints back two ways: [`AstNode::vname`] gives
//! the full descriptor, [`AstNode::sname`] erases run-time parameters
//! (alphabets, identities) and gives the name used to select a static
//! instantiation.

use std::fmt;

use crate::expression::Identities;

/// A node of a parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum AstNode {
    /// `kind<args...>`, e.g. `mutable_automaton<ctx>`.
    Automaton {
        /// The automaton constructor.
        kind: String,
        /// Its arguments: a context or automata.
        args: Vec<AstNode>,
    },
    /// A label set paired with a weight set.
    Context {
        /// The label set.
        labelset: Box<AstNode>,
        /// The weight set.
        weightset: Box<AstNode>,
    },
    /// `lal_char(letters)`.
    LetterSet {
        /// The letters, verbatim.
        alphabet: String,
    },
    /// `lan<labelset>`, or `lan_char(letters)`.
    NullableSet(Box<AstNode>),
    /// `law_char(letters)`.
    WordSet {
        /// The letters, verbatim.
        alphabet: String,
    },
    /// `lao`.
    OneSet,
    /// `lat<labelset, ...>`.
    TupleSet(Vec<AstNode>),
    /// A scalar weight set: `b`, `z`, `q`, `zmin`.
    WeightSet(String),
    /// `ratexpset<context>(identities)`.
    ExpressionSet {
        /// The context of the expressions.
        context: Box<AstNode>,
        /// The identities, `trivial` when not printed.
        identities: Identities,
    },
    /// `polynomialset<context>`.
    PolynomialSet(Box<AstNode>),
    /// A fragment the parser need not interpret, kept verbatim.
    Other(String),
}

impl AstNode {
    /// The full descriptor.
    pub fn vname(&self) -> String {
        self.name(true)
    }

    /// The type name, with alphabets and identities erased.
    pub fn sname(&self) -> String {
        self.name(false)
    }

    /// Whether this label set has an identity label.
    pub fn has_one(&self) -> bool {
        match self {
            AstNode::NullableSet(_) | AstNode::WordSet { .. } | AstNode::OneSet => true,
            AstNode::TupleSet(tapes) => tapes.iter().all(AstNode::has_one),
            AstNode::ExpressionSet { .. } => true,
            _ => false,
        }
    }

    fn name(&self, full: bool) -> String {
        let join = |nodes: &[AstNode]| {
            nodes
                .iter()
                .map(|n| n.name(full))
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            AstNode::Automaton { kind, args } => format!("{}<{}>", kind, join(args)),
            AstNode::Context {
                labelset,
                weightset,
            } => format!("{}_{}", labelset.name(full), weightset.name(full)),
            AstNode::LetterSet { alphabet } if full => format!("lal_char({})", alphabet),
            AstNode::LetterSet { .. } => "lal_char".to_string(),
            AstNode::NullableSet(inner) => format!("lan<{}>", inner.name(full)),
            AstNode::WordSet { alphabet } if full => format!("law_char({})", alphabet),
            AstNode::WordSet { .. } => "law_char".to_string(),
            AstNode::OneSet => "lao".to_string(),
            AstNode::TupleSet(tapes) => format!("lat<{}>", join(tapes)),
            AstNode::WeightSet(name) => name.clone(),
            AstNode::ExpressionSet {
                context,
                identities,
            } => {
                if full && *identities != Identities::Trivial {
                    format!("ratexpset<{}>({})", context.name(full), identities)
                } else {
                    format!("ratexpset<{}>", context.name(full))
                }
            }
            AstNode::PolynomialSet(context) => format!("polynomialset<{}>", context.name(full)),
            AstNode::Other(text) => text.clone(),
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vname())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lal(alphabet: &str) -> AstNode {
        AstNode::LetterSet {
            alphabet: alphabet.to_string(),
        }
    }

    #[test]
    fn test_names_erase_alphabets() {
        let ctx = AstNode::Context {
            labelset: Box::new(lal("ab")),
            weightset: Box::new(AstNode::WeightSet("b".to_string())),
        };
        assert_eq!(ctx.vname(), "lal_char(ab)_b");
        assert_eq!(ctx.sname(), "lal_char_b");

        let aut = AstNode::Automaton {
            kind: "mutable_automaton".to_string(),
            args: vec![ctx],
        };
        assert_eq!(aut.vname(), "mutable_automaton<lal_char(ab)_b>");
        assert_eq!(aut.sname(), "mutable_automaton<lal_char_b>");
    }

    #[test]
    fn test_identities_only_in_full_name() {
        let node = AstNode::ExpressionSet {
            context: Box::new(AstNode::Context {
                labelset: Box::new(lal("x")),
                weightset: Box::new(AstNode::WeightSet("z".to_string())),
            }),
            identities: Identities::Series,
        };
        assert_eq!(node.vname(), "ratexpset<lal_char(x)_z>(series)");
        assert_eq!(node.sname(), "ratexpset<lal_char_z>");
    }

    #[test]
    fn test_has_one() {
        assert!(!lal("a").has_one());
        assert!(AstNode::NullableSet(Box::new(lal("a"))).has_one());
        assert!(!AstNode::TupleSet(vec![lal("a"), AstNode::OneSet]).has_one());
        assert!(AstNode::TupleSet(vec![AstNode::OneSet, AstNode::OneSet]).has_one());
    }
}
