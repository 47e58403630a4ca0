//! Signatures: the run-time type names of the arguments of a call.

use std::fmt;

/// The ordered type names of the arguments of a dynamic call, e.g.
/// `(mutable_automaton<lal_char_b>, mutable_automaton<lal_char_z>)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Signature(Vec<String>);

impl Signature {
    /// A signature from argument type names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Signature(names.into_iter().map(Into::into).collect())
    }

    /// The type names.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let sig = Signature::new(["mutable_automaton<lal_char_b>", "lal_char_z"]);
        assert_eq!(sig.to_string(), "mutable_automaton<lal_char_b>, lal_char_z");
        assert_eq!(sig.len(), 2);
        assert!(Signature::default().is_empty());
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(Signature::new(["b", "z"]), Signature::new(["z", "b"]));
    }
}
