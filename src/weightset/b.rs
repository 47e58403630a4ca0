//! The Boolean semiring.

use crate::context::{AstNode, ParseError};
use crate::valueset::ValueSet;

use super::{expect_weightset, StarError, WeightSet};

/// Booleans: `add` is "or", `mul` is "and", every value is starrable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct B;

impl ValueSet for B {
    type Value = bool;

    fn sname() -> String {
        "b".to_string()
    }

    fn vname(&self) -> String {
        Self::sname()
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        expect_weightset(node, "b").map(|_| B)
    }

    fn conv(&self, input: &str) -> Result<bool, ParseError> {
        match input.trim() {
            "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(ParseError::InvalidValue {
                valueset: self.vname(),
                input: other.to_string(),
                reason: "expected 0 or 1".to_string(),
            }),
        }
    }

    fn print(&self, v: &bool) -> String {
        if *v { "1" } else { "0" }.to_string()
    }
}

impl WeightSet for B {
    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn add(&self, l: &bool, r: &bool) -> bool {
        *l || *r
    }

    fn mul(&self, l: &bool, r: &bool) -> bool {
        *l && *r
    }

    fn star(&self, _v: &bool) -> Result<bool, StarError> {
        Ok(true)
    }
}
