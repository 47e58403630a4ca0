//! Enumeration of the accepted words, up to a length.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::automaton::{Automaton, StateId};
use crate::context::Context;
use crate::labelset::{LabelSet, WordSet};
use crate::polynomial::{Polynomial, PolynomialSet};
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::proper::is_proper;
use super::{AlgoError, Result};

type Weight<A> = <<A as Automaton>::Weightset as ValueSet>::Value;

/// The polynomial of the words of length at most `max_len` accepted by
/// `aut`, with their weights.
///
/// The automaton must be proper. Words of zero weight are left out.
pub fn enumerate<A>(aut: &A, max_len: usize) -> Result<Polynomial<String, Weight<A>>>
where
    A: Automaton,
    A::Labelset: LabelSet<Word = WordSet>,
{
    if !is_proper(aut) {
        return Err(AlgoError::Precondition {
            algorithm: "enumerate",
            reason: "automaton is not proper".to_string(),
        });
    }
    let ls = aut.labelset();
    let ps = PolynomialSet::new(Context::new(ls.word_labelset(), aut.weightset().clone()));
    let ws = aut.weightset();

    let mut res = Polynomial::new();
    let mut current: FxHashMap<StateId, Polynomial<String, Weight<A>>> = FxHashMap::default();
    for t in aut.initial_transitions() {
        let p = current.entry(aut.dst_of(t)).or_default();
        ps.add_here(p, String::new(), aut.weight_of(t));
    }

    // Proper: every transition lengthens the words, so this terminates.
    while !current.is_empty() {
        let mut next: FxHashMap<StateId, Polynomial<String, Weight<A>>> = FxHashMap::default();
        for (s, words) in &current {
            let fin = aut.get_final_weight(*s);
            if !ws.is_zero(&fin) {
                res = ps.sum(&res, &ps.rweight(words, &fin));
            }
            for t in aut.out(*s) {
                let label = ls.to_word(&aut.label_of(t));
                let w = aut.weight_of(t);
                let p = next.entry(aut.dst_of(t)).or_default();
                for (word, v) in words.iter() {
                    if word.chars().count() + label.chars().count() <= max_len {
                        ps.add_here(p, format!("{}{}", word, label), ws.checked_mul(v, &w)?);
                    }
                }
            }
        }
        next.retain(|_, p| !p.is_empty());
        current = next;
    }
    debug!(words = res.len(), max_len, "enumerated");
    Ok(res)
}
