//! Evaluation of a word.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::automaton::{Automaton, StateId};
use crate::labelset::{LabelSet, WordSet};
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::proper::is_proper;
use super::{AlgoError, Result};

type Weight<A> = <<A as Automaton>::Weightset as ValueSet>::Value;

/// The weight `aut` associates to `word`.
///
/// Labels are read as words, so word-labeled automata consume several
/// letters at once. The automaton must be proper.
pub fn eval<A>(aut: &A, word: &str) -> Result<Weight<A>>
where
    A: Automaton,
    A::Labelset: LabelSet<Word = WordSet>,
{
    if !is_proper(aut) {
        return Err(AlgoError::Precondition {
            algorithm: "eval",
            reason: "automaton is not proper".to_string(),
        });
    }
    let (ls, ws) = (aut.labelset(), aut.weightset());
    let word: Vec<char> = word.chars().collect();

    // frontier[i]: weight of reaching each state after reading word[..i].
    let mut frontier: Vec<FxHashMap<StateId, Weight<A>>> =
        vec![FxHashMap::default(); word.len() + 1];
    for t in aut.initial_transitions() {
        add_to(ws, &mut frontier[0], aut.dst_of(t), aut.weight_of(t))?;
    }
    for i in 0..word.len() {
        let current = std::mem::take(&mut frontier[i]);
        for (s, w) in &current {
            for t in aut.out(*s) {
                let label: Vec<char> = ls.to_word(&aut.label_of(t)).chars().collect();
                // Proper: no empty labels, so every step moves forward.
                let end = i + label.len();
                if label.is_empty() || end > word.len() || word[i..end] != label[..] {
                    continue;
                }
                let v = ws.checked_mul(w, &aut.weight_of(t))?;
                add_to(ws, &mut frontier[end], aut.dst_of(t), v)?;
            }
        }
        trace!(position = i, states = current.len(), "eval step");
    }

    let res = frontier[word.len()]
        .iter()
        .try_fold(ws.zero(), |acc, (s, w)| {
            ws.checked_add(&acc, &ws.checked_mul(w, &aut.get_final_weight(*s))?)
        })?;
    Ok(res)
}

fn add_to<W: WeightSet>(
    ws: &W,
    map: &mut FxHashMap<StateId, W::Value>,
    s: StateId,
    w: W::Value,
) -> Result<()> {
    let sum = match map.get(&s) {
        Some(old) => ws.checked_add(old, &w)?,
        None => w,
    };
    map.insert(s, sum);
    Ok(())
}
