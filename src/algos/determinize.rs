//! Subset construction.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::automaton::{Automaton, AutomatonMut, MutableAutomaton, PartitionAutomaton, StateId};
use crate::labelset::LabelSet;
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::{AlgoError, Result};

type Determinized<A> =
    PartitionAutomaton<MutableAutomaton<<A as Automaton>::Labelset, <A as Automaton>::Weightset>>;

/// The accessible part of the subset automaton of `aut`.
///
/// Every state of the result records the set of states of `aut` it stands
/// for. Only Boolean automata over free label sets are supported.
pub fn determinize<A: Automaton>(aut: &A) -> Result<Determinized<A>> {
    if A::Weightset::sname() != "b" {
        return Err(AlgoError::Precondition {
            algorithm: "determinize",
            reason: format!("weightset must be b, not {}", A::Weightset::sname()),
        });
    }
    if !A::Labelset::is_free() {
        return Err(AlgoError::Precondition {
            algorithm: "determinize",
            reason: format!("labelset must be free, not {}", A::Labelset::sname()),
        });
    }

    let (ls, ws) = (aut.labelset(), aut.weightset());
    let generators = ls.generators();
    let mut res: Determinized<A> =
        PartitionAutomaton::new(MutableAutomaton::new(aut.context().clone()));
    let mut map: FxHashMap<BTreeSet<StateId>, StateId> = FxHashMap::default();
    let mut todo: VecDeque<(BTreeSet<StateId>, StateId)> = VecDeque::new();

    let mut state_of = |set: BTreeSet<StateId>,
                        res: &mut Determinized<A>,
                        todo: &mut VecDeque<(BTreeSet<StateId>, StateId)>| {
        if let Some(s) = map.get(&set) {
            return *s;
        }
        let s = res.new_state();
        if set.iter().any(|q| aut.is_final(*q)) {
            res.set_final(s, ws.one());
        }
        res.set_origin(s, set.clone());
        map.insert(set.clone(), s);
        todo.push_back((set, s));
        s
    };

    let initial: BTreeSet<StateId> = aut
        .initial_transitions()
        .into_iter()
        .map(|t| aut.dst_of(t))
        .collect();
    let i = state_of(initial, &mut res, &mut todo);
    res.set_initial(i, ws.one());

    while let Some((set, src)) = todo.pop_front() {
        for a in &generators {
            let dst: BTreeSet<StateId> = set
                .iter()
                .flat_map(|q| aut.out_with_label(*q, a))
                .map(|t| aut.dst_of(t))
                .collect();
            if dst.is_empty() {
                continue;
            }
            let dst = state_of(dst, &mut res, &mut todo);
            res.new_transition(src, dst, a.clone(), ws.one());
        }
    }
    debug!(
        states = res.num_states(),
        transitions = res.num_transitions(),
        "determinized"
    );
    Ok(res)
}
