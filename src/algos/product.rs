//! Synchronized product of two automata.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::automaton::{Automaton, AutomatonMut, MutableAutomaton, StateId};
use crate::context::Context;
use crate::labelset::LabelSet;
use crate::valueset::{Convert, Join, ValueSet};
use crate::weightset::WeightSet;

use super::{AlgoError, Result};

/// The accessible part of the product of `lhs` and `rhs`, over the join of
/// their contexts.
///
/// A state of the result stands for a pair of states; both operands must
/// read the same letter to move, and weights multiply, the left operand's
/// weight first. On Boolean automata this is the intersection of the
/// languages. Only free label sets are supported: spontaneous transitions
/// must be removed first.
pub fn product<A1, A2, L, W>(lhs: &A1, rhs: &A2) -> Result<MutableAutomaton<L, W>>
where
    A1: Automaton,
    A2: Automaton,
    A1::Labelset: Join<A2::Labelset, Output = L>,
    A1::Weightset: Join<A2::Weightset, Output = W>,
    L: LabelSet + Convert<A1::Labelset> + Convert<A2::Labelset>,
    W: WeightSet + Convert<A1::Weightset> + Convert<A2::Weightset>,
{
    if !L::is_free() {
        return Err(AlgoError::Precondition {
            algorithm: "product",
            reason: format!("labelset must be free, not {}", L::sname()),
        });
    }
    let ctx = Context::new(
        lhs.labelset().join(rhs.labelset()),
        lhs.weightset().join(rhs.weightset()),
    );
    debug!(lhs = %lhs.vname(), rhs = %rhs.vname(), context = %ctx, "product");
    let (ls, ws) = (ctx.labelset().clone(), ctx.weightset().clone());
    let lweight = |w: &<A1::Weightset as ValueSet>::Value| ws.conv_from(lhs.weightset(), w);
    let rweight = |w: &<A2::Weightset as ValueSet>::Value| ws.conv_from(rhs.weightset(), w);

    let mut res = MutableAutomaton::new(ctx);
    let mut pairs: FxHashMap<(StateId, StateId), StateId> = FxHashMap::default();
    let mut todo: VecDeque<(StateId, StateId)> = VecDeque::new();
    let mut state_of = |pair: (StateId, StateId),
                        res: &mut MutableAutomaton<L, W>,
                        todo: &mut VecDeque<(StateId, StateId)>| {
        *pairs.entry(pair).or_insert_with(|| {
            todo.push_back(pair);
            res.new_state()
        })
    };

    for i1 in lhs.initial_transitions() {
        for i2 in rhs.initial_transitions() {
            let w = ws.checked_mul(&lweight(&lhs.weight_of(i1)), &rweight(&rhs.weight_of(i2)))?;
            let s = state_of((lhs.dst_of(i1), rhs.dst_of(i2)), &mut res, &mut todo);
            let old = res.get_initial_weight(s);
            res.set_initial(s, ws.checked_add(&old, &w)?);
        }
    }

    while let Some((p1, p2)) = todo.pop_front() {
        let src = state_of((p1, p2), &mut res, &mut todo);
        // The transitions of the right operand, by label.
        let mut by_label: FxHashMap<L::Value, Vec<(StateId, W::Value)>> = FxHashMap::default();
        for t in rhs.out(p2) {
            by_label
                .entry(ls.conv_from(rhs.labelset(), &rhs.label_of(t)))
                .or_default()
                .push((rhs.dst_of(t), rweight(&rhs.weight_of(t))));
        }
        for t in lhs.out(p1) {
            let label = ls.conv_from(lhs.labelset(), &lhs.label_of(t));
            let Some(targets) = by_label.get(&label) else {
                continue;
            };
            let w1 = lweight(&lhs.weight_of(t));
            for (q2, w2) in targets {
                let w = ws.checked_mul(&w1, w2)?;
                let dst = state_of((lhs.dst_of(t), *q2), &mut res, &mut todo);
                match res.get_transition(src, dst, &label) {
                    Some(t) => {
                        let sum = ws.checked_add(&res.weight_of(t), &w)?;
                        res.set_weight(t, sum);
                    }
                    None if ws.is_zero(&w) => {}
                    None => {
                        res.new_transition(src, dst, label.clone(), w);
                    }
                }
            }
        }
        let f = ws.checked_mul(
            &lweight(&lhs.get_final_weight(p1)),
            &rweight(&rhs.get_final_weight(p2)),
        )?;
        res.set_final(src, f);
    }
    debug!(
        states = res.num_states(),
        transitions = res.num_transitions(),
        "product built"
    );
    Ok(res)
}
