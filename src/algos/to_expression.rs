//! From an automaton to an equivalent expression, by state elimination.

use tracing::{debug, trace};

use crate::automaton::{Automaton, AutomatonMut, MutableAutomaton, StateId};
use crate::context::Context;
use crate::expression::{ExpressionRef, ExpressionSet, Identities};
use crate::labelset::{LabelSet, OneSet};
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::copy::copy_into;

type Expr<A> = ExpressionRef<
    <<A as Automaton>::Labelset as ValueSet>::Value,
    <<A as Automaton>::Weightset as ValueSet>::Value,
>;

/// An expression denoting the behavior of `aut`, built with the given
/// identities.
///
/// The automaton is first lifted: every transition `p --a|w--> q` becomes
/// `p --<w>a--> q` in an automaton weighted by expressions and without
/// labels. States are then eliminated in increasing order.
pub fn to_expression<A: Automaton>(aut: &A, identities: Identities) -> Expr<A> {
    let rs = ExpressionSet::new(aut.context().clone(), identities);
    let mut lifted: MutableAutomaton<OneSet, ExpressionSet<A::Labelset, A::Weightset>> =
        MutableAutomaton::new(Context::new(OneSet, rs.clone()));
    let one = WeightSet::one(&rs);
    copy_into(
        aut,
        &mut lifted,
        |l, w| Some(((), rs.lweight(w, &rs.atom(l)))),
        |w| rs.lweight(w, &one),
    );

    for s in lifted.states() {
        eliminate(&mut lifted, &rs, s);
    }

    let (pre, post) = (lifted.pre(), lifted.post());
    let res = lifted
        .get_transition(pre, post, &())
        .map(|t| lifted.weight_of(t))
        .unwrap_or_else(|| WeightSet::zero(&rs));
    debug!(size = res.size(), "to_expression");
    res
}

fn eliminate<L: LabelSet, W: WeightSet>(
    aut: &mut MutableAutomaton<OneSet, ExpressionSet<L, W>>,
    rs: &ExpressionSet<L, W>,
    s: StateId,
) {
    let loop_weight = aut.get_transition(s, s, &()).map(|t| aut.weight_of(t));
    let preds: Vec<_> = aut
        .all_in(s)
        .into_iter()
        .filter(|t| aut.src_of(*t) != s)
        .map(|t| (aut.src_of(t), aut.weight_of(t)))
        .collect();
    let succs: Vec<_> = aut
        .all_out(s)
        .into_iter()
        .filter(|t| aut.dst_of(*t) != s)
        .map(|t| (aut.dst_of(t), aut.weight_of(t)))
        .collect();
    trace!(
        state = s,
        preds = preds.len(),
        succs = succs.len(),
        "eliminating state"
    );

    for (p, h) in &preds {
        let h = match &loop_weight {
            Some(l) => WeightSet::mul(rs, h, &rs.closure(l)),
            None => h.clone(),
        };
        for (q, g) in &succs {
            aut.add_transition(*p, *q, (), WeightSet::mul(rs, &h, g));
        }
    }
    aut.del_state(s);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelset::{LanChar, LetterSet};
    use crate::weightset::{B, Z};

    #[test]
    fn test_simple_loop() {
        let mut aut: MutableAutomaton<LetterSet, B> =
            MutableAutomaton::new(Context::make("lal_char(ab)_b").unwrap());
        let p = aut.new_state();
        let q = aut.new_state();
        aut.set_initial(p, true);
        aut.new_transition(p, q, 'a', true);
        aut.new_transition(q, q, 'b', true);
        aut.set_final(q, true);

        let e = to_expression(&aut, Identities::Trivial);
        let rs = ExpressionSet::new(aut.context().clone(), Identities::Trivial);
        assert_eq!(rs.print(&e), "ab*");
    }

    #[test]
    fn test_weights_and_spontaneous() {
        let mut aut: MutableAutomaton<LanChar, Z> =
            MutableAutomaton::new(Context::make("lan_char(a)_z").unwrap());
        let p = aut.new_state();
        let q = aut.new_state();
        aut.set_initial(p, 2);
        aut.new_transition(p, q, None, 3);
        aut.new_transition(q, q, Some('a'), 1);
        aut.set_final(q, 1);

        let e = to_expression(&aut, Identities::Series);
        let rs = ExpressionSet::new(aut.context().clone(), Identities::Series);
        assert_eq!(rs.print(&e), "<6>a*");
    }

    #[test]
    fn test_empty_automaton() {
        let aut: MutableAutomaton<LetterSet, B> =
            MutableAutomaton::new(Context::make("lal_char(a)_b").unwrap());
        let e = to_expression(&aut, Identities::Series);
        assert_eq!(*e, crate::expression::Expression::Zero);
    }
}
