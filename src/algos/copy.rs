//! Copying automata, possibly into another context.

use rustc_hash::FxHashMap;

use crate::automaton::{Automaton, AutomatonMut, MutableAutomaton, StateId};
use crate::context::Context;
use crate::labelset::LabelSet;
use crate::valueset::{Convert, ValueSet};
use crate::weightset::WeightSet;

type Label<A> = <<A as Automaton>::Labelset as ValueSet>::Value;
type Weight<A> = <<A as Automaton>::Weightset as ValueSet>::Value;

/// Add the states and transitions of `aut` to `res`, returning the map
/// from states of `aut` to states of `res`.
///
/// `transition` maps the label and weight of an ordinary transition, and
/// may drop it; `weight` maps initial and final weights. Weights that
/// become zero are not stored, and transitions that collide are summed.
pub(crate) fn copy_into<A, R>(
    aut: &A,
    res: &mut R,
    mut transition: impl FnMut(&Label<A>, &Weight<A>) -> Option<(Label<R>, Weight<R>)>,
    mut weight: impl FnMut(&Weight<A>) -> Weight<R>,
) -> FxHashMap<StateId, StateId>
where
    A: Automaton,
    R: AutomatonMut,
{
    let mut map = FxHashMap::default();
    map.insert(aut.pre(), res.pre());
    map.insert(aut.post(), res.post());
    for s in aut.states() {
        map.insert(s, res.new_state());
    }
    for t in aut.all_transitions() {
        let (src, dst) = (map[&aut.src_of(t)], map[&aut.dst_of(t)]);
        if src == res.pre() {
            res.add_initial(dst, weight(&aut.weight_of(t)));
        } else if dst == res.post() {
            res.add_final(src, weight(&aut.weight_of(t)));
        } else if let Some((l, w)) = transition(&aut.label_of(t), &aut.weight_of(t)) {
            res.add_transition(src, dst, l, w);
        }
    }
    map
}

/// A copy of `aut` as a [`MutableAutomaton`] of the same context.
pub fn copy<A: Automaton>(aut: &A) -> MutableAutomaton<A::Labelset, A::Weightset> {
    let mut res = MutableAutomaton::new(aut.context().clone());
    copy_into(aut, &mut res, |l, w| Some((l.clone(), w.clone())), |w| w.clone());
    res
}

/// A copy of `aut` in `ctx`, converting labels and weights.
pub fn copy_convert<A, L, W>(aut: &A, ctx: &Context<L, W>) -> MutableAutomaton<L, W>
where
    A: Automaton,
    L: LabelSet + Convert<A::Labelset>,
    W: WeightSet + Convert<A::Weightset>,
{
    let (ls, ws) = (ctx.labelset(), ctx.weightset());
    let (from_ls, from_ws) = (aut.labelset(), aut.weightset());
    let mut res = MutableAutomaton::new(ctx.clone());
    copy_into(
        aut,
        &mut res,
        |l, w| Some((ls.conv_from(from_ls, l), ws.conv_from(from_ws, w))),
        |w| ws.conv_from(from_ws, w),
    );
    res
}

/// Drop every decorator: a plain [`MutableAutomaton`] with the same
/// behavior as `aut`.
pub fn strip<A: Automaton>(aut: &A) -> MutableAutomaton<A::Labelset, A::Weightset> {
    copy(aut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::TransposeAutomaton;
    use crate::labelset::{LanChar, LetterSet};
    use crate::weightset::{Rational, B, Q};

    fn sample() -> MutableAutomaton<LetterSet, B> {
        let mut aut = MutableAutomaton::new(Context::make("lal_char(ab)_b").unwrap());
        let p = aut.new_state();
        let q = aut.new_state();
        aut.set_initial(p, true);
        aut.new_transition(p, q, 'a', true);
        aut.new_transition(q, q, 'b', true);
        aut.set_final(q, true);
        aut
    }

    #[test]
    fn test_copy_preserves_numbering() {
        let aut = sample();
        let c = copy(&aut);
        assert_eq!(c.states(), aut.states());
        assert_eq!(c.num_transitions(), 2);
        assert!(c.is_initial(2));
        assert!(c.is_final(3));
    }

    #[test]
    fn test_copy_convert() {
        let aut = sample();
        let ctx: Context<LanChar, Q> = Context::make("lan_char(abc)_q").unwrap();
        let c = copy_convert(&aut, &ctx);
        assert_eq!(c.vname(), "mutable_automaton<lan<lal_char(abc)>_q>");
        let t = c.get_transition(2, 3, &Some('a')).unwrap();
        assert_eq!(c.weight_of(t), Rational::from(1));
        assert_eq!(c.get_final_weight(3), Rational::from(1));
    }

    #[test]
    fn test_strip_materializes_views() {
        let tr = TransposeAutomaton::new(sample());
        let s = strip(&tr);
        assert_eq!(s.vname(), "mutable_automaton<lal_char(ab)_b>");
        assert!(s.is_initial(3));
        assert!(s.is_final(2));
        assert!(s.get_transition(3, 2, &'a').is_some());
    }
}
