//! Epsilon removal: make an automaton proper.
//!
//! A state `s` is eliminated by solving its local fixed point. Let `k` be
//! the star of the weight of its spontaneous loop (one if there is none).
//! Every spontaneous transition `p --\e|h--> s` is replaced by the
//! transitions `p --a|h.k.g--> q`, one per outgoing transition
//! `s --a|g--> q`, the final transition included. Once no spontaneous
//! transition enters `s`, it is done, and it is deleted if pruning is on and
//! it became unreachable.
//!
//! A state is never eliminated twice: new spontaneous transitions into `q`
//! can only be created from an existing spontaneous transition into `q`.
//! The order only matters for the number of transitions created along the
//! way, so states are picked by a profile: fewest outgoing spontaneous
//! transitions first, then fewest outgoing others, then fewest incoming
//! spontaneous, then by handle.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::automaton::{
    Automaton, AutomatonDecorator, AutomatonMut, MutableAutomaton, StateId, TransitionId,
    TransposeAutomaton,
};
use crate::context::Context;
use crate::labelset::LabelSet;
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::copy::copy_into;
use super::indexed_heap::IndexedHeap;
use super::{AlgoError, Result};

/// The result type of [`proper`]: labels are stripped of the identity.
pub type ProperAutomaton<A> = MutableAutomaton<
    <<A as Automaton>::Labelset as LabelSet>::Stripped,
    <A as Automaton>::Weightset,
>;

/// Which way spontaneous transitions are followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Direction {
    /// Eliminate states by pulling their successors back onto their
    /// spontaneous predecessors.
    #[default]
    Backward,
    /// Work on the transposed automaton: push predecessors forward onto
    /// spontaneous successors.
    Forward,
}

/// The order in which states are eliminated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum EliminationOrder {
    /// By profile, kept up to date in an addressable heap.
    #[default]
    Profile,
    /// By increasing state handle.
    Insertion,
}

/// Options of [`proper_with`].
///
/// # Example
///
/// ```rust,ignore
/// let config = ProperConfig::new()
///     .direction(Direction::Forward)
///     .prune(false);
/// let res = proper_with(&aut, &config)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ProperConfig {
    /// Which way to follow spontaneous transitions.
    pub direction: Direction,
    /// Whether to delete states left without incoming transitions.
    pub prune: bool,
    /// The elimination order.
    pub order: EliminationOrder,
}

impl ProperConfig {
    /// The default configuration: backward, pruning, by profile.
    pub fn new() -> Self {
        ProperConfig {
            direction: Direction::default(),
            prune: true,
            order: EliminationOrder::default(),
        }
    }

    /// Set the direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set whether to prune.
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Set the elimination order.
    pub fn order(mut self, order: EliminationOrder) -> Self {
        self.order = order;
        self
    }
}

impl Default for ProperConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Elimination priority of a state; smaller goes first.
///
/// `out_other` counts every other outgoing transition, the final one
/// included: they are all copied onto each spontaneous predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Profile {
    out_sp: usize,
    out_other: usize,
    in_sp: usize,
    state: StateId,
}

/// Removes the spontaneous transitions of an automaton, in place.
pub struct EpsilonRemover<'a, A: AutomatonMut> {
    aut: &'a mut A,
    prune: bool,
    order: EliminationOrder,
    eliminated: usize,
}

impl<'a, A: AutomatonMut> EpsilonRemover<'a, A> {
    /// Prepare to work on `aut`. The direction of `config` is ignored: pass
    /// a transposed view to work forward.
    pub fn new(aut: &'a mut A, config: &ProperConfig) -> Self {
        EpsilonRemover {
            aut,
            prune: config.prune,
            order: config.order,
            eliminated: 0,
        }
    }

    fn is_spontaneous_label(&self, t: TransitionId) -> bool {
        self.aut.labelset().is_one(&self.aut.label_of(t))
    }

    fn in_spontaneous(&self, s: StateId) -> Vec<TransitionId> {
        self.aut
            .in_(s)
            .into_iter()
            .filter(|t| self.is_spontaneous_label(*t))
            .collect()
    }

    fn profile(&self, s: StateId) -> Profile {
        let (out_sp, out_other) =
            self.aut
                .all_out(s)
                .into_iter()
                .fold((0, 0), |(sp, other), t| {
                    if self.is_spontaneous_label(t) {
                        (sp + 1, other)
                    } else {
                        (sp, other + 1)
                    }
                });
        Profile {
            out_sp,
            out_other,
            in_sp: self.in_spontaneous(s).len(),
            state: s,
        }
    }

    /// Eliminate every state with incoming spontaneous transitions.
    ///
    /// On error the automaton is left partially transformed.
    pub fn run(mut self) -> Result<()> {
        if !A::Labelset::has_one() {
            return Ok(());
        }
        match self.order {
            EliminationOrder::Profile => {
                let mut heap = IndexedHeap::new();
                for s in self.aut.states() {
                    let p = self.profile(s);
                    if p.in_sp > 0 {
                        heap.update(s, p);
                    }
                }
                while let Some((_, s)) = heap.pop() {
                    for n in self.remove_state(s)? {
                        let p = self.profile(n);
                        if p.in_sp > 0 {
                            heap.update(n, p);
                        } else {
                            heap.remove(n);
                        }
                    }
                }
            }
            EliminationOrder::Insertion => {
                for s in self.aut.states() {
                    if self.aut.has_state(s) && !self.in_spontaneous(s).is_empty() {
                        self.remove_state(s)?;
                    }
                }
            }
        }
        debug!(
            eliminated = self.eliminated,
            states = self.aut.num_states(),
            transitions = self.aut.num_transitions(),
            "spontaneous transitions removed"
        );
        Ok(())
    }

    /// Add `weight` to the transition `src -> dst` labeled `label`.
    fn add_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: <A::Labelset as ValueSet>::Value,
        weight: <A::Weightset as ValueSet>::Value,
    ) -> Result<()> {
        match self.aut.get_transition(src, dst, &label) {
            Some(t) => {
                let sum = self
                    .aut
                    .weightset()
                    .checked_add(&self.aut.weight_of(t), &weight)?;
                self.aut.set_weight(t, sum);
            }
            None if self.aut.weightset().is_zero(&weight) => {}
            None => {
                self.aut.new_transition(src, dst, label, weight);
            }
        }
        Ok(())
    }

    /// Eliminate `s`; returns the live neighbors whose profile may have
    /// changed.
    fn remove_state(&mut self, s: StateId) -> Result<Vec<StateId>> {
        let ws = self.aut.weightset().clone();
        let in_sp = self.in_spontaneous(s);

        let mut star = ws.one();
        let mut closure = Vec::with_capacity(in_sp.len());
        for t in &in_sp {
            let (src, w) = (self.aut.src_of(*t), self.aut.weight_of(*t));
            if src == s {
                star = ws
                    .star(&w)
                    .map_err(|source| AlgoError::InvalidAutomaton { state: s, source })?;
            } else {
                closure.push((src, w));
            }
        }
        for t in in_sp {
            self.aut.del_transition(t);
        }

        // Blow the outgoing weights by the star of the loop.
        if !ws.is_one(&star) {
            for t in self.aut.all_out(s) {
                let w = ws.checked_mul(&star, &self.aut.weight_of(t))?;
                self.aut.set_weight(t, w);
            }
        }
        let outs: Vec<_> = self
            .aut
            .all_out(s)
            .into_iter()
            .map(|t| (self.aut.dst_of(t), self.aut.label_of(t), self.aut.weight_of(t)))
            .collect();

        trace!(
            state = s,
            incoming = closure.len(),
            outgoing = outs.len(),
            "eliminating state"
        );
        for (p, h) in &closure {
            for (dst, label, g) in &outs {
                self.add_transition(*p, *dst, label.clone(), ws.checked_mul(h, g)?)?;
            }
        }
        self.eliminated += 1;

        let (pre, post) = (self.aut.pre(), self.aut.post());
        let mut neighbors: FxHashSet<StateId> = closure.iter().map(|(p, _)| *p).collect();
        neighbors.extend(outs.iter().map(|(dst, _, _)| *dst));
        neighbors.remove(&s);
        neighbors.remove(&pre);
        neighbors.remove(&post);

        if self.prune && self.aut.all_in(s).is_empty() {
            trace!(state = s, "pruning unreachable state");
            self.aut.del_state(s);
        }

        let mut neighbors: Vec<_> = neighbors
            .into_iter()
            .filter(|n| self.aut.has_state(*n))
            .collect();
        neighbors.sort_unstable();
        Ok(neighbors)
    }
}

/// [`proper_with`] with the default configuration.
pub fn proper<A: Automaton>(aut: &A) -> Result<ProperAutomaton<A>> {
    proper_with(aut, &ProperConfig::default())
}

/// An equivalent automaton without spontaneous transitions, over the
/// stripped label set.
///
/// Label sets without an identity have nothing to remove: the result is a
/// copy. Fails with [`AlgoError::InvalidAutomaton`] when a spontaneous loop
/// has a weight with no star, and with [`AlgoError::Overflow`] when a new
/// weight is out of range.
///
/// States are renumbered densely: when pruning deletes states, the ones
/// after them move down. [`proper_with_map`] tells where each state went.
pub fn proper_with<A: Automaton>(aut: &A, config: &ProperConfig) -> Result<ProperAutomaton<A>> {
    proper_with_map(aut, config).map(|(res, _)| res)
}

/// [`proper_with`], also returning the map from the states of `aut` that
/// survive (pre and post included) to their states in the result.
pub fn proper_with_map<A: Automaton>(
    aut: &A,
    config: &ProperConfig,
) -> Result<(ProperAutomaton<A>, FxHashMap<StateId, StateId>)> {
    debug!(automaton = %aut.vname(), ?config, "proper");
    let mut work = MutableAutomaton::new(aut.context().clone());
    let to_work = copy_into(aut, &mut work, |l, w| Some((l.clone(), w.clone())), |w| w.clone());
    match config.direction {
        Direction::Backward => EpsilonRemover::new(&mut work, config).run()?,
        Direction::Forward => {
            let mut view = TransposeAutomaton::new(work);
            EpsilonRemover::new(&mut view, config).run()?;
            work = view.into_inner();
        }
    }

    let ls = work.labelset().clone();
    let ctx = Context::new(ls.stripped(), work.weightset().clone());
    let mut res = MutableAutomaton::new(ctx);
    let to_res = copy_into(
        &work,
        &mut res,
        |l, w| ls.to_stripped(l).map(|l| (l, w.clone())),
        |w| w.clone(),
    );
    let map = to_work
        .into_iter()
        .filter_map(|(s, w)| to_res.get(&w).map(|r| (s, *r)))
        .collect();
    Ok((res, map))
}

/// Whether `aut` has no spontaneous transition.
pub fn is_proper<A: Automaton>(aut: &A) -> bool {
    !A::Labelset::has_one() || !aut.transitions().into_iter().any(|t| aut.is_spontaneous(t))
}

/// Whether `aut` has a proper equivalent, i.e. whether [`proper`] succeeds.
pub fn is_valid<A: Automaton>(aut: &A) -> bool {
    is_proper(aut) || proper(aut).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelset::{LanChar, LetterSet, OneSet};
    use crate::weightset::{Rational, B, Q, Z};

    fn lan<W: WeightSet>(ctx: &str) -> MutableAutomaton<LanChar, W> {
        MutableAutomaton::new(Context::make(ctx).unwrap())
    }

    #[test]
    fn test_spontaneous_to_final() {
        let mut aut = lan::<B>("lan_char(ab)_b");
        let s0 = aut.new_state();
        let s1 = aut.new_state();
        aut.set_initial(s0, true);
        aut.new_transition(s0, s1, None, true);
        aut.set_final(s1, true);

        let res = proper(&aut).unwrap();
        assert!(is_proper(&res));
        assert_eq!(res.vname(), "mutable_automaton<lal_char(ab)_b>");
        assert!(res.is_final(s0));
        assert!(!res.has_state(s1));
    }

    #[test]
    fn test_no_prune_keeps_states() {
        let mut aut = lan::<B>("lan_char(ab)_b");
        let s0 = aut.new_state();
        let s1 = aut.new_state();
        aut.set_initial(s0, true);
        aut.new_transition(s0, s1, None, true);
        aut.set_final(s1, true);
        let res = proper_with(&aut, &ProperConfig::new().prune(false)).unwrap();
        assert_eq!(res.num_states(), 2);
        assert!(res.is_final(s0));
    }

    #[test]
    fn test_loop_weight_is_starred() {
        let mut aut = lan::<Q>("lan_char(a)_q");
        let s = aut.new_state();
        let f = aut.new_state();
        aut.set_initial(s, Rational::from(1));
        aut.new_transition(s, s, None, Rational::new(1, 2));
        aut.new_transition(s, f, Some('a'), Rational::from(3));
        aut.set_final(f, Rational::from(1));

        let res = proper(&aut).unwrap();
        let t = res.get_transition(s, f, &'a').unwrap();
        assert_eq!(res.weight_of(t), Rational::from(6));
    }

    #[test]
    fn test_divergent_loop_is_an_error() {
        let mut aut = lan::<Z>("lan_char(a)_z");
        let s = aut.new_state();
        aut.set_initial(s, 1);
        aut.new_transition(s, s, None, 2);
        aut.set_final(s, 1);
        match proper(&aut) {
            Err(AlgoError::InvalidAutomaton { state, source }) => {
                assert_eq!(state, s);
                assert_eq!(source.to_string(), "z: star: invalid value: 2");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!is_valid(&aut));
    }

    #[test]
    fn test_forward_matches_backward() {
        let mut aut = lan::<Z>("lan_char(ab)_z");
        let s0 = aut.new_state();
        let s1 = aut.new_state();
        let s2 = aut.new_state();
        aut.set_initial(s0, 1);
        aut.new_transition(s0, s1, Some('a'), 2);
        aut.new_transition(s1, s2, None, 3);
        aut.new_transition(s2, s2, Some('b'), 1);
        aut.set_final(s2, 5);

        let (back, bmap) = proper_with_map(&aut, &ProperConfig::new()).unwrap();
        let forward = ProperConfig::new().direction(Direction::Forward);
        let (fwd, fmap) = proper_with_map(&aut, &forward).unwrap();
        assert!(is_proper(&back));
        assert!(is_proper(&fwd));
        // Backward moves the 'b' loop's entry onto s1; forward moves the 'a' onto s2.
        assert_eq!(back.get_final_weight(bmap[&s1]), 15);
        assert!(!fmap.contains_key(&s1));
        assert_eq!(fwd.num_states(), 2);
        let t = fwd.get_transition(fmap[&s0], fmap[&s2], &'a').unwrap();
        assert_eq!(fwd.weight_of(t), 6);
        assert_eq!(fwd.get_final_weight(fmap[&s2]), 5);
    }

    #[test]
    fn test_pruning_renumbers_states() {
        let mut aut = lan::<B>("lan_char(a)_b");
        let s0 = aut.new_state();
        let s1 = aut.new_state();
        let s2 = aut.new_state();
        aut.set_initial(s0, true);
        aut.new_transition(s0, s1, None, true);
        aut.new_transition(s1, s2, Some('a'), true);
        aut.set_final(s2, true);

        let (res, map) = proper_with_map(&aut, &ProperConfig::new()).unwrap();
        assert_eq!(res.num_states(), 2);
        assert!(!map.contains_key(&s1));
        assert_eq!(map[&aut.pre()], res.pre());
        assert_eq!(map[&aut.post()], res.post());
        assert!(res.get_transition(map[&s0], map[&s2], &'a').is_some());
        assert!(res.is_final(map[&s2]));
        // s2 moves down into the slot s1 left.
        assert_eq!(map[&s2], s1);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut aut = lan::<Z>("lan_char(a)_z");
        let s0 = aut.new_state();
        let s1 = aut.new_state();
        aut.set_initial(s0, 1);
        aut.new_transition(s0, s1, None, i64::MAX);
        aut.set_final(s1, 2);
        match proper(&aut) {
            Err(AlgoError::Overflow(err)) => assert_eq!(err.op, "mul"),
            other => panic!("unexpected {:?}", other),
        }

        // The product fits, the sum with the existing final weight does not.
        aut.set_final(s1, 1);
        aut.set_final(s0, 1);
        match proper(&aut) {
            Err(AlgoError::Overflow(err)) => assert_eq!(err.op, "add"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!is_valid(&aut));
    }

    #[test]
    fn test_profile_counts_final_transitions() {
        let mut aut = lan::<B>("lan_char(a)_b");
        let p = aut.new_state();
        let q = aut.new_state();
        let r = aut.new_state();
        aut.set_initial(p, true);
        aut.new_transition(p, q, None, true);
        aut.new_transition(p, r, None, true);
        aut.set_final(q, true);
        aut.new_transition(r, r, Some('a'), true);
        let remover = EpsilonRemover::new(&mut aut, &ProperConfig::new());
        let (pq, pr) = (remover.profile(q), remover.profile(r));
        assert_eq!((pq.out_sp, pq.out_other, pq.in_sp), (0, 1, 1));
        assert_eq!((pr.out_sp, pr.out_other, pr.in_sp), (0, 1, 1));
        // Equal profiles: the handle breaks the tie.
        assert!(pq < pr);
        assert_eq!(remover.profile(p).out_sp, 2);
    }

    #[test]
    fn test_spontaneous_cycle() {
        let mut aut = lan::<B>("lan_char(a)_b");
        let p = aut.new_state();
        let q = aut.new_state();
        aut.set_initial(p, true);
        aut.new_transition(p, q, None, true);
        aut.new_transition(q, p, None, true);
        aut.new_transition(q, q, Some('a'), true);
        aut.set_final(q, true);
        for order in [EliminationOrder::Profile, EliminationOrder::Insertion] {
            let res = proper_with(&aut, &ProperConfig::new().order(order)).unwrap();
            assert!(is_proper(&res));
            assert!(res.is_final(p));
        }
    }

    #[test]
    fn test_free_labelset_is_copied() {
        let mut aut: MutableAutomaton<LetterSet, B> =
            MutableAutomaton::new(Context::make("lal_char(a)_b").unwrap());
        let s = aut.new_state();
        aut.set_initial(s, true);
        aut.new_transition(s, s, 'a', true);
        let res = proper(&aut).unwrap();
        assert_eq!(res.num_transitions(), 1);
        assert!(is_proper(&aut));
    }

    #[test]
    fn test_oneset_reduces_to_a_weight() {
        let mut aut: MutableAutomaton<OneSet, Q> =
            MutableAutomaton::new(Context::make("lao_q").unwrap());
        let s = aut.new_state();
        aut.set_initial(s, Rational::from(2));
        aut.new_transition(s, s, (), Rational::new(1, 3));
        aut.set_final(s, Rational::from(1));
        let res = proper(&aut).unwrap();
        assert_eq!(res.num_transitions(), 0);
        assert_eq!(res.get_final_weight(s), Rational::new(3, 2));
        assert_eq!(res.get_initial_weight(s), Rational::from(2));
    }
}
