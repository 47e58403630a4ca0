//! The general purpose, mutable automaton.

use smallvec::SmallVec;

use crate::context::Context;
use crate::labelset::LabelSet;
use crate::weightset::WeightSet;

use super::{Automaton, AutomatonMut, StateId, TransitionId, POST, PRE};

/// Adjacency of one state.
#[derive(Debug, Clone, Default)]
struct StateRecord {
    succ: SmallVec<[TransitionId; 4]>,
    pred: SmallVec<[TransitionId; 4]>,
}

#[derive(Debug, Clone)]
struct TransitionRecord<Lv, Wv> {
    src: StateId,
    dst: StateId,
    label: Lv,
    weight: Wv,
}

/// An automaton stored as adjacency lists.
///
/// States are numbered densely from 2 (`pre` is 0, `post` is 1) and are
/// never reused: a deleted state leaves a hole. Transition handles are
/// recycled once their transition is deleted.
///
/// Using a deleted state or transition is a programming error and panics.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = Context::new(LetterSet::make("lal_char(ab)")?, B);
/// let mut aut = MutableAutomaton::new(ctx);
/// let s = aut.new_state();
/// aut.set_initial(s, true);
/// aut.new_transition(s, s, 'a', true);
/// aut.set_final(s, true);
/// ```
#[derive(Debug, Clone)]
pub struct MutableAutomaton<L: LabelSet, W: WeightSet> {
    ctx: Context<L, W>,
    states: Vec<Option<StateRecord>>,
    transitions: Vec<Option<TransitionRecord<L::Value, W::Value>>>,
    free_transitions: Vec<TransitionId>,
}

impl<L: LabelSet, W: WeightSet> MutableAutomaton<L, W> {
    /// An automaton with no state besides `pre` and `post`.
    pub fn new(ctx: Context<L, W>) -> Self {
        MutableAutomaton {
            ctx,
            states: vec![Some(StateRecord::default()), Some(StateRecord::default())],
            transitions: Vec::new(),
            free_transitions: Vec::new(),
        }
    }

    fn state(&self, s: StateId) -> &StateRecord {
        match self.states.get(s) {
            Some(Some(rec)) => rec,
            _ => panic!("use of invalid state {}", s),
        }
    }

    fn state_mut(&mut self, s: StateId) -> &mut StateRecord {
        match self.states.get_mut(s) {
            Some(Some(rec)) => rec,
            _ => panic!("use of invalid state {}", s),
        }
    }

    fn transition(&self, t: TransitionId) -> &TransitionRecord<L::Value, W::Value> {
        match self.transitions.get(t) {
            Some(Some(rec)) => rec,
            _ => panic!("use of invalid transition {}", t),
        }
    }

    fn transition_mut(&mut self, t: TransitionId) -> &mut TransitionRecord<L::Value, W::Value> {
        match self.transitions.get_mut(t) {
            Some(Some(rec)) => rec,
            _ => panic!("use of invalid transition {}", t),
        }
    }
}

impl<L: LabelSet, W: WeightSet> Automaton for MutableAutomaton<L, W> {
    type Labelset = L;
    type Weightset = W;

    fn sname() -> String {
        format!("mutable_automaton<{}>", Context::<L, W>::sname())
    }

    fn vname(&self) -> String {
        format!("mutable_automaton<{}>", self.ctx.vname())
    }

    fn context(&self) -> &Context<L, W> {
        &self.ctx
    }

    fn pre(&self) -> StateId {
        PRE
    }

    fn post(&self) -> StateId {
        POST
    }

    fn all_states(&self) -> Vec<StateId> {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(s, rec)| rec.as_ref().map(|_| s))
            .collect()
    }

    fn all_transitions(&self) -> Vec<TransitionId> {
        self.transitions
            .iter()
            .enumerate()
            .filter_map(|(t, rec)| rec.as_ref().map(|_| t))
            .collect()
    }

    fn has_state(&self, s: StateId) -> bool {
        matches!(self.states.get(s), Some(Some(_)))
    }

    fn has_transition(&self, t: TransitionId) -> bool {
        matches!(self.transitions.get(t), Some(Some(_)))
    }

    fn src_of(&self, t: TransitionId) -> StateId {
        self.transition(t).src
    }

    fn dst_of(&self, t: TransitionId) -> StateId {
        self.transition(t).dst
    }

    fn label_of(&self, t: TransitionId) -> L::Value {
        self.transition(t).label.clone()
    }

    fn weight_of(&self, t: TransitionId) -> W::Value {
        self.transition(t).weight.clone()
    }

    fn all_out(&self, s: StateId) -> Vec<TransitionId> {
        self.state(s).succ.to_vec()
    }

    fn all_in(&self, s: StateId) -> Vec<TransitionId> {
        self.state(s).pred.to_vec()
    }

    fn get_transition(&self, src: StateId, dst: StateId, label: &L::Value) -> Option<TransitionId> {
        self.state(src).succ.iter().copied().find(|t| {
            let rec = self.transition(*t);
            rec.dst == dst && rec.label == *label
        })
    }

    fn num_states(&self) -> usize {
        self.states.iter().filter(|s| s.is_some()).count() - 2
    }

    fn num_transitions(&self) -> usize {
        self.transitions
            .iter()
            .flatten()
            .filter(|t| t.src != PRE && t.dst != POST)
            .count()
    }
}

impl<L: LabelSet, W: WeightSet> AutomatonMut for MutableAutomaton<L, W> {
    fn new_state(&mut self) -> StateId {
        self.states.push(Some(StateRecord::default()));
        self.states.len() - 1
    }

    fn del_state(&mut self, s: StateId) {
        assert!(s != PRE && s != POST, "cannot delete a sentinel state");
        let rec = self.state(s).clone();
        for t in rec.succ.iter().chain(rec.pred.iter()) {
            if self.has_transition(*t) {
                self.del_transition(*t);
            }
        }
        self.states[s] = None;
    }

    fn new_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: L::Value,
        weight: W::Value,
    ) -> TransitionId {
        debug_assert!(!self.ctx.weightset().is_zero(&weight), "zero weight");
        debug_assert!(
            self.get_transition(src, dst, &label).is_none(),
            "duplicate transition {} -> {}",
            src,
            dst
        );
        let rec = TransitionRecord { src, dst, label, weight };
        let t = match self.free_transitions.pop() {
            Some(t) => {
                self.transitions[t] = Some(rec);
                t
            }
            None => {
                self.transitions.push(Some(rec));
                self.transitions.len() - 1
            }
        };
        self.state_mut(src).succ.push(t);
        self.state_mut(dst).pred.push(t);
        t
    }

    fn del_transition(&mut self, t: TransitionId) {
        let (src, dst) = {
            let rec = self.transition(t);
            (rec.src, rec.dst)
        };
        self.state_mut(src).succ.retain(|x| *x != t);
        self.state_mut(dst).pred.retain(|x| *x != t);
        self.transitions[t] = None;
        self.free_transitions.push(t);
    }

    fn set_weight(&mut self, t: TransitionId, weight: W::Value) -> W::Value {
        if self.ctx.weightset().is_zero(&weight) {
            self.del_transition(t);
        } else {
            self.transition_mut(t).weight = weight.clone();
        }
        weight
    }
}
