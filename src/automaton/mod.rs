//! The automaton graph contract and its implementations.
//!
//! Every automaton has two sentinel states, `pre` and `post`. Initial
//! weights are the weights of transitions `pre -> s`, final weights those of
//! transitions `s -> post`; both carry the label set's special label. This
//! lets algorithms treat initial and final weights as ordinary transitions.
//!
//! The read-only part of the contract is [`Automaton`]; [`AutomatonMut`]
//! adds mutation. Algorithms must ask the automaton for its `pre` and
//! `post` states rather than assume their handles: a transposed view swaps
//! them.

mod decorator;
mod mutable;
mod partition;
mod transpose;

pub use decorator::AutomatonDecorator;
pub use mutable::MutableAutomaton;
pub use partition::PartitionAutomaton;
pub use transpose::TransposeAutomaton;

pub(crate) use decorator::forward_automaton;

use crate::context::Context;
use crate::labelset::LabelSet;
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

/// Handle of a state.
pub type StateId = usize;

/// Handle of a transition.
pub type TransitionId = usize;

/// The handle of the `pre` state of a [`MutableAutomaton`].
pub const PRE: StateId = 0;

/// The handle of the `post` state of a [`MutableAutomaton`].
pub const POST: StateId = 1;

/// Read access to a weighted automaton.
///
/// `states`, `transitions`, `out` and `in_` hide the sentinel states and
/// the transitions that touch them; the `all_` variants show everything.
pub trait Automaton {
    /// The label set of the context.
    type Labelset: LabelSet;
    /// The weight set of the context.
    type Weightset: WeightSet;

    /// The static type name, e.g. `mutable_automaton<lal_char_b>`.
    fn sname() -> String;

    /// The full type descriptor, with alphabets.
    fn vname(&self) -> String;

    /// The context.
    fn context(&self) -> &Context<Self::Labelset, Self::Weightset>;

    /// The label set of the context.
    fn labelset(&self) -> &Self::Labelset {
        self.context().labelset()
    }

    /// The weight set of the context.
    fn weightset(&self) -> &Self::Weightset {
        self.context().weightset()
    }

    /// The sentinel preceding initial states.
    fn pre(&self) -> StateId;

    /// The sentinel following final states.
    fn post(&self) -> StateId;

    /// Live states, `pre` and `post` included, in increasing order.
    fn all_states(&self) -> Vec<StateId>;

    /// Live transitions, initial and final ones included.
    fn all_transitions(&self) -> Vec<TransitionId>;

    /// Whether `s` is a live state.
    fn has_state(&self, s: StateId) -> bool;

    /// Whether `t` is a live transition.
    fn has_transition(&self, t: TransitionId) -> bool;

    /// Source of `t`.
    fn src_of(&self, t: TransitionId) -> StateId;

    /// Destination of `t`.
    fn dst_of(&self, t: TransitionId) -> StateId;

    /// Label of `t`.
    fn label_of(&self, t: TransitionId) -> <Self::Labelset as ValueSet>::Value;

    /// Weight of `t`.
    fn weight_of(&self, t: TransitionId) -> <Self::Weightset as ValueSet>::Value;

    /// Transitions leaving `s`, final transition included.
    fn all_out(&self, s: StateId) -> Vec<TransitionId>;

    /// Transitions entering `s`, initial transition included.
    fn all_in(&self, s: StateId) -> Vec<TransitionId>;

    /// The transition `src -> dst` labeled `label`, if any.
    fn get_transition(
        &self,
        src: StateId,
        dst: StateId,
        label: &<Self::Labelset as ValueSet>::Value,
    ) -> Option<TransitionId>;

    /// Live states, sentinels excluded.
    fn states(&self) -> Vec<StateId> {
        let (pre, post) = (self.pre(), self.post());
        self.all_states()
            .into_iter()
            .filter(|s| *s != pre && *s != post)
            .collect()
    }

    /// Transitions between non-sentinel states.
    fn transitions(&self) -> Vec<TransitionId> {
        let (pre, post) = (self.pre(), self.post());
        self.all_transitions()
            .into_iter()
            .filter(|t| self.src_of(*t) != pre && self.dst_of(*t) != post)
            .collect()
    }

    /// Transitions leaving `s`, except the one to `post`.
    fn out(&self, s: StateId) -> Vec<TransitionId> {
        let post = self.post();
        self.all_out(s)
            .into_iter()
            .filter(|t| self.dst_of(*t) != post)
            .collect()
    }

    /// Transitions entering `s`, except the one from `pre`.
    fn in_(&self, s: StateId) -> Vec<TransitionId> {
        let pre = self.pre();
        self.all_in(s)
            .into_iter()
            .filter(|t| self.src_of(*t) != pre)
            .collect()
    }

    /// Transitions leaving `s` labeled `label`.
    fn out_with_label(
        &self,
        s: StateId,
        label: &<Self::Labelset as ValueSet>::Value,
    ) -> Vec<TransitionId> {
        self.out(s)
            .into_iter()
            .filter(|t| self.label_of(*t) == *label)
            .collect()
    }

    /// Transitions entering `s` labeled `label`.
    fn in_with_label(
        &self,
        s: StateId,
        label: &<Self::Labelset as ValueSet>::Value,
    ) -> Vec<TransitionId> {
        self.in_(s)
            .into_iter()
            .filter(|t| self.label_of(*t) == *label)
            .collect()
    }

    /// Number of states, sentinels excluded.
    fn num_states(&self) -> usize {
        self.states().len()
    }

    /// Number of transitions between non-sentinel states.
    fn num_transitions(&self) -> usize {
        self.transitions().len()
    }

    /// The initial transitions.
    fn initial_transitions(&self) -> Vec<TransitionId> {
        self.all_out(self.pre())
    }

    /// The final transitions.
    fn final_transitions(&self) -> Vec<TransitionId> {
        self.all_in(self.post())
    }

    /// The initial weight of `s`, zero if `s` is not initial.
    fn get_initial_weight(&self, s: StateId) -> <Self::Weightset as ValueSet>::Value {
        let special = self.labelset().special();
        self.get_transition(self.pre(), s, &special)
            .map(|t| self.weight_of(t))
            .unwrap_or_else(|| self.weightset().zero())
    }

    /// The final weight of `s`, zero if `s` is not final.
    fn get_final_weight(&self, s: StateId) -> <Self::Weightset as ValueSet>::Value {
        let special = self.labelset().special();
        self.get_transition(s, self.post(), &special)
            .map(|t| self.weight_of(t))
            .unwrap_or_else(|| self.weightset().zero())
    }

    /// Whether `s` is initial.
    fn is_initial(&self, s: StateId) -> bool {
        !self.weightset().is_zero(&self.get_initial_weight(s))
    }

    /// Whether `s` is final.
    fn is_final(&self, s: StateId) -> bool {
        !self.weightset().is_zero(&self.get_final_weight(s))
    }

    /// Whether `t` is a spontaneous transition between non-sentinel states.
    fn is_spontaneous(&self, t: TransitionId) -> bool {
        self.src_of(t) != self.pre()
            && self.dst_of(t) != self.post()
            && self.labelset().is_one(&self.label_of(t))
    }
}

/// Mutation of a weighted automaton.
///
/// Stored weights are never zero: every operation that would store a zero
/// weight deletes the transition instead.
pub trait AutomatonMut: Automaton {
    /// Add a fresh state.
    fn new_state(&mut self) -> StateId;

    /// Delete `s` and every transition touching it.
    fn del_state(&mut self, s: StateId);

    /// Add a transition.
    ///
    /// `weight` must be non-zero and there must be no transition with the
    /// same source, destination and label.
    fn new_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: <Self::Labelset as ValueSet>::Value,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> TransitionId;

    /// Delete `t`.
    fn del_transition(&mut self, t: TransitionId);

    /// Set the weight of `t`; a zero weight deletes it. Returns the weight.
    fn set_weight(
        &mut self,
        t: TransitionId,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value;

    /// Set the weight of the transition `src -> dst` labeled `label`,
    /// creating or deleting it as needed.
    fn set_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: <Self::Labelset as ValueSet>::Value,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> Option<TransitionId> {
        match self.get_transition(src, dst, &label) {
            Some(t) if self.weightset().is_zero(&weight) => {
                self.del_transition(t);
                None
            }
            Some(t) => {
                self.set_weight(t, weight);
                Some(t)
            }
            None if self.weightset().is_zero(&weight) => None,
            None => Some(self.new_transition(src, dst, label, weight)),
        }
    }

    /// Add `weight` to the transition `src -> dst` labeled `label`, creating
    /// it if needed. Returns the new weight.
    fn add_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: <Self::Labelset as ValueSet>::Value,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value {
        match self.get_transition(src, dst, &label) {
            Some(t) => self.add_weight(t, weight),
            None => {
                if !self.weightset().is_zero(&weight) {
                    self.new_transition(src, dst, label, weight.clone());
                }
                weight
            }
        }
    }

    /// Add `weight` to the weight of `t`.
    fn add_weight(
        &mut self,
        t: TransitionId,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value {
        let w = self.weightset().add(&self.weight_of(t), &weight);
        self.set_weight(t, w)
    }

    /// Multiply the weight of `t` by `weight` on the left.
    fn lmul_weight(
        &mut self,
        t: TransitionId,
        weight: &<Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value {
        let w = self.weightset().mul(weight, &self.weight_of(t));
        self.set_weight(t, w)
    }

    /// Multiply the weight of `t` by `weight` on the right.
    fn rmul_weight(
        &mut self,
        t: TransitionId,
        weight: &<Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value {
        let w = self.weightset().mul(&self.weight_of(t), weight);
        self.set_weight(t, w)
    }

    /// Set the initial weight of `s`.
    fn set_initial(&mut self, s: StateId, weight: <Self::Weightset as ValueSet>::Value) {
        let (pre, special) = (self.pre(), self.labelset().special());
        self.set_transition(pre, s, special, weight);
    }

    /// Set the final weight of `s`.
    fn set_final(&mut self, s: StateId, weight: <Self::Weightset as ValueSet>::Value) {
        let (post, special) = (self.post(), self.labelset().special());
        self.set_transition(s, post, special, weight);
    }

    /// Add to the initial weight of `s`.
    fn add_initial(
        &mut self,
        s: StateId,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value {
        let (pre, special) = (self.pre(), self.labelset().special());
        self.add_transition(pre, s, special, weight)
    }

    /// Add to the final weight of `s`.
    fn add_final(
        &mut self,
        s: StateId,
        weight: <Self::Weightset as ValueSet>::Value,
    ) -> <Self::Weightset as ValueSet>::Value {
        let (post, special) = (self.post(), self.labelset().special());
        self.add_transition(s, post, special, weight)
    }

    /// Make `s` non-initial.
    fn unset_initial(&mut self, s: StateId) {
        let zero = self.weightset().zero();
        self.set_initial(s, zero);
    }

    /// Make `s` non-final.
    fn unset_final(&mut self, s: StateId) {
        let zero = self.weightset().zero();
        self.set_final(s, zero);
    }
}
