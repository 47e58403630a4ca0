//! The transposed view of an automaton.

use super::{Automaton, AutomatonDecorator, AutomatonMut, StateId, TransitionId};
use crate::context::Context;
use crate::labelset::LabelSet;
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

/// An automaton read backwards: sources and destinations are swapped,
/// `pre` and `post` too, and labels and weights are mirrored.
///
/// The view is mutable: changes go through to the wrapped automaton,
/// mirrored back.
#[derive(Debug, Clone)]
pub struct TransposeAutomaton<A> {
    aut: A,
}

impl<A: Automaton> TransposeAutomaton<A> {
    /// View `aut` backwards.
    pub fn new(aut: A) -> Self {
        TransposeAutomaton { aut }
    }
}

impl<A: Automaton> AutomatonDecorator for TransposeAutomaton<A> {
    type Inner = A;

    fn inner(&self) -> &A {
        &self.aut
    }

    fn inner_mut(&mut self) -> &mut A {
        &mut self.aut
    }

    fn into_inner(self) -> A {
        self.aut
    }
}

impl<A: Automaton> Automaton for TransposeAutomaton<A> {
    type Labelset = A::Labelset;
    type Weightset = A::Weightset;

    fn sname() -> String {
        format!("transpose_automaton<{}>", A::sname())
    }

    fn vname(&self) -> String {
        format!("transpose_automaton<{}>", self.aut.vname())
    }

    fn context(&self) -> &Context<A::Labelset, A::Weightset> {
        self.aut.context()
    }

    fn pre(&self) -> StateId {
        self.aut.post()
    }

    fn post(&self) -> StateId {
        self.aut.pre()
    }

    fn all_states(&self) -> Vec<StateId> {
        self.aut.all_states()
    }

    fn all_transitions(&self) -> Vec<TransitionId> {
        self.aut.all_transitions()
    }

    fn has_state(&self, s: StateId) -> bool {
        self.aut.has_state(s)
    }

    fn has_transition(&self, t: TransitionId) -> bool {
        self.aut.has_transition(t)
    }

    fn src_of(&self, t: TransitionId) -> StateId {
        self.aut.dst_of(t)
    }

    fn dst_of(&self, t: TransitionId) -> StateId {
        self.aut.src_of(t)
    }

    fn label_of(&self, t: TransitionId) -> <A::Labelset as ValueSet>::Value {
        self.labelset().transpose(&self.aut.label_of(t))
    }

    fn weight_of(&self, t: TransitionId) -> <A::Weightset as ValueSet>::Value {
        self.weightset().transpose(&self.aut.weight_of(t))
    }

    fn all_out(&self, s: StateId) -> Vec<TransitionId> {
        self.aut.all_in(s)
    }

    fn all_in(&self, s: StateId) -> Vec<TransitionId> {
        self.aut.all_out(s)
    }

    fn get_transition(
        &self,
        src: StateId,
        dst: StateId,
        label: &<A::Labelset as ValueSet>::Value,
    ) -> Option<TransitionId> {
        self.aut
            .get_transition(dst, src, &self.labelset().transpose(label))
    }

    fn num_states(&self) -> usize {
        self.aut.num_states()
    }

    fn num_transitions(&self) -> usize {
        self.aut.num_transitions()
    }
}

impl<A: AutomatonMut> AutomatonMut for TransposeAutomaton<A> {
    fn new_state(&mut self) -> StateId {
        self.aut.new_state()
    }

    fn del_state(&mut self, s: StateId) {
        self.aut.del_state(s)
    }

    fn new_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: <A::Labelset as ValueSet>::Value,
        weight: <A::Weightset as ValueSet>::Value,
    ) -> TransitionId {
        let label = self.labelset().transpose(&label);
        let weight = self.weightset().transpose(&weight);
        self.aut.new_transition(dst, src, label, weight)
    }

    fn del_transition(&mut self, t: TransitionId) {
        self.aut.del_transition(t)
    }

    fn set_weight(
        &mut self,
        t: TransitionId,
        weight: <A::Weightset as ValueSet>::Value,
    ) -> <A::Weightset as ValueSet>::Value {
        let mirrored = self.weightset().transpose(&weight);
        self.aut.set_weight(t, mirrored);
        weight
    }
}
