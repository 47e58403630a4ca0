//! Automata whose states stand for sets of states of another automaton.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::{forward_automaton, Automaton, AutomatonDecorator, AutomatonMut, StateId, TransitionId};
use crate::valueset::ValueSet;

/// An automaton whose states each remember the set of states of an origin
/// automaton they were built from (e.g. by subset construction).
#[derive(Debug, Clone)]
pub struct PartitionAutomaton<A> {
    aut: A,
    origins: FxHashMap<StateId, BTreeSet<StateId>>,
}

impl<A: Automaton> PartitionAutomaton<A> {
    /// Wrap `aut`, with no origins recorded yet.
    pub fn new(aut: A) -> Self {
        PartitionAutomaton {
            aut,
            origins: FxHashMap::default(),
        }
    }

    /// Record that `s` stands for `origin`.
    pub fn set_origin(&mut self, s: StateId, origin: BTreeSet<StateId>) {
        self.origins.insert(s, origin);
    }

    /// The origin states of `s`, if recorded.
    pub fn origin_of(&self, s: StateId) -> Option<&BTreeSet<StateId>> {
        self.origins.get(&s)
    }

    /// All recorded origins.
    pub fn origins(&self) -> &FxHashMap<StateId, BTreeSet<StateId>> {
        &self.origins
    }
}

impl<A: Automaton> AutomatonDecorator for PartitionAutomaton<A> {
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

impl<A: Automaton> Automaton for PartitionAutomaton<A> {
    type Labelset = A::Labelset;
    type Weightset = A::Weightset;

    fn sname() -> String {
        format!("partition_automaton<{}>", A::sname())
    }

    fn vname(&self) -> String {
        format!("partition_automaton<{}>", self.aut.vname())
    }

    forward_automaton!(aut);
}

impl<A: AutomatonMut> AutomatonMut for PartitionAutomaton<A> {
    fn new_state(&mut self) -> StateId {
        self.aut.new_state()
    }

    fn del_state(&mut self, s: StateId) {
        self.origins.remove(&s);
        self.aut.del_state(s);
    }

    fn new_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: <A::Labelset as ValueSet>::Value,
        weight: <A::Weightset as ValueSet>::Value,
    ) -> TransitionId {
        self.aut.new_transition(src, dst, label, weight)
    }

    fn del_transition(&mut self, t: TransitionId) {
        self.aut.del_transition(t)
    }

    fn set_weight(
        &mut self,
        t: TransitionId,
        weight: <A::Weightset as ValueSet>::Value,
    ) -> <A::Weightset as ValueSet>::Value {
        self.aut.set_weight(t, weight)
    }
}
