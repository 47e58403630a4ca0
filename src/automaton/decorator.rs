//! Support for automata that wrap another automaton.

use super::Automaton;

/// An automaton built around another one, forwarding most of the graph
/// contract to it.
pub trait AutomatonDecorator {
    /// The wrapped automaton.
    type Inner: Automaton;

    /// The wrapped automaton.
    fn inner(&self) -> &Self::Inner;

    /// The wrapped automaton, mutably.
    fn inner_mut(&mut self) -> &mut Self::Inner;

    /// Unwrap.
    fn into_inner(self) -> Self::Inner;
}

/// Expand, inside an `impl Automaton for ...` block, the forwarding of the
/// required graph accessors to `self.$field`.
///
/// The naming methods (`sname`, `vname`) and the associated types are left
/// to the decorator.
macro_rules! forward_automaton {
    ($field:ident) => {
        fn context(&self) -> &$crate::context::Context<Self::Labelset, Self::Weightset> {
            self.$field.context()
        }

        fn pre(&self) -> $crate::automaton::StateId {
            self.$field.pre()
        }

        fn post(&self) -> $crate::automaton::StateId {
            self.$field.post()
        }

        fn all_states(&self) -> Vec<$crate::automaton::StateId> {
            self.$field.all_states()
        }

        fn all_transitions(&self) -> Vec<$crate::automaton::TransitionId> {
            self.$field.all_transitions()
        }

        fn has_state(&self, s: $crate::automaton::StateId) -> bool {
            self.$field.has_state(s)
        }

        fn has_transition(&self, t: $crate::automaton::TransitionId) -> bool {
            self.$field.has_transition(t)
        }

        fn src_of(&self, t: $crate::automaton::TransitionId) -> $crate::automaton::StateId {
            self.$field.src_of(t)
        }

        fn dst_of(&self, t: $crate::automaton::TransitionId) -> $crate::automaton::StateId {
            self.$field.dst_of(t)
        }

        fn label_of(
            &self,
            t: $crate::automaton::TransitionId,
        ) -> <Self::Labelset as $crate::valueset::ValueSet>::Value {
            self.$field.label_of(t)
        }

        fn weight_of(
            &self,
            t: $crate::automaton::TransitionId,
        ) -> <Self::Weightset as $crate::valueset::ValueSet>::Value {
            self.$field.weight_of(t)
        }

        fn all_out(&self, s: $crate::automaton::StateId) -> Vec<$crate::automaton::TransitionId> {
            self.$field.all_out(s)
        }

        fn all_in(&self, s: $crate::automaton::StateId) -> Vec<$crate::automaton::TransitionId> {
            self.$field.all_in(s)
        }

        fn get_transition(
            &self,
            src: $crate::automaton::StateId,
            dst: $crate::automaton::StateId,
            label: &<Self::Labelset as $crate::valueset::ValueSet>::Value,
        ) -> Option<$crate::automaton::TransitionId> {
            self.$field.get_transition(src, dst, label)
        }

        fn num_states(&self) -> usize {
            self.$field.num_states()
        }

        fn num_transitions(&self) -> usize {
            self.$field.num_transitions()
        }
    };
}

pub(crate) use forward_automaton;
