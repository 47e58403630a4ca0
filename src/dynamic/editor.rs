//! Building automata from text, without knowing their type statically.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::automaton::{Automaton, AutomatonMut, MutableAutomaton, StateId};
use crate::labelset::LabelSet;
use crate::weightset::WeightSet;
use crate::Result;

use super::DynAutomaton;

/// The typed half of an [`AutomatonEditor`].
pub trait EditorBase: Send {
    /// Add a state.
    fn new_state(&mut self) -> StateId;
    /// Add `weight` (one if absent) to the initial weight of `s`.
    fn add_initial(&mut self, s: StateId, weight: Option<&str>) -> Result<()>;
    /// Add `weight` (one if absent) to the final weight of `s`.
    fn add_final(&mut self, s: StateId, weight: Option<&str>) -> Result<()>;
    /// Add `weight` (one if absent) to the transition `src --label--> dst`.
    fn add_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: &str,
        weight: Option<&str>,
    ) -> Result<()>;
    /// The automaton built so far.
    fn finish(self: Box<Self>) -> DynAutomaton;
}

/// An [`EditorBase`] filling a [`MutableAutomaton`].
#[derive(Debug)]
pub struct TypedEditor<L: LabelSet, W: WeightSet> {
    aut: MutableAutomaton<L, W>,
}

impl<L: LabelSet, W: WeightSet> TypedEditor<L, W> {
    /// Edit `aut`.
    pub fn new(aut: MutableAutomaton<L, W>) -> Self {
        TypedEditor { aut }
    }

    fn weight(&self, weight: Option<&str>) -> Result<W::Value> {
        let ws = self.aut.weightset();
        match weight {
            Some(text) => Ok(ws.conv(text)?),
            None => Ok(ws.one()),
        }
    }
}

impl<L: LabelSet, W: WeightSet> EditorBase for TypedEditor<L, W> {
    fn new_state(&mut self) -> StateId {
        self.aut.new_state()
    }

    fn add_initial(&mut self, s: StateId, weight: Option<&str>) -> Result<()> {
        let w = self.weight(weight)?;
        self.aut.add_initial(s, w);
        Ok(())
    }

    fn add_final(&mut self, s: StateId, weight: Option<&str>) -> Result<()> {
        let w = self.weight(weight)?;
        self.aut.add_final(s, w);
        Ok(())
    }

    fn add_transition(
        &mut self,
        src: StateId,
        dst: StateId,
        label: &str,
        weight: Option<&str>,
    ) -> Result<()> {
        let l = self.aut.labelset().conv(label)?;
        let w = self.weight(weight)?;
        self.aut.add_transition(src, dst, l, w);
        Ok(())
    }

    fn finish(self: Box<Self>) -> DynAutomaton {
        DynAutomaton::new(self.aut)
    }
}

/// Builds an automaton of the context it was made for, from state names,
/// label text and weight text.
///
/// States are created on first mention. Repeated transitions, initial or
/// final weights add up.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = dynamic::make_context("lal_char(ab)_z")?;
/// let mut edit = dynamic::make_automaton_editor(&ctx)?;
/// edit.add_initial("p", None)?;
/// edit.add_transition("p", "q", "a", Some("2"))?;
/// edit.add_final("q", None)?;
/// let aut = edit.result();
/// ```
pub struct AutomatonEditor {
    backend: Box<dyn EditorBase>,
    states: FxHashMap<String, StateId>,
}

impl AutomatonEditor {
    /// Wrap a typed editor.
    pub fn new(backend: Box<dyn EditorBase>) -> Self {
        AutomatonEditor {
            backend,
            states: FxHashMap::default(),
        }
    }

    /// The state named `name`, created if needed.
    pub fn add_state(&mut self, name: &str) -> StateId {
        if let Some(s) = self.states.get(name) {
            return *s;
        }
        let s = self.backend.new_state();
        trace!(name, state = s, "new state");
        self.states.insert(name.to_string(), s);
        s
    }

    /// Make `name` initial.
    pub fn add_initial(&mut self, name: &str, weight: Option<&str>) -> Result<()> {
        let s = self.add_state(name);
        self.backend.add_initial(s, weight)
    }

    /// Make `name` final.
    pub fn add_final(&mut self, name: &str, weight: Option<&str>) -> Result<()> {
        let s = self.add_state(name);
        self.backend.add_final(s, weight)
    }

    /// Add a transition; `label` is read by the label set, e.g. `a` or
    /// `\e`.
    pub fn add_transition(
        &mut self,
        src: &str,
        dst: &str,
        label: &str,
        weight: Option<&str>,
    ) -> Result<()> {
        let (src, dst) = (self.add_state(src), self.add_state(dst));
        self.backend.add_transition(src, dst, label, weight)
    }

    /// The handle of the state named `name`.
    pub fn state(&self, name: &str) -> Option<StateId> {
        self.states.get(name).copied()
    }

    /// The automaton.
    pub fn result(self) -> DynAutomaton {
        self.backend.finish()
    }
}

impl std::fmt::Debug for AutomatonEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomatonEditor")
            .field("states", &self.states.len())
            .finish()
    }
}
