//! Type-erased handles: contexts, automata, value sets and values.
//!
//! Each handle wraps an `Arc<dyn ...Base>` whose concrete type is one of
//! the static instantiations. Handles know their run-time type name, which
//! is what the registries key on, and can be downcast back by the
//! instantiation that expects them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::automaton::Automaton;
use crate::context::{Context, ParseError};
use crate::labelset::LabelSet;
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::DispatchError;

fn downcast_ref<'a, T: Any>(
    any: &'a dyn Any,
    expected: impl FnOnce() -> String,
    found: &str,
) -> Result<&'a T, DispatchError> {
    any.downcast_ref::<T>()
        .ok_or_else(|| DispatchError::WrongType {
            expected: expected(),
            found: found.to_string(),
        })
}

/// Object-safe view of a [`Context`].
pub trait ContextBase: fmt::Debug + Send + Sync {
    /// The type name, e.g. `lal_char_b`.
    fn sname(&self) -> String;
    /// The full descriptor, e.g. `lal_char(ab)_b`.
    fn vname(&self) -> String;
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<L: LabelSet, W: WeightSet> ContextBase for Context<L, W> {
    fn sname(&self) -> String {
        Context::<L, W>::sname()
    }

    fn vname(&self) -> String {
        Context::vname(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A context of any type.
#[derive(Debug, Clone)]
pub struct DynContext(Arc<dyn ContextBase>);

impl DynContext {
    /// Erase `ctx`.
    pub fn new<L: LabelSet, W: WeightSet>(ctx: Context<L, W>) -> Self {
        DynContext(Arc::new(ctx))
    }

    /// The type name.
    pub fn sname(&self) -> String {
        self.0.sname()
    }

    /// The full descriptor.
    pub fn vname(&self) -> String {
        self.0.vname()
    }

    /// The wrapped context, if it has type `Context<L, W>`.
    pub fn downcast<L: LabelSet, W: WeightSet>(&self) -> Result<&Context<L, W>, DispatchError> {
        downcast_ref(self.0.as_any(), Context::<L, W>::sname, &self.sname())
    }
}

impl fmt::Display for DynContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vname())
    }
}

/// Object-safe view of an [`Automaton`].
pub trait AutomatonBase: fmt::Debug + Send + Sync {
    /// The type name, e.g. `mutable_automaton<lal_char_b>`.
    fn sname(&self) -> String;
    /// The full type descriptor.
    fn vname(&self) -> String;
    /// The context.
    fn context(&self) -> DynContext;
    /// Number of states, sentinels excluded.
    fn num_states(&self) -> usize;
    /// Number of transitions, initial and final ones excluded.
    fn num_transitions(&self) -> usize;
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<A> AutomatonBase for A
where
    A: Automaton + fmt::Debug + Send + Sync + 'static,
{
    fn sname(&self) -> String {
        <A as Automaton>::sname()
    }

    fn vname(&self) -> String {
        Automaton::vname(self)
    }

    fn context(&self) -> DynContext {
        DynContext::new(Automaton::context(self).clone())
    }

    fn num_states(&self) -> usize {
        Automaton::num_states(self)
    }

    fn num_transitions(&self) -> usize {
        Automaton::num_transitions(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An automaton of any type.
#[derive(Debug, Clone)]
pub struct DynAutomaton(Arc<dyn AutomatonBase>);

impl DynAutomaton {
    /// Erase `aut`.
    pub fn new<A>(aut: A) -> Self
    where
        A: Automaton + fmt::Debug + Send + Sync + 'static,
    {
        DynAutomaton(Arc::new(aut))
    }

    /// The type name.
    pub fn sname(&self) -> String {
        self.0.sname()
    }

    /// The full type descriptor.
    pub fn vname(&self) -> String {
        self.0.vname()
    }

    /// The context.
    pub fn context(&self) -> DynContext {
        self.0.context()
    }

    /// Number of states, sentinels excluded.
    pub fn num_states(&self) -> usize {
        self.0.num_states()
    }

    /// Number of transitions between states.
    pub fn num_transitions(&self) -> usize {
        self.0.num_transitions()
    }

    /// The wrapped automaton, if it has type `A`.
    pub fn downcast<A>(&self) -> Result<&A, DispatchError>
    where
        A: Automaton + 'static,
    {
        downcast_ref(self.0.as_any(), <A as Automaton>::sname, &self.sname())
    }
}

impl fmt::Display for DynAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vname())
    }
}

/// Object-safe view of a [`ValueSet`].
pub trait ValueSetBase: fmt::Debug + Send + Sync {
    /// The type name.
    fn sname(&self) -> String;
    /// The full descriptor.
    fn vname(&self) -> String;
    /// Read a value of this set.
    fn conv_value(&self, input: &str) -> Result<DynValue, ParseError>;
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<S: ValueSet> ValueSetBase for S {
    fn sname(&self) -> String {
        <S as ValueSet>::sname()
    }

    fn vname(&self) -> String {
        ValueSet::vname(self)
    }

    fn conv_value(&self, input: &str) -> Result<DynValue, ParseError> {
        Ok(DynValue::new(self.clone(), self.conv(input)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value set of any type: weight set, expression set, polynomial set.
#[derive(Debug, Clone)]
pub struct DynValueSet(Arc<dyn ValueSetBase>);

impl DynValueSet {
    /// Erase `set`.
    pub fn new<S: ValueSet>(set: S) -> Self {
        DynValueSet(Arc::new(set))
    }

    /// The type name.
    pub fn sname(&self) -> String {
        self.0.sname()
    }

    /// The full descriptor.
    pub fn vname(&self) -> String {
        self.0.vname()
    }

    /// Read a value.
    pub fn conv(&self, input: &str) -> Result<DynValue, ParseError> {
        self.0.conv_value(input)
    }

    /// The wrapped set, if it has type `S`.
    pub fn downcast<S: ValueSet>(&self) -> Result<&S, DispatchError> {
        downcast_ref(self.0.as_any(), <S as ValueSet>::sname, &self.sname())
    }
}

impl fmt::Display for DynValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vname())
    }
}

/// A value together with the set it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue<S: ValueSet> {
    /// The set.
    pub set: S,
    /// The value.
    pub value: S::Value,
}

/// Object-safe view of a [`TypedValue`].
pub trait ValueBase: fmt::Debug + Send + Sync {
    /// The type name of the value set.
    fn sname(&self) -> String;
    /// The value, printed by its set.
    fn print(&self) -> String;
    /// The value set, erased.
    fn valueset(&self) -> DynValueSet;
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<S: ValueSet> ValueBase for TypedValue<S> {
    fn sname(&self) -> String {
        <S as ValueSet>::sname()
    }

    fn print(&self) -> String {
        self.set.print(&self.value)
    }

    fn valueset(&self) -> DynValueSet {
        DynValueSet::new(self.set.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value of any type, e.g. the weight returned by `eval`.
#[derive(Debug, Clone)]
pub struct DynValue(Arc<dyn ValueBase>);

impl DynValue {
    /// Erase `value`, an element of `set`.
    pub fn new<S: ValueSet>(set: S, value: S::Value) -> Self {
        DynValue(Arc::new(TypedValue { set, value }))
    }

    /// The type name of the value set.
    pub fn sname(&self) -> String {
        self.0.sname()
    }

    /// The value, printed by its set.
    pub fn print(&self) -> String {
        self.0.print()
    }

    /// The value set.
    pub fn valueset(&self) -> DynValueSet {
        self.0.valueset()
    }

    /// The wrapped value, if its set has type `S`.
    pub fn downcast<S: ValueSet>(&self) -> Result<&TypedValue<S>, DispatchError> {
        downcast_ref(self.0.as_any(), <S as ValueSet>::sname, &self.sname())
    }
}

impl fmt::Display for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}
