//! Dynamic entry points.
//!
//! Each function computes the signature of its arguments, looks it up in
//! the algorithm's registry and calls the static instantiation found
//! there. The typed halves (`*_impl`) downcast their arguments, run the
//! generic algorithm and erase the result.

use std::sync::OnceLock;

use tracing::debug;

use crate::algos::{self, ProperConfig};
use crate::automaton::{Automaton, AutomatonDecorator, MutableAutomaton, TransposeAutomaton};
use crate::context::{AstNode, Context, ContextParser};
use crate::expression::{ExpressionSet, Identities};
use crate::labelset::{LabelSet, WordSet};
use crate::polynomial::PolynomialSet;
use crate::valueset::{Convert, Join};
use crate::weightset::WeightSet;
use crate::Result;

use super::editor::{AutomatonEditor, EditorBase, TypedEditor};
use super::instantiate;
use super::{DynAutomaton, DynContext, DynValue, DynValueSet, Registry, Signature};

/// Builds a context from its parsed descriptor.
pub type MakeContextFn = fn(&AstNode) -> Result<DynContext>;
/// Joins two contexts.
pub type JoinFn = fn(&DynContext, &DynContext) -> Result<DynContext>;
/// Creates a typed editor for a context.
pub type EditorFn = fn(&DynContext) -> Result<Box<dyn EditorBase>>;
/// Epsilon removal.
pub type ProperFn = fn(&DynAutomaton, &ProperConfig) -> Result<DynAutomaton>;
/// An automaton predicate.
pub type PredicateFn = fn(&DynAutomaton) -> Result<bool>;
/// An automaton to automaton algorithm.
pub type UnaryFn = fn(&DynAutomaton) -> Result<DynAutomaton>;
/// An algorithm on two automata.
pub type BinaryFn = fn(&DynAutomaton, &DynAutomaton) -> Result<DynAutomaton>;
/// Evaluation of a word.
pub type EvalFn = fn(&DynAutomaton, &str) -> Result<DynValue>;
/// Enumeration of words up to a length.
pub type EnumerateFn = fn(&DynAutomaton, usize) -> Result<DynValue>;
/// From an expression to an automaton.
pub type ThompsonFn = fn(&DynValue) -> Result<DynAutomaton>;
/// From an automaton to an expression.
pub type ToExpressionFn = fn(&DynAutomaton, Identities) -> Result<DynValue>;
/// Creates an expression set over a context.
pub type MakeExpressionSetFn = fn(&DynContext, Identities) -> Result<DynValueSet>;

macro_rules! registry {
    ($(#[$doc:meta])* $fn_name:ident, $ty:ty, $name:literal, $populate:path) => {
        $(#[$doc])*
        pub fn $fn_name() -> &'static Registry<$ty> {
            static REGISTRY: OnceLock<Registry<$ty>> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                let registry = Registry::new($name);
                $populate(&registry);
                debug!(registry = $name, instantiations = registry.len(), "populated");
                registry
            })
        }
    };
}

registry!(
    /// The `make_context` registry, keyed by context type.
    make_context_registry, MakeContextFn, "make_context", instantiate::make_context
);
registry!(
    /// The `join` registry, keyed by the two context types.
    join_registry, JoinFn, "join", instantiate::join
);
registry!(
    /// The `make_automaton_editor` registry, keyed by context type.
    editor_registry, EditorFn, "make_automaton_editor", instantiate::editor
);
registry!(
    /// The `proper` registry.
    proper_registry, ProperFn, "proper", instantiate::proper
);
registry!(
    /// The `is_proper` registry.
    is_proper_registry, PredicateFn, "is_proper", instantiate::is_proper
);
registry!(
    /// The `sum` registry, keyed by the two automaton types.
    sum_registry, BinaryFn, "sum", instantiate::sum
);
registry!(
    /// The `product` registry, keyed by the two automaton types.
    product_registry, BinaryFn, "product", instantiate::product
);
registry!(
    /// The `determinize` registry.
    determinize_registry, UnaryFn, "determinize", instantiate::determinize
);
registry!(
    /// The `transpose` registry.
    transpose_registry, UnaryFn, "transpose", instantiate::transpose
);
registry!(
    /// The `strip` registry.
    strip_registry, UnaryFn, "strip", instantiate::strip
);
registry!(
    /// The `eval` registry.
    eval_registry, EvalFn, "eval", instantiate::eval
);
registry!(
    /// The `enumerate` registry.
    enumerate_registry, EnumerateFn, "enumerate", instantiate::enumerate
);
registry!(
    /// The `thompson` registry, keyed by expression set type.
    thompson_registry, ThompsonFn, "thompson", instantiate::thompson
);
registry!(
    /// The `to_expression` registry.
    to_expression_registry, ToExpressionFn, "to_expression", instantiate::to_expression
);
registry!(
    /// The `make_expressionset` registry, keyed by context type.
    make_expressionset_registry,
    MakeExpressionSetFn,
    "make_expressionset",
    instantiate::make_expressionset
);

/// The context described by `descriptor`, e.g. `lal_char(ab)_b`.
pub fn make_context(descriptor: &str) -> Result<DynContext> {
    let ast = ContextParser::new(descriptor).parse_context()?;
    let f = make_context_registry().get(&Signature::new([ast.sname()]))?;
    f(&ast)
}

/// The context of `aut`.
pub fn context_of(aut: &DynAutomaton) -> DynContext {
    aut.context()
}

/// The least general context both `lhs` and `rhs` convert into.
pub fn join(lhs: &DynContext, rhs: &DynContext) -> Result<DynContext> {
    let f = join_registry().get(&Signature::new([lhs.sname(), rhs.sname()]))?;
    f(lhs, rhs)
}

/// An editor building a new automaton of context `ctx`.
pub fn make_automaton_editor(ctx: &DynContext) -> Result<AutomatonEditor> {
    let f = editor_registry().get(&Signature::new([ctx.sname()]))?;
    Ok(AutomatonEditor::new(f(ctx)?))
}

/// See [`algos::proper_with`].
pub fn proper(aut: &DynAutomaton, config: ProperConfig) -> Result<DynAutomaton> {
    let f = proper_registry().get(&Signature::new([aut.sname()]))?;
    f(aut, &config)
}

/// See [`algos::is_proper`].
pub fn is_proper(aut: &DynAutomaton) -> Result<bool> {
    let f = is_proper_registry().get(&Signature::new([aut.sname()]))?;
    f(aut)
}

/// See [`algos::sum`].
pub fn sum(lhs: &DynAutomaton, rhs: &DynAutomaton) -> Result<DynAutomaton> {
    let f = sum_registry().get(&Signature::new([lhs.sname(), rhs.sname()]))?;
    f(lhs, rhs)
}

/// See [`algos::product`].
pub fn product(lhs: &DynAutomaton, rhs: &DynAutomaton) -> Result<DynAutomaton> {
    let f = product_registry().get(&Signature::new([lhs.sname(), rhs.sname()]))?;
    f(lhs, rhs)
}

/// See [`algos::determinize`].
pub fn determinize(aut: &DynAutomaton) -> Result<DynAutomaton> {
    let f = determinize_registry().get(&Signature::new([aut.sname()]))?;
    f(aut)
}

/// The transposed automaton. Transposing a transposed view gives back
/// the automaton it wraps.
pub fn transpose(aut: &DynAutomaton) -> Result<DynAutomaton> {
    let f = transpose_registry().get(&Signature::new([aut.sname()]))?;
    f(aut)
}

/// See [`algos::strip`].
pub fn strip(aut: &DynAutomaton) -> Result<DynAutomaton> {
    let f = strip_registry().get(&Signature::new([aut.sname()]))?;
    f(aut)
}

/// See [`algos::eval`].
pub fn eval(aut: &DynAutomaton, word: &str) -> Result<DynValue> {
    let f = eval_registry().get(&Signature::new([aut.sname()]))?;
    f(aut, word)
}

/// See [`algos::enumerate`].
pub fn enumerate(aut: &DynAutomaton, max_len: usize) -> Result<DynValue> {
    let f = enumerate_registry().get(&Signature::new([aut.sname()]))?;
    f(aut, max_len)
}

/// See [`algos::thompson`]; `expression` must be a value of an expression
/// set.
pub fn thompson(expression: &DynValue) -> Result<DynAutomaton> {
    let f = thompson_registry().get(&Signature::new([expression.sname()]))?;
    f(expression)
}

/// See [`algos::to_expression`].
pub fn to_expression(aut: &DynAutomaton, identities: Identities) -> Result<DynValue> {
    let f = to_expression_registry().get(&Signature::new([aut.sname()]))?;
    f(aut, identities)
}

/// The expression set over `ctx`.
pub fn make_expressionset(ctx: &DynContext, identities: Identities) -> Result<DynValueSet> {
    let f = make_expressionset_registry().get(&Signature::new([ctx.sname()]))?;
    f(ctx, identities)
}

pub(super) fn make_context_impl<L: LabelSet, W: WeightSet>(ast: &AstNode) -> Result<DynContext> {
    Ok(DynContext::new(Context::<L, W>::from_ast(ast)?))
}

pub(super) fn join_impl<L1, W1, L2, W2>(lhs: &DynContext, rhs: &DynContext) -> Result<DynContext>
where
    L1: LabelSet + Join<L2>,
    W1: WeightSet + Join<W2>,
    L2: LabelSet,
    W2: WeightSet,
    <L1 as Join<L2>>::Output: LabelSet,
    <W1 as Join<W2>>::Output: WeightSet,
{
    let lhs = lhs.downcast::<L1, W1>()?;
    let rhs = rhs.downcast::<L2, W2>()?;
    Ok(DynContext::new(lhs.join(rhs)))
}

pub(super) fn editor_impl<L: LabelSet, W: WeightSet>(
    ctx: &DynContext,
) -> Result<Box<dyn EditorBase>> {
    let ctx = ctx.downcast::<L, W>()?.clone();
    Ok(Box::new(TypedEditor::new(MutableAutomaton::new(ctx))))
}

pub(super) fn proper_impl<A>(aut: &DynAutomaton, config: &ProperConfig) -> Result<DynAutomaton>
where
    A: Automaton + 'static,
{
    let aut = aut.downcast::<A>()?;
    Ok(DynAutomaton::new(algos::proper_with(aut, config)?))
}

pub(super) fn is_proper_impl<A>(aut: &DynAutomaton) -> Result<bool>
where
    A: Automaton + 'static,
{
    Ok(algos::is_proper(aut.downcast::<A>()?))
}

pub(super) fn sum_impl<L1, W1, L2, W2>(
    lhs: &DynAutomaton,
    rhs: &DynAutomaton,
) -> Result<DynAutomaton>
where
    L1: LabelSet + Join<L2>,
    W1: WeightSet + Join<W2>,
    L2: LabelSet,
    W2: WeightSet,
    <L1 as Join<L2>>::Output: LabelSet + Convert<L1> + Convert<L2>,
    <W1 as Join<W2>>::Output: WeightSet + Convert<W1> + Convert<W2>,
{
    let lhs = lhs.downcast::<MutableAutomaton<L1, W1>>()?;
    let rhs = rhs.downcast::<MutableAutomaton<L2, W2>>()?;
    Ok(DynAutomaton::new(algos::sum(lhs, rhs)))
}

pub(super) fn product_impl<L1, W1, L2, W2>(
    lhs: &DynAutomaton,
    rhs: &DynAutomaton,
) -> Result<DynAutomaton>
where
    L1: LabelSet + Join<L2>,
    W1: WeightSet + Join<W2>,
    L2: LabelSet,
    W2: WeightSet,
    <L1 as Join<L2>>::Output: LabelSet + Convert<L1> + Convert<L2>,
    <W1 as Join<W2>>::Output: WeightSet + Convert<W1> + Convert<W2>,
{
    let lhs = lhs.downcast::<MutableAutomaton<L1, W1>>()?;
    let rhs = rhs.downcast::<MutableAutomaton<L2, W2>>()?;
    Ok(DynAutomaton::new(algos::product(lhs, rhs)?))
}

pub(super) fn determinize_impl<L: LabelSet, W: WeightSet>(
    aut: &DynAutomaton,
) -> Result<DynAutomaton> {
    let aut = aut.downcast::<MutableAutomaton<L, W>>()?;
    Ok(DynAutomaton::new(algos::determinize(aut)?))
}

pub(super) fn transpose_impl<L: LabelSet, W: WeightSet>(
    aut: &DynAutomaton,
) -> Result<DynAutomaton> {
    let aut = aut.downcast::<MutableAutomaton<L, W>>()?;
    Ok(DynAutomaton::new(algos::transpose(aut.clone())))
}

pub(super) fn untranspose_impl<L: LabelSet, W: WeightSet>(
    aut: &DynAutomaton,
) -> Result<DynAutomaton> {
    let aut = aut.downcast::<TransposeAutomaton<MutableAutomaton<L, W>>>()?;
    Ok(DynAutomaton::new(aut.inner().clone()))
}

pub(super) fn strip_impl<A>(aut: &DynAutomaton) -> Result<DynAutomaton>
where
    A: Automaton + 'static,
{
    Ok(DynAutomaton::new(algos::strip(aut.downcast::<A>()?)))
}

pub(super) fn eval_impl<A>(aut: &DynAutomaton, word: &str) -> Result<DynValue>
where
    A: Automaton + 'static,
    A::Labelset: LabelSet<Word = WordSet>,
{
    let aut = aut.downcast::<A>()?;
    let w = algos::eval(aut, word)?;
    Ok(DynValue::new(aut.weightset().clone(), w))
}

pub(super) fn enumerate_impl<L, W>(aut: &DynAutomaton, max_len: usize) -> Result<DynValue>
where
    L: LabelSet<Word = WordSet>,
    W: WeightSet,
{
    let aut = aut.downcast::<MutableAutomaton<L, W>>()?;
    let poly = algos::enumerate(aut, max_len)?;
    let ps = PolynomialSet::new(Context::new(
        aut.labelset().word_labelset(),
        aut.weightset().clone(),
    ));
    Ok(DynValue::new(ps, poly))
}

pub(super) fn thompson_impl<L: LabelSet, W: WeightSet>(e: &DynValue) -> Result<DynAutomaton> {
    let e = e.downcast::<ExpressionSet<L, W>>()?;
    Ok(DynAutomaton::new(algos::thompson(&e.set, &e.value)?))
}

pub(super) fn to_expression_impl<L: LabelSet, W: WeightSet>(
    aut: &DynAutomaton,
    identities: Identities,
) -> Result<DynValue> {
    let aut = aut.downcast::<MutableAutomaton<L, W>>()?;
    let e = algos::to_expression(aut, identities);
    Ok(DynValue::new(
        ExpressionSet::new(aut.context().clone(), identities),
        e,
    ))
}

pub(super) fn make_expressionset_impl<L: LabelSet, W: WeightSet>(
    ctx: &DynContext,
    identities: Identities,
) -> Result<DynValueSet> {
    let ctx = ctx.downcast::<L, W>()?.clone();
    Ok(DynValueSet::new(ExpressionSet::new(ctx, identities)))
}
