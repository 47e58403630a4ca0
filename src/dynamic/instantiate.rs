//! The built-in instantiations.
//!
//! Contexts: `lal_char`, `lan<lal_char>`, `law_char`, `lao` and
//! `lat<lan<lal_char>,lan<lal_char>>`, each weighted by `b`, `z`, `q` and
//! `zmin`, plus letters weighted by Boolean expressions. Binary operations
//! are instantiated for every pair whose join exists.

use crate::automaton::{Automaton, MutableAutomaton, PartitionAutomaton, TransposeAutomaton};
use crate::context::Context;
use crate::expression::ExpressionSet;
use crate::labelset::{LabelSet, LalChar, LanChar, LatChar, LawChar, Lao, WordSet};
use crate::valueset::{Convert, Join, ValueSet};
use crate::weightset::{WeightSet, B, Q, Z, ZMin};

use super::algos::*;
use super::{Registry, Signature};

/// Call `$f::<L, W>($reg)` for every built-in context.
macro_rules! for_each_context {
    (@weights $f:ident, $reg:expr, $l:ty) => {
        $f::<$l, B>($reg);
        $f::<$l, Z>($reg);
        $f::<$l, Q>($reg);
        $f::<$l, ZMin>($reg);
    };
    ($f:ident, $reg:expr) => {
        for_each_context!(@weights $f, $reg, LalChar);
        for_each_context!(@weights $f, $reg, LanChar);
        for_each_context!(@weights $f, $reg, LawChar);
        for_each_context!(@weights $f, $reg, Lao);
        for_each_context!(@weights $f, $reg, LatChar);
        $f::<LalChar, ExpressionSet<LalChar, B>>($reg);
        $f::<LanChar, ExpressionSet<LalChar, B>>($reg);
    };
}

/// The built-in contexts whose labels read as words.
macro_rules! for_each_word_context {
    (@weights $f:ident, $reg:expr, $l:ty) => {
        $f::<$l, B>($reg);
        $f::<$l, Z>($reg);
        $f::<$l, Q>($reg);
        $f::<$l, ZMin>($reg);
    };
    ($f:ident, $reg:expr) => {
        for_each_word_context!(@weights $f, $reg, LalChar);
        for_each_word_context!(@weights $f, $reg, LanChar);
        for_each_word_context!(@weights $f, $reg, LawChar);
    };
}

/// Call `$f::<L1, W1, L2, W2>($reg)` for every pair of built-in contexts
/// that have a join.
macro_rules! for_each_context_pair {
    (@weights $f:ident, $reg:expr, $l1:ty, $l2:ty) => {
        $f::<$l1, B, $l2, B>($reg);
        $f::<$l1, Z, $l2, Z>($reg);
        $f::<$l1, Q, $l2, Q>($reg);
        $f::<$l1, ZMin, $l2, ZMin>($reg);
        $f::<$l1, B, $l2, Z>($reg);
        $f::<$l1, Z, $l2, B>($reg);
        $f::<$l1, B, $l2, Q>($reg);
        $f::<$l1, Q, $l2, B>($reg);
        $f::<$l1, Z, $l2, Q>($reg);
        $f::<$l1, Q, $l2, Z>($reg);
        $f::<$l1, B, $l2, ZMin>($reg);
        $f::<$l1, ZMin, $l2, B>($reg);
    };
    (@labels $f:ident, $reg:expr, $l1:ty) => {
        for_each_context_pair!(@weights $f, $reg, $l1, LalChar);
        for_each_context_pair!(@weights $f, $reg, $l1, LanChar);
        for_each_context_pair!(@weights $f, $reg, $l1, LawChar);
        for_each_context_pair!(@weights $f, $reg, $l1, Lao);
    };
    ($f:ident, $reg:expr) => {
        for_each_context_pair!(@labels $f, $reg, LalChar);
        for_each_context_pair!(@labels $f, $reg, LanChar);
        for_each_context_pair!(@labels $f, $reg, LawChar);
        for_each_context_pair!(@labels $f, $reg, Lao);
        for_each_context_pair!(@weights $f, $reg, LatChar, LatChar);
        $f::<LalChar, ExpressionSet<LalChar, B>, LalChar, ExpressionSet<LalChar, B>>($reg);
    };
}

fn sig(names: impl IntoIterator<Item = String>) -> Signature {
    Signature::new(names)
}

fn mutable<L: LabelSet, W: WeightSet>() -> String {
    MutableAutomaton::<L, W>::sname()
}

fn transposed<L: LabelSet, W: WeightSet>() -> String {
    TransposeAutomaton::<MutableAutomaton<L, W>>::sname()
}

fn partition<L: LabelSet, W: WeightSet>() -> String {
    PartitionAutomaton::<MutableAutomaton<L, W>>::sname()
}

pub(super) fn make_context(reg: &Registry<MakeContextFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<MakeContextFn>) {
        reg.register(sig([Context::<L, W>::sname()]), make_context_impl::<L, W>);
    }
    for_each_context!(one, reg);
}

pub(super) fn join(reg: &Registry<JoinFn>) {
    fn one<L1, W1, L2, W2>(reg: &Registry<JoinFn>)
    where
        L1: LabelSet + Join<L2>,
        W1: WeightSet + Join<W2>,
        L2: LabelSet,
        W2: WeightSet,
        <L1 as Join<L2>>::Output: LabelSet,
        <W1 as Join<W2>>::Output: WeightSet,
    {
        reg.register(
            sig([Context::<L1, W1>::sname(), Context::<L2, W2>::sname()]),
            join_impl::<L1, W1, L2, W2>,
        );
    }
    for_each_context_pair!(one, reg);
}

pub(super) fn editor(reg: &Registry<EditorFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<EditorFn>) {
        reg.register(sig([Context::<L, W>::sname()]), editor_impl::<L, W>);
    }
    for_each_context!(one, reg);
}

pub(super) fn proper(reg: &Registry<ProperFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<ProperFn>) {
        reg.register(sig([mutable::<L, W>()]), proper_impl::<MutableAutomaton<L, W>>);
        reg.register(
            sig([transposed::<L, W>()]),
            proper_impl::<TransposeAutomaton<MutableAutomaton<L, W>>>,
        );
        reg.register(
            sig([partition::<L, W>()]),
            proper_impl::<PartitionAutomaton<MutableAutomaton<L, W>>>,
        );
    }
    for_each_context!(one, reg);
}

pub(super) fn is_proper(reg: &Registry<PredicateFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<PredicateFn>) {
        reg.register(sig([mutable::<L, W>()]), is_proper_impl::<MutableAutomaton<L, W>>);
        reg.register(
            sig([transposed::<L, W>()]),
            is_proper_impl::<TransposeAutomaton<MutableAutomaton<L, W>>>,
        );
        reg.register(
            sig([partition::<L, W>()]),
            is_proper_impl::<PartitionAutomaton<MutableAutomaton<L, W>>>,
        );
    }
    for_each_context!(one, reg);
}

pub(super) fn sum(reg: &Registry<BinaryFn>) {
    fn one<L1, W1, L2, W2>(reg: &Registry<BinaryFn>)
    where
        L1: LabelSet + Join<L2>,
        W1: WeightSet + Join<W2>,
        L2: LabelSet,
        W2: WeightSet,
        <L1 as Join<L2>>::Output: LabelSet + Convert<L1> + Convert<L2>,
        <W1 as Join<W2>>::Output: WeightSet + Convert<W1> + Convert<W2>,
    {
        reg.register(
            sig([mutable::<L1, W1>(), mutable::<L2, W2>()]),
            sum_impl::<L1, W1, L2, W2>,
        );
    }
    for_each_context_pair!(one, reg);
}

pub(super) fn product(reg: &Registry<BinaryFn>) {
    fn one<L1, W1, L2, W2>(reg: &Registry<BinaryFn>)
    where
        L1: LabelSet + Join<L2>,
        W1: WeightSet + Join<W2>,
        L2: LabelSet,
        W2: WeightSet,
        <L1 as Join<L2>>::Output: LabelSet + Convert<L1> + Convert<L2>,
        <W1 as Join<W2>>::Output: WeightSet + Convert<W1> + Convert<W2>,
    {
        reg.register(
            sig([mutable::<L1, W1>(), mutable::<L2, W2>()]),
            product_impl::<L1, W1, L2, W2>,
        );
    }
    for_each_context_pair!(one, reg);
}

pub(super) fn determinize(reg: &Registry<UnaryFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<UnaryFn>) {
        reg.register(sig([mutable::<L, W>()]), determinize_impl::<L, W>);
    }
    for_each_context!(one, reg);
}

pub(super) fn transpose(reg: &Registry<UnaryFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<UnaryFn>) {
        reg.register(sig([mutable::<L, W>()]), transpose_impl::<L, W>);
        reg.register(sig([transposed::<L, W>()]), untranspose_impl::<L, W>);
    }
    for_each_context!(one, reg);
}

pub(super) fn strip(reg: &Registry<UnaryFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<UnaryFn>) {
        reg.register(sig([mutable::<L, W>()]), strip_impl::<MutableAutomaton<L, W>>);
        reg.register(
            sig([transposed::<L, W>()]),
            strip_impl::<TransposeAutomaton<MutableAutomaton<L, W>>>,
        );
        reg.register(
            sig([partition::<L, W>()]),
            strip_impl::<PartitionAutomaton<MutableAutomaton<L, W>>>,
        );
    }
    for_each_context!(one, reg);
}

pub(super) fn eval(reg: &Registry<EvalFn>) {
    fn one<L: LabelSet<Word = WordSet>, W: WeightSet>(reg: &Registry<EvalFn>) {
        reg.register(sig([mutable::<L, W>()]), eval_impl::<MutableAutomaton<L, W>>);
        reg.register(
            sig([partition::<L, W>()]),
            eval_impl::<PartitionAutomaton<MutableAutomaton<L, W>>>,
        );
    }
    for_each_word_context!(one, reg);
}

pub(super) fn enumerate(reg: &Registry<EnumerateFn>) {
    fn one<L: LabelSet<Word = WordSet>, W: WeightSet>(reg: &Registry<EnumerateFn>) {
        reg.register(sig([mutable::<L, W>()]), enumerate_impl::<L, W>);
    }
    for_each_word_context!(one, reg);
}

pub(super) fn thompson(reg: &Registry<ThompsonFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<ThompsonFn>) {
        reg.register(
            sig([<ExpressionSet<L, W> as ValueSet>::sname()]),
            thompson_impl::<L, W>,
        );
    }
    for_each_context!(one, reg);
}

pub(super) fn to_expression(reg: &Registry<ToExpressionFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<ToExpressionFn>) {
        reg.register(sig([mutable::<L, W>()]), to_expression_impl::<L, W>);
    }
    for_each_context!(one, reg);
}

pub(super) fn make_expressionset(reg: &Registry<MakeExpressionSetFn>) {
    fn one<L: LabelSet, W: WeightSet>(reg: &Registry<MakeExpressionSetFn>) {
        reg.register(sig([Context::<L, W>::sname()]), make_expressionset_impl::<L, W>);
    }
    for_each_context!(one, reg);
}
