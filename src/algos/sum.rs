//! Weighted union of two automata.

use tracing::debug;

use crate::automaton::{Automaton, MutableAutomaton};
use crate::context::Context;
use crate::labelset::LabelSet;
use crate::valueset::{Convert, Join};
use crate::weightset::WeightSet;

use super::copy::copy_into;

/// The sum of `lhs` and `rhs`: an automaton over the join of their
/// contexts, whose behavior is the sum of their behaviors.
///
/// Both operands are converted into the joined context and laid side by
/// side; no state is shared.
pub fn sum<A1, A2, L, W>(lhs: &A1, rhs: &A2) -> MutableAutomaton<L, W>
where
    A1: Automaton,
    A2: Automaton,
    A1::Labelset: Join<A2::Labelset, Output = L>,
    A1::Weightset: Join<A2::Weightset, Output = W>,
    L: LabelSet + Convert<A1::Labelset> + Convert<A2::Labelset>,
    W: WeightSet + Convert<A1::Weightset> + Convert<A2::Weightset>,
{
    let ctx = Context::new(
        lhs.labelset().join(rhs.labelset()),
        lhs.weightset().join(rhs.weightset()),
    );
    debug!(lhs = %lhs.vname(), rhs = %rhs.vname(), context = %ctx, "sum");
    let (ls, ws) = (ctx.labelset().clone(), ctx.weightset().clone());
    let mut res = MutableAutomaton::new(ctx);
    copy_into(
        lhs,
        &mut res,
        |l, w| {
            Some((
                ls.conv_from(lhs.labelset(), l),
                ws.conv_from(lhs.weightset(), w),
            ))
        },
        |w| ws.conv_from(lhs.weightset(), w),
    );
    copy_into(
        rhs,
        &mut res,
        |l, w| {
            Some((
                ls.conv_from(rhs.labelset(), l),
                ws.conv_from(rhs.weightset(), w),
            ))
        },
        |w| ws.conv_from(rhs.weightset(), w),
    );
    res
}
