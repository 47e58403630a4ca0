//! Thompson's construction: from an expression to an automaton with
//! spontaneous transitions.

use tracing::debug;

use crate::automaton::{Automaton, AutomatonMut, MutableAutomaton, StateId};
use crate::context::Context;
use crate::expression::{Expression, ExpressionRef, ExpressionSet};
use crate::labelset::LabelSet;
use crate::valueset::ValueSet;
use crate::weightset::WeightSet;

use super::{AlgoError, Result};

/// The Thompson automaton of `e`, over the nullable version of the label
/// set of `rs`.
///
/// The result has one initial and one final state, both with weight one.
pub fn thompson<L, W>(
    rs: &ExpressionSet<L, W>,
    e: &ExpressionRef<L::Value, W::Value>,
) -> Result<MutableAutomaton<L::Nullable, W>>
where
    L: LabelSet,
    W: WeightSet,
{
    let nullable = rs.labelset().nullable();
    let eps = match nullable.one() {
        Some(eps) => eps,
        None => {
            return Err(AlgoError::Precondition {
                algorithm: "thompson",
                reason: format!("{} has no identity label", nullable.vname()),
            })
        }
    };
    let mut builder = Thompson {
        ls: rs.labelset(),
        ws: rs.weightset(),
        eps,
        res: MutableAutomaton::new(Context::new(nullable, rs.weightset().clone())),
    };
    let (i, f) = builder.build(e);
    let one = builder.ws.one();
    builder.res.set_initial(i, one.clone());
    builder.res.set_final(f, one);
    debug!(
        size = e.size(),
        states = builder.res.num_states(),
        "thompson"
    );
    Ok(builder.res)
}

struct Thompson<'a, L: LabelSet, W: WeightSet> {
    ls: &'a L,
    ws: &'a W,
    eps: <L::Nullable as ValueSet>::Value,
    res: MutableAutomaton<L::Nullable, W>,
}

impl<L: LabelSet, W: WeightSet> Thompson<'_, L, W> {
    fn link(&mut self, src: StateId, dst: StateId, w: W::Value) {
        self.res.add_transition(src, dst, self.eps.clone(), w);
    }

    /// The initial and final states of the automaton of `e`.
    fn build(&mut self, e: &ExpressionRef<L::Value, W::Value>) -> (StateId, StateId) {
        let one = self.ws.one();
        match &**e {
            Expression::Zero => (self.res.new_state(), self.res.new_state()),
            Expression::One => {
                let (i, f) = (self.res.new_state(), self.res.new_state());
                self.link(i, f, one);
                (i, f)
            }
            Expression::Atom(l) => {
                let (i, f) = (self.res.new_state(), self.res.new_state());
                let l = self.ls.to_nullable(l);
                self.res.add_transition(i, f, l, one);
                (i, f)
            }
            Expression::Sum(es) => {
                let (i, f) = (self.res.new_state(), self.res.new_state());
                for e in es {
                    let (ci, cf) = self.build(e);
                    self.link(i, ci, one.clone());
                    self.link(cf, f, one.clone());
                }
                (i, f)
            }
            Expression::Prod(es) => {
                let mut ends: Option<(StateId, StateId)> = None;
                for e in es {
                    let (ci, cf) = self.build(e);
                    ends = match ends {
                        None => Some((ci, cf)),
                        Some((i, f)) => {
                            self.link(f, ci, one.clone());
                            Some((i, cf))
                        }
                    };
                }
                ends.unwrap_or_else(|| {
                    let (i, f) = (self.res.new_state(), self.res.new_state());
                    self.link(i, f, one.clone());
                    (i, f)
                })
            }
            Expression::Star(e) => {
                let (ci, cf) = self.build(e);
                let (i, f) = (self.res.new_state(), self.res.new_state());
                self.link(i, ci, one.clone());
                self.link(cf, f, one.clone());
                self.link(cf, ci, one.clone());
                self.link(i, f, one);
                (i, f)
            }
            Expression::LWeight(w, e) => {
                let (ci, cf) = self.build(e);
                let i = self.res.new_state();
                self.link(i, ci, w.clone());
                (i, cf)
            }
            Expression::RWeight(e, w) => {
                let (ci, cf) = self.build(e);
                let f = self.res.new_state();
                self.link(cf, f, w.clone());
                (ci, f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::{eval, proper};
    use crate::automaton::Automaton;
    use crate::expression::Identities;
    use crate::labelset::{LetterSet, OneSet};
    use crate::weightset::Z;

    fn rs() -> ExpressionSet<LetterSet, Z> {
        ExpressionSet::new(Context::make("lal_char(ab)_z").unwrap(), Identities::Trivial)
    }

    #[test]
    fn test_thompson_of_weighted_star() {
        let rs = rs();
        // (<2>a + b)*
        let a = rs.lweight(&2, &rs.atom(&'a'));
        let e = rs.closure(&rs.sum_of([a, rs.atom(&'b')]));
        let aut = thompson(&rs, &e).unwrap();
        assert_eq!(aut.vname(), "mutable_automaton<lan<lal_char(ab)>_z>");
        assert_eq!(aut.initial_transitions().len(), 1);
        assert_eq!(aut.final_transitions().len(), 1);

        let p = proper(&aut).unwrap();
        assert_eq!(eval(&p, "").unwrap(), 1);
        assert_eq!(eval(&p, "ab").unwrap(), 2);
        assert_eq!(eval(&p, "aba").unwrap(), 4);
    }

    #[test]
    fn test_thompson_of_products_and_weights() {
        let rs = rs();
        let ab = rs.prod_of([rs.atom(&'a'), rs.atom(&'b')]);
        let e = rs.rweight(&ab, &3);
        let p = proper(&thompson(&rs, &e).unwrap()).unwrap();
        assert_eq!(eval(&p, "ab").unwrap(), 3);
        assert_eq!(eval(&p, "a").unwrap(), 0);
    }

    #[test]
    fn test_thompson_of_zero() {
        let rs = rs();
        let aut = thompson(&rs, &WeightSet::zero(&rs)).unwrap();
        assert_eq!(aut.num_states(), 2);
        assert_eq!(aut.num_transitions(), 0);
    }

    #[test]
    fn test_thompson_over_lao() {
        let rs: ExpressionSet<OneSet, Z> =
            ExpressionSet::new(Context::make("lao_z").unwrap(), Identities::Trivial);
        let aut = thompson(&rs, &WeightSet::one(&rs)).unwrap();
        assert_eq!(aut.num_states(), 2);
    }
}
