//! Run-time dispatch over the static instantiations.
//!
//! Algorithms are generic and monomorphized per context. Front ends that
//! only learn the context at run time (from a descriptor string) work with
//! the erased handles of this module instead: [`DynContext`],
//! [`DynAutomaton`], [`DynValueSet`] and [`DynValue`]. Every handle knows
//! the type name of what it wraps; a call builds the [`Signature`] of its
//! arguments and looks it up in the algorithm's [`Registry`].
//!
//! # Example
//!
//! ```rust,ignore
//! use libkleene::dynamic;
//!
//! let b = dynamic::make_context("lal_char(a)_b")?;
//! let z = dynamic::make_context("lal_char(b)_z")?;
//! assert_eq!(dynamic::join(&b, &z)?.vname(), "lal_char(ab)_z");
//! ```

mod algos;
mod editor;
mod error;
mod instantiate;
mod registry;
mod signature;
mod value;

pub use algos::*;
pub use editor::{AutomatonEditor, EditorBase, TypedEditor};
pub use error::DispatchError;
pub use registry::Registry;
pub use signature::Signature;
pub use value::{
    AutomatonBase, ContextBase, DynAutomaton, DynContext, DynValue, DynValueSet, TypedValue,
    ValueBase, ValueSetBase,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::{Direction, ProperConfig};
    use crate::expression::Identities;
    use crate::Error;

    fn build(ctx: &str, f: impl FnOnce(&mut AutomatonEditor)) -> DynAutomaton {
        let ctx = make_context(ctx).unwrap();
        let mut edit = make_automaton_editor(&ctx).unwrap();
        f(&mut edit);
        edit.result()
    }

    #[test]
    fn test_make_context() {
        let ctx = make_context("lal_char(ab)_b").unwrap();
        assert_eq!(ctx.sname(), "lal_char_b");
        assert_eq!(ctx.vname(), "lal_char(ab)_b");
        let ctx = make_context("lal_char(ab), ratexpset<lal_char(xy)_b>").unwrap();
        assert_eq!(ctx.vname(), "lal_char(ab)_ratexpset<lal_char(xy)_b>");
    }

    #[test]
    fn test_make_context_unknown() {
        match make_context("law_char(ab)_ratexpset<lal_char(x)_q>") {
            Err(Error::Dispatch(DispatchError::NoSuchInstantiation { algorithm, .. })) => {
                assert_eq!(algorithm, "make_context")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(make_context("lal_char(ab)_x"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_join() {
        let b = make_context("lal_char(a)_b").unwrap();
        let z = make_context("lan_char(b)_z").unwrap();
        assert_eq!(join(&b, &z).unwrap().vname(), "lan<lal_char(ab)>_z");
        let zmin = make_context("lal_char(a)_zmin").unwrap();
        assert!(join(&z, &zmin).is_err());
    }

    #[test]
    fn test_proper_and_eval() {
        let aut = build("lan_char(ab)_z", |e| {
            e.add_initial("0", None).unwrap();
            e.add_transition("0", "1", "\\e", Some("3")).unwrap();
            e.add_transition("1", "2", "a", None).unwrap();
            e.add_final("2", None).unwrap();
        });
        assert!(!is_proper(&aut).unwrap());
        assert!(eval(&aut, "a").is_err());

        let res = proper(&aut, ProperConfig::default()).unwrap();
        assert_eq!(res.sname(), "mutable_automaton<lal_char_z>");
        assert!(is_proper(&res).unwrap());
        assert_eq!(eval(&res, "a").unwrap().print(), "3");
        assert_eq!(context_of(&res).vname(), "lal_char(ab)_z");

        let fwd = proper(&aut, ProperConfig::new().direction(Direction::Forward)).unwrap();
        assert_eq!(eval(&fwd, "a").unwrap().print(), "3");
    }

    #[test]
    fn test_divergent_loop() {
        let aut = build("lan_char(a)_z", |e| {
            e.add_initial("0", None).unwrap();
            e.add_transition("0", "0", "\\e", Some("2")).unwrap();
            e.add_final("0", None).unwrap();
        });
        let err = proper(&aut, ProperConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Algo(_)));
    }

    #[test]
    fn test_sum_of_b_and_z() {
        let lhs = build("lal_char(a)_b", |e| {
            e.add_initial("p", None).unwrap();
            e.add_transition("p", "p", "a", None).unwrap();
            e.add_final("p", None).unwrap();
        });
        let rhs = build("lal_char(a)_z", |e| {
            e.add_initial("q", Some("2")).unwrap();
            e.add_transition("q", "q", "a", Some("3")).unwrap();
            e.add_final("q", None).unwrap();
        });
        let res = sum(&lhs, &rhs).unwrap();
        assert_eq!(res.vname(), "mutable_automaton<lal_char(a)_z>");
        assert_eq!(eval(&res, "aa").unwrap().print(), "19");
    }

    #[test]
    fn test_sum_without_join() {
        let lhs = build("lal_char(a)_z", |_| {});
        let rhs = build("lal_char(a)_zmin", |_| {});
        assert!(matches!(
            sum(&lhs, &rhs),
            Err(Error::Dispatch(DispatchError::NoSuchInstantiation { .. }))
        ));
    }

    #[test]
    fn test_transpose_round_trip() {
        let aut = build("law_char(ab)_z", |e| {
            e.add_initial("p", None).unwrap();
            e.add_transition("p", "q", "ab", Some("2")).unwrap();
            e.add_final("q", None).unwrap();
        });
        let t = transpose(&aut).unwrap();
        assert_eq!(t.sname(), "transpose_automaton<mutable_automaton<law_char_z>>");
        let stripped = strip(&t).unwrap();
        assert_eq!(eval(&stripped, "ba").unwrap().print(), "2");
        let back = transpose(&t).unwrap();
        assert_eq!(back.sname(), "mutable_automaton<law_char_z>");
        assert_eq!(eval(&back, "ab").unwrap().print(), "2");
    }

    #[test]
    fn test_determinize() {
        let aut = build("lal_char(ab)_b", |e| {
            e.add_initial("p", None).unwrap();
            e.add_transition("p", "p", "a", None).unwrap();
            e.add_transition("p", "q", "a", None).unwrap();
            e.add_final("q", None).unwrap();
        });
        let det = determinize(&aut).unwrap();
        assert_eq!(
            det.sname(),
            "partition_automaton<mutable_automaton<lal_char_b>>"
        );
        assert_eq!(det.num_states(), 2);
        assert_eq!(eval(&det, "aa").unwrap().print(), "1");
        assert_eq!(strip(&det).unwrap().num_states(), 2);

        let z = build("lal_char(a)_z", |_| {});
        assert!(matches!(determinize(&z), Err(Error::Algo(_))));
    }

    #[test]
    fn test_enumerate() {
        let aut = build("lal_char(ab)_z", |e| {
            e.add_initial("p", None).unwrap();
            e.add_transition("p", "p", "a", Some("2")).unwrap();
            e.add_final("p", None).unwrap();
        });
        let poly = enumerate(&aut, 2).unwrap();
        assert_eq!(poly.sname(), "polynomialset<law_char_z>");
        assert_eq!(poly.print(), "\\e + <2>a + <4>aa");
    }

    #[test]
    fn test_expressions() {
        let ctx = make_context("lal_char(ab)_z").unwrap();
        let rs = make_expressionset(&ctx, Identities::Trivial).unwrap();
        assert_eq!(rs.vname(), "ratexpset<lal_char(ab)_z>");
        let a = rs.conv("a").unwrap();
        let aut = thompson(&a).unwrap();
        assert_eq!(aut.sname(), "mutable_automaton<lan<lal_char>_z>");
        let p = proper(&aut, ProperConfig::default()).unwrap();
        assert_eq!(eval(&p, "a").unwrap().print(), "1");

        let e = to_expression(&p, Identities::Trivial).unwrap();
        assert_eq!(e.print(), "a");
        assert_eq!(e.sname(), "ratexpset<lal_char_z>");
    }

    #[test]
    fn test_wrong_kind_of_value() {
        let ctx = make_context("lal_char(ab)_z").unwrap();
        let rs = make_expressionset(&ctx, Identities::Trivial).unwrap();
        let e = rs.conv("a").unwrap();
        let weight = e.valueset();
        assert_eq!(weight.sname(), "ratexpset<lal_char_z>");
        let two = crate::dynamic::DynValueSet::new(crate::weightset::Z)
            .conv("2")
            .unwrap();
        assert!(thompson(&two).is_err());
    }
}
