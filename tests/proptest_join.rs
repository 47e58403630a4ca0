//! Join is associative and commutative on the built-in contexts.

use libkleene::dynamic;
use proptest::prelude::*;

fn alphabet_strategy() -> impl Strategy<Value = String> {
    prop::collection::btree_set(prop::sample::select(vec!['a', 'b', 'c', 'x', 'y']), 1..4)
        .prop_map(|letters| letters.into_iter().collect())
}

fn labelset_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        alphabet_strategy().prop_map(|a| format!("lal_char({})", a)),
        alphabet_strategy().prop_map(|a| format!("lan_char({})", a)),
        alphabet_strategy().prop_map(|a| format!("law_char({})", a)),
        Just("lao".to_string()),
    ]
}

fn weightset_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["b", "z", "q"])
}

fn context_strategy() -> impl Strategy<Value = String> {
    (labelset_strategy(), weightset_strategy()).prop_map(|(l, w)| format!("{}_{}", l, w))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_join_is_commutative(x in context_strategy(), y in context_strategy()) {
        let (x, y) = (dynamic::make_context(&x).unwrap(), dynamic::make_context(&y).unwrap());
        let xy = dynamic::join(&x, &y).unwrap();
        let yx = dynamic::join(&y, &x).unwrap();
        prop_assert_eq!(xy.vname(), yx.vname());
    }

    #[test]
    fn prop_join_is_associative(
        x in context_strategy(),
        y in context_strategy(),
        z in context_strategy(),
    ) {
        let x = dynamic::make_context(&x).unwrap();
        let y = dynamic::make_context(&y).unwrap();
        let z = dynamic::make_context(&z).unwrap();
        let left = dynamic::join(&dynamic::join(&x, &y).unwrap(), &z).unwrap();
        let right = dynamic::join(&x, &dynamic::join(&y, &z).unwrap()).unwrap();
        prop_assert_eq!(left.vname(), right.vname());
        prop_assert_eq!(left.sname(), right.sname());
    }

    #[test]
    fn prop_join_is_idempotent(x in context_strategy()) {
        let ctx = dynamic::make_context(&x).unwrap();
        prop_assert_eq!(dynamic::join(&ctx, &ctx).unwrap().vname(), ctx.vname());
    }
}

#[test]
fn test_join_examples() {
    let join = |x: &str, y: &str| {
        let x = dynamic::make_context(x).unwrap();
        let y = dynamic::make_context(y).unwrap();
        dynamic::join(&x, &y).map(|c| c.vname())
    };
    assert_eq!(join("lal_char(a)_b", "lal_char(b)_z").unwrap(), "lal_char(ab)_z");
    assert_eq!(join("lao_b", "lal_char(a)_q").unwrap(), "lan<lal_char(a)>_q");
    assert_eq!(join("lan_char(a)_z", "law_char(b)_b").unwrap(), "law_char(ab)_z");
    assert_eq!(join("lal_char(a)_zmin", "lal_char(a)_b").unwrap(), "lal_char(a)_zmin");
    assert!(join("lal_char(a)_zmin", "lal_char(a)_q").is_err());
    assert!(join("lat<lan_char(a),lan_char(b)>_b", "lal_char(a)_b").is_err());
}
