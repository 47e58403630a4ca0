//! End-to-end scenarios for epsilon removal, context parsing and sums.

use libkleene::prelude::*;
use libkleene::labelset::LalChar;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Scenario 1: spontaneous transition to a final state
// ============================================================================

#[test]
fn test_boolean_spontaneous_to_final() {
    init_tracing();
    let mut aut: MutableAutomaton<LanChar, B> =
        MutableAutomaton::new(Context::make("lan_char(ab)_b").unwrap());
    let s0 = aut.new_state();
    let s1 = aut.new_state();
    aut.set_initial(s0, true);
    aut.new_transition(s0, s1, None, true);
    aut.set_final(s1, true);
    assert!(!is_proper(&aut));

    let res = proper(&aut).unwrap();
    assert!(is_proper(&res));
    assert!(res.is_initial(s0));
    assert!(res.is_final(s0));
    assert_eq!(res.num_transitions(), 0);
    assert!(eval(&res, "").unwrap());
    assert!(!eval(&res, "a").unwrap());
}

#[test]
fn test_boolean_spontaneous_chain_without_pruning() {
    let mut aut: MutableAutomaton<LanChar, B> =
        MutableAutomaton::new(Context::make("lan_char(ab)_b").unwrap());
    let s0 = aut.new_state();
    let s1 = aut.new_state();
    let s2 = aut.new_state();
    aut.set_initial(s0, true);
    aut.new_transition(s0, s1, None, true);
    aut.new_transition(s1, s2, None, true);
    aut.new_transition(s2, s2, Some('b'), true);
    aut.set_final(s2, true);

    let res = proper_with(&aut, &ProperConfig::new().prune(false)).unwrap();
    assert_eq!(res.num_states(), 3);
    assert!(res.is_final(s0));
    assert!(eval(&res, "bbb").unwrap());
}

// ============================================================================
// Scenario 2: descriptor round trip
// ============================================================================

#[test]
fn test_context_round_trip() {
    let ctx: Context<LalChar, B> = Context::make("lal_char(ab)_b").unwrap();
    assert_eq!(ctx.labelset().generators(), vec!['a', 'b']);
    assert_eq!(ctx.weightset().vname(), "b");

    let descriptor = ctx.vname();
    assert_eq!(descriptor, "lal_char(ab)_b");
    let again: Context<LalChar, B> = Context::make(&descriptor).unwrap();
    assert_eq!(again, ctx);
}

#[test]
fn test_context_round_trip_dynamic() {
    for descriptor in [
        "lal_char(ab)_b",
        "lan<lal_char(xyz)>_q",
        "law_char(a-c)_zmin",
        "lao_z",
        "lat<lan<lal_char(ab)>,lan<lal_char(xy)>>_b",
        "lal_char(ab)_ratexpset<lal_char(xy)_b>",
    ] {
        let ctx = dynamic::make_context(descriptor).unwrap();
        let again = dynamic::make_context(&ctx.vname()).unwrap();
        assert_eq!(again.vname(), ctx.vname(), "{}", descriptor);
        assert_eq!(again.sname(), ctx.sname());
    }
}

#[test]
fn test_context_mismatch() {
    assert!(Context::<LalChar, Z>::make("lal_char(ab)_b").is_err());
    assert!(Context::<LalChar, B>::make("lal_char(ab)").is_err());
    assert!(Context::<LalChar, B>::make("lal_char(ab_b").is_err());
}

// ============================================================================
// Scenario 3: sum of a Boolean and an integer automaton
// ============================================================================

#[test]
fn test_sum_boolean_and_integers() {
    let mut lhs: MutableAutomaton<LalChar, B> =
        MutableAutomaton::new(Context::make("lal_char(ab)_b").unwrap());
    let p = lhs.new_state();
    let q = lhs.new_state();
    lhs.set_initial(p, true);
    lhs.new_transition(p, q, 'a', true);
    lhs.set_final(q, true);

    let mut rhs: MutableAutomaton<LalChar, Z> =
        MutableAutomaton::new(Context::make("lal_char(bc)_z").unwrap());
    let r = rhs.new_state();
    rhs.set_initial(r, 5);
    rhs.new_transition(r, r, 'a', 2);
    rhs.set_final(r, 1);

    let res = sum(&lhs, &rhs);
    assert_eq!(res.context().vname(), "lal_char(abc)_z");
    assert_eq!(eval(&res, "a").unwrap(), 1 + 10);
    assert_eq!(eval(&res, "").unwrap(), 5);
    assert_eq!(eval(&res, "aa").unwrap(), 20);
    assert_eq!(eval(&res, "b").unwrap(), 0);
}

// ============================================================================
// Divergent spontaneous loop
// ============================================================================

#[test]
fn test_divergent_loop_reports_the_error() {
    let mut aut: MutableAutomaton<LanChar, Z> =
        MutableAutomaton::new(Context::make("lan_char(a)_z").unwrap());
    let s = aut.new_state();
    aut.set_initial(s, 1);
    aut.new_transition(s, s, None, 2);
    aut.set_final(s, 1);

    for config in [
        ProperConfig::new(),
        ProperConfig::new().direction(Direction::Forward),
        ProperConfig::new().order(EliminationOrder::Insertion),
    ] {
        let err = proper_with(&aut, &config).unwrap_err();
        assert!(
            matches!(err, AlgoError::InvalidAutomaton { state, .. } if state == s),
            "{:?}",
            err
        );
        assert!(err.to_string().contains("star"));
    }
    assert!(!is_valid(&aut));
}

#[test]
fn test_starrable_loops() {
    let mut aut: MutableAutomaton<LanChar, Q> =
        MutableAutomaton::new(Context::make("lan_char(a)_q").unwrap());
    let s = aut.new_state();
    aut.set_initial(s, Rational::from(1));
    aut.new_transition(s, s, None, Rational::new(2, 3));
    aut.new_transition(s, s, Some('a'), Rational::from(1));
    aut.set_final(s, Rational::from(1));
    let res = proper(&aut).unwrap();
    // 1/(1-2/3) = 3 for each position.
    assert_eq!(eval(&res, "").unwrap(), Rational::from(3));
    assert_eq!(eval(&res, "a").unwrap(), Rational::from(9));
    assert!(is_valid(&aut));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_proper_is_idempotent() {
    let mut aut: MutableAutomaton<LanChar, Z> =
        MutableAutomaton::new(Context::make("lan_char(ab)_z").unwrap());
    let s0 = aut.new_state();
    let s1 = aut.new_state();
    let s2 = aut.new_state();
    aut.set_initial(s0, 2);
    aut.new_transition(s0, s1, Some('a'), 3);
    aut.new_transition(s1, s2, None, 5);
    aut.new_transition(s2, s0, None, 7);
    aut.new_transition(s2, s2, Some('b'), 1);
    aut.set_final(s2, 1);

    let once = proper(&aut).unwrap();
    let twice = proper(&once).unwrap();
    assert_eq!(enumerate(&once, 4).unwrap(), enumerate(&twice, 4).unwrap());
    assert_eq!(once.num_transitions(), twice.num_transitions());
}
