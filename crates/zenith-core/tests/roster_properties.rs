//! Property tests for the schedule and goal rosters.
//!
//! Random sequences of RSVP/cancel/goal operations must never break the
//! roster invariants: no duplicates, only catalog ids, rejected operations
//! leave everything untouched.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use zenith_core::{Catalog, ContentError, ContentStore};

#[derive(Debug, Clone)]
enum Op {
    Rsvp(String),
    Cancel(String),
    AddGoal(String),
    RemoveGoal(usize),
}

fn arb_event_id() -> impl Strategy<Value = String> {
    // evt1..evt5 exist; evt0 and evt6..evt9 do not.
    (0u8..=9).prop_map(|n| format!("evt{n}"))
}

fn arb_goal() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Sleep 8 hours".to_string()),
        Just("Meditate 5 mins/day".to_string()),
        Just("   ".to_string()),
        "[a-z ]{1,12}",
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_event_id().prop_map(Op::Rsvp),
        arb_event_id().prop_map(Op::Cancel),
        arb_goal().prop_map(Op::AddGoal),
        (0usize..6).prop_map(Op::RemoveGoal),
    ]
}

fn store() -> ContentStore {
    ContentStore::new(Catalog::builtin().unwrap())
}

fn has_duplicates(items: &[String]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, a)| items[i + 1..].iter().any(|b| a == b))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn rosters_stay_consistent(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = store();
        for op in ops {
            let schedule_before = store.schedule().to_vec();
            let goals_before = store.goals().to_vec();
            let result = match op {
                Op::Rsvp(id) => store.rsvp(&id).map(|_| ()),
                Op::Cancel(id) => store.cancel_rsvp(&id),
                Op::AddGoal(text) => store.add_goal(&text),
                Op::RemoveGoal(index) => store.remove_goal(index).map(|_| ()),
            };
            if result.is_err() {
                prop_assert_eq!(store.schedule(), &schedule_before[..]);
                prop_assert_eq!(store.goals(), &goals_before[..]);
            }
            prop_assert!(!has_duplicates(store.schedule()));
            prop_assert!(!has_duplicates(store.goals()));
            for id in store.schedule() {
                prop_assert!(store.event(id).is_some());
            }
        }
    }

    #[test]
    fn rsvp_is_idempotent(id in arb_event_id(), repeats in 1usize..5) {
        let mut store = store();
        let known = store.event(&id).is_some();
        for _ in 0..repeats {
            let _ = store.rsvp(&id);
        }
        let count = store.schedule().iter().filter(|s| **s == id).count();
        prop_assert_eq!(count, usize::from(known));
    }

    #[test]
    fn unknown_ids_are_rejected(n in 6u32..1000) {
        let mut store = store();
        let id = format!("evt{n}");
        prop_assert_eq!(
            store.rsvp(&id),
            Err(ContentError::NotFound { id: id.clone() })
        );
        prop_assert!(store.schedule().is_empty());
    }

    #[test]
    fn schedule_keeps_rsvp_order(picks in prop::sample::subsequence(
        vec!["evt1", "evt2", "evt3", "evt4", "evt5"], 0..=5,
    ).prop_shuffle()) {
        let mut store = store();
        for id in &picks {
            store.rsvp(id).unwrap();
        }
        let titles: Vec<&str> = store.scheduled_events().map(|e| e.id.as_str()).collect();
        prop_assert_eq!(titles, picks);
    }

    #[test]
    fn removing_a_goal_returns_it(index in 0usize..2) {
        let mut store = store();
        let expected = store.goals()[index].clone();
        let removed = store.remove_goal(index).unwrap();
        prop_assert_eq!(&removed, &expected);
        prop_assert!(!store.goals().contains(&expected));
    }
}

#[test]
fn cancel_without_rsvp_reports_not_in_schedule() {
    let mut store = store();
    assert_eq!(
        store.cancel_rsvp("evt1"),
        Err(ContentError::NotInSchedule { id: "evt1".into() })
    );
}
