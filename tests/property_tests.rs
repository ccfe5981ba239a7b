use gradeshift::algorithm::conflict::{index_conflicts, parse_slots};
use gradeshift::algorithm::filters::{filter_candidates, CompletionState};
use gradeshift::algorithm::solver::{solve_selection, BranchAndBound};
use gradeshift::config::PolicyConfig;
use gradeshift::{Catalog, Course, PlanError};
use proptest::prelude::*;

const DAYS: [&str; 5] = ["seg", "ter", "qua", "qui", "sex"];

fn arb_slot() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (0usize..5, 7u32..12).prop_map(|(d, h)| format!("{}{}", DAYS[d], h)),
        1 => "[^,0-9]{0,4}",
    ]
}

fn arb_course(idx: usize) -> impl Strategy<Value = Course> {
    (
        prop::collection::vec(arb_slot(), 0..3),
        -3.0f64..10.0,
        any::<bool>(),
        prop::collection::vec(0usize..8, 0..3),
        0i32..6,
    )
        .prop_map(move |(slots, weight, completed, prereqs, period)| Course {
            id: idx.to_string(),
            title: format!("T{}", idx),
            period,
            credits: 4.0,
            prerequisites: prereqs.iter().map(|p| format!("T{}", p)).collect::<Vec<_>>().join(", "),
            weight,
            schedule: slots.join(", "),
            completed,
        })
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (1usize..9).prop_flat_map(|n| (0..n).map(arb_course).collect::<Vec<_>>()).prop_map(Catalog::new)
}

proptest! {
    #[test]
    fn completed_courses_are_never_candidates(catalog in arb_catalog()) {
        let policy = PolicyConfig::default();
        let state = CompletionState::from_catalog(&catalog);
        for c in filter_candidates(&catalog, &state, &policy) {
            prop_assert!(!c.completed);
        }
    }

    #[test]
    fn empty_prerequisites_are_always_eligible(catalog in arb_catalog()) {
        let policy = PolicyConfig::default();
        let state = CompletionState::from_catalog(&catalog);
        let candidates = filter_candidates(&catalog, &state, &policy);
        for c in catalog.courses().iter().filter(|c| !c.completed && c.prerequisites.trim().is_empty()) {
            prop_assert!(candidates.iter().any(|k| k.id == c.id));
        }
    }

    #[test]
    fn identical_codes_share_a_group(code in "(seg|ter|qua)(8|9|10)(, (qui|sex)(8|9))?") {
        let a = Course { id: "a".into(), title: "A".into(), period: 1, credits: 0.0, prerequisites: String::new(), weight: 1.0, schedule: code.clone(), completed: false };
        let b = Course { id: "b".into(), title: "B".into(), ..a.clone() };
        let idx = index_conflicts(&[&a, &b], ",");
        prop_assert!(!idx.groups_by_slot.is_empty());
        for members in idx.groups_by_slot.values() {
            prop_assert_eq!(members, &vec![0, 1]);
        }
    }

    #[test]
    fn malformed_codes_never_panic_and_yield_no_slots(code in "[^0-9]*") {
        prop_assert!(parse_slots(&code, ",").is_empty());
    }

    #[test]
    fn solver_respects_cardinality_and_conflicts(catalog in arb_catalog()) {
        let policy = PolicyConfig::default();
        let state = CompletionState::from_catalog(&catalog);
        let candidates = filter_candidates(&catalog, &state, &policy);
        let idx = index_conflicts(&candidates, &policy.slot_delimiter);
        let mut backend = BranchAndBound::new();
        match solve_selection(&candidates, &idx, &policy, &mut backend) {
            Ok(sel) => {
                prop_assert!(sel.indices.len() >= policy.min_courses);
                prop_assert!(sel.indices.len() <= policy.max_courses);
                for (i, a) in sel.indices.iter().enumerate() {
                    for b in &sel.indices[i + 1..] {
                        prop_assert!(!idx.conflicts(*a, *b));
                    }
                }
            }
            Err(PlanError::EmptyCandidateSet) => prop_assert!(candidates.is_empty()),
            Err(PlanError::Infeasible { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
