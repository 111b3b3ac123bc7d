//! Property-Based Tests for QuickLook
//!
//! Uses proptest for testing invariants and edge cases
//!
//! These tests verify:
//! - Size sorting is stable and monotonic by tier rank
//! - Best-size match always picks an entry of the list
//! - Comparison list never exceeds capacity or holds duplicate keys
//! - Price change sign follows the price movement

use proptest::prelude::*;
use std::time::Instant;

// =============================================================================
// Size Ordering Property Tests
// =============================================================================

use quicklook::gateway::InstanceSize;
use quicklook::logic::sizes::{best_match, size_suffix, sort_by_rank, type_rank, MatchRule, SIZE_RANKS};

/// Strategy for size suffixes: mostly ranked tiers, sometimes unknown ones
fn suffix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(SIZE_RANKS.iter().map(|(s, _)| s.to_string()).collect::<Vec<_>>()),
        1 => "[a-z]{3,6}".prop_map(|s| format!("x{s}")),
    ]
}

/// Strategy for a size list of one family
fn size_list_strategy() -> impl Strategy<Value = Vec<InstanceSize>> {
    (
        "[a-z][0-9][a-z]?",
        proptest::collection::vec(suffix_strategy(), 1..16),
    )
        .prop_map(|(family, suffixes)| {
            suffixes
                .into_iter()
                .map(|s| InstanceSize::new(format!("{family}.{s}")))
                .collect()
        })
}

proptest! {
    /// Sorted sizes are non-decreasing by rank
    #[test]
    fn sort_is_monotonic(mut sizes in size_list_strategy()) {
        sort_by_rank(&mut sizes);
        for pair in sizes.windows(2) {
            prop_assert!(type_rank(&pair[0].instance_type) <= type_rank(&pair[1].instance_type));
        }
    }

    /// Equal ranks keep their original relative order
    #[test]
    fn sort_is_stable(sizes in size_list_strategy()) {
        let indexed: Vec<(usize, InstanceSize)> = sizes.iter().cloned().enumerate().collect();
        let mut sorted = sizes.clone();
        sort_by_rank(&mut sorted);

        // Recover each sorted entry's original index, consuming duplicates in order
        let mut used = vec![false; indexed.len()];
        let positions: Vec<usize> = sorted
            .iter()
            .map(|s| {
                let (i, _) = indexed
                    .iter()
                    .find(|(i, o)| !used[*i] && o == s)
                    .expect("sorted entry comes from input");
                used[*i] = true;
                *i
            })
            .collect();

        for pair in positions.windows(2) {
            let (a, b) = (&sizes[pair[0]], &sizes[pair[1]]);
            if type_rank(&a.instance_type) == type_rank(&b.instance_type) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    /// Best match is a member of the list, and keeps the tier when offered
    #[test]
    fn best_match_prefers_previous_tier(
        mut sizes in size_list_strategy(),
        previous in suffix_strategy(),
    ) {
        sort_by_rank(&mut sizes);
        let (chosen, rule) = best_match(&sizes, Some(&previous)).expect("non-empty list");
        prop_assert!(sizes.contains(chosen));

        let offered = sizes.iter().any(|s| size_suffix(&s.instance_type) == Some(previous.as_str()));
        if offered {
            prop_assert_eq!(rule, MatchRule::SameTier);
            prop_assert_eq!(size_suffix(&chosen.instance_type), Some(previous.as_str()));
        } else if sizes.iter().any(|s| size_suffix(&s.instance_type) == Some("large")) {
            prop_assert_eq!(size_suffix(&chosen.instance_type), Some("large"));
        } else {
            prop_assert_eq!(chosen, &sizes[0]);
        }
    }
}

// =============================================================================
// Comparison Property Tests
// =============================================================================

use quicklook::gateway::PricedProduct;
use quicklook::logic::comparison::{AddOutcome, ComparisonKey, ComparisonList, COMPARISON_CAPACITY};

fn priced() -> PricedProduct {
    serde_json::from_value(serde_json::json!({
        "listPrice": {"pricePerUnit": {"currency": "USD", "value": 1.0}}
    }))
    .unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u8),
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..3, 0u8..6).prop_map(|(r, s)| Op::Add(r, s)),
        1 => (0usize..12).prop_map(Op::Remove),
    ]
}

proptest! {
    /// Any sequence of adds and removes keeps the list bounded and duplicate-free
    #[test]
    fn comparison_stays_bounded_and_unique(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let product = priced();
        let now = Instant::now();
        let mut list = ComparisonList::new();

        for op in ops {
            let before = list.len();
            match op {
                Op::Add(region, size) => {
                    let key = ComparisonKey::new(format!("region-{region}"), format!("m5.size{size}"));
                    let existed = list.position(&key).is_some();
                    match list.add(key, Some(&product), now) {
                        AddOutcome::Added(_) => prop_assert_eq!(list.len(), before + 1),
                        AddOutcome::Highlighted(_) => {
                            prop_assert!(existed);
                            prop_assert_eq!(list.len(), before);
                        }
                        AddOutcome::Full => prop_assert_eq!(before, COMPARISON_CAPACITY),
                        AddOutcome::NoProduct => prop_assert!(false, "product was given"),
                    }
                }
                Op::Remove(index) => {
                    let removed = list.remove(index);
                    prop_assert_eq!(removed.is_some(), index < before);
                }
            }

            prop_assert!(list.len() <= COMPARISON_CAPACITY);
            let keys = list.items().iter().map(|i| &i.key).collect::<Vec<_>>();
            for (i, key) in keys.iter().enumerate() {
                prop_assert!(!keys[i + 1..].contains(key));
            }
        }
    }
}

// =============================================================================
// Price Change Property Tests
// =============================================================================

use quicklook::logic::pricing::price_change_percent;

proptest! {
    /// The change has the sign of the movement and is absent without a base
    #[test]
    fn price_change_sign(old in 0.01f64..10_000.0, new in 0.0f64..10_000.0) {
        let change = price_change_percent(Some(old), new).expect("positive base");
        if new > old {
            prop_assert!(change > 0.0);
        } else if new < old {
            prop_assert!(change < 0.0);
        } else {
            prop_assert_eq!(change, 0.0);
        }
        prop_assert!(price_change_percent(None, new).is_none());
    }
}
