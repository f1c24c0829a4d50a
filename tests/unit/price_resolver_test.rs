// Property-based tests for price resolution
//
// Covers:
// - determinism for fixed candidates and context
// - the more specific candidate always wins regardless of list order
// - quantity tiers and validity windows are inclusive on both ends
// - currency mismatch is a hard filter
//
// Uses proptest to validate selection properties across many inputs

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::Duration;
use helpers::TestDataFactory;
use pricetax::core::{AppError, Currency};
use pricetax::prices::{PriceCandidate, PriceResolver};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Candidate list generator: amounts, priorities, optional catalog scope,
/// creation offsets and quantity tiers
fn arb_candidates() -> impl Strategy<Value = Vec<PriceCandidate>> {
    prop::collection::vec(
        (
            1u32..100_000u32,
            -5i32..5i32,
            prop::option::of(0u8..3u8),
            0i64..1_000i64,
            1i32..5i32,
            prop::option::of(0i32..10i32),
        ),
        1..12,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (cents, priority, catalog, age, min, span))| {
                let mut c = TestDataFactory::candidate(
                    &format!("c{}", i),
                    Decimal::new(cents as i64, 2),
                );
                c.priority = priority;
                c.catalog_id = catalog.map(|n| n.to_string());
                c.created_at = TestDataFactory::now() - Duration::minutes(age);
                c.min_quantity = min;
                c.max_quantity = span.map(|s| min + s);
                c
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn test_resolution_is_deterministic(
        candidates in arb_candidates(),
        quantity in 1i32..10i32,
        catalog in prop::option::of(0u8..3u8)
    ) {
        let mut context = TestDataFactory::context();
        context.quantity = quantity;
        context.catalog_id = catalog.map(|n| n.to_string());

        let resolver = PriceResolver::new();
        let first = resolver.resolve("v1", &candidates, &context).ok();
        let second = resolver.resolve("v1", &candidates, &context).ok();

        prop_assert_eq!(first, second, "Resolution must be deterministic");
    }

    #[test]
    fn test_resolution_ignores_list_order(
        candidates in arb_candidates(),
        quantity in 1i32..10i32,
        catalog in prop::option::of(0u8..3u8)
    ) {
        let mut context = TestDataFactory::context();
        context.quantity = quantity;
        context.catalog_id = catalog.map(|n| n.to_string());

        let mut reversed = candidates.clone();
        reversed.reverse();

        let resolver = PriceResolver::new();
        let forward = resolver.resolve("v1", &candidates, &context).ok();
        let backward = resolver.resolve("v1", &reversed, &context).ok();

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn test_winner_is_eligible_and_maximal(
        candidates in arb_candidates(),
        quantity in 1i32..10i32,
        catalog in prop::option::of(0u8..3u8)
    ) {
        let mut context = TestDataFactory::context();
        context.quantity = quantity;
        context.catalog_id = catalog.map(|n| n.to_string());

        let resolver = PriceResolver::new();
        if let Ok(resolved) = resolver.resolve("v1", &candidates, &context) {
            let winner = candidates
                .iter()
                .find(|c| c.id == resolved.source_candidate_id)
                .unwrap();
            prop_assert!(winner.covers_quantity(quantity));

            for other in &candidates {
                if let Some(score) = resolver.specificity("v1", other, &context) {
                    prop_assert!(score <= resolved.specificity_score);
                    if score == resolved.specificity_score {
                        prop_assert!(other.priority <= winner.priority);
                    }
                }
            }
        } else {
            prop_assert!(resolver.rank("v1", &candidates, &context).is_empty());
        }
    }

    #[test]
    fn test_more_specific_candidate_always_wins(
        generic_cents in 1u32..100_000u32,
        scoped_cents in 1u32..100_000u32,
        generic_priority in -100i32..100i32,
        scoped_first in any::<bool>()
    ) {
        let mut generic = TestDataFactory::candidate("generic", Decimal::new(generic_cents as i64, 2));
        generic.priority = generic_priority;
        let scoped = TestDataFactory::catalog_candidate("scoped", "5", Decimal::new(scoped_cents as i64, 2));

        let candidates = if scoped_first {
            vec![scoped, generic]
        } else {
            vec![generic, scoped]
        };

        let resolved = PriceResolver::new()
            .resolve("v1", &candidates, &TestDataFactory::context().with_catalog("5"))
            .unwrap();

        prop_assert_eq!(resolved.source_candidate_id, "scoped");
        prop_assert_eq!(resolved.specificity_score, 1);
    }

    #[test]
    fn test_quantity_tier_membership(
        min in 1i32..50i32,
        span in 0i32..50i32,
        quantity in 1i32..120i32
    ) {
        let mut c = TestDataFactory::candidate("tier", dec!(10.00));
        c.min_quantity = min;
        c.max_quantity = Some(min + span);

        let mut context = TestDataFactory::context();
        context.quantity = quantity;

        let result = PriceResolver::new().resolve("v1", &[c], &context);
        let inside = quantity >= min && quantity <= min + span;
        prop_assert_eq!(result.is_ok(), inside);
    }
}

#[test]
fn test_scenario_catalog_price_wins_over_generic() {
    let candidates = vec![
        TestDataFactory::candidate("generic", dec!(20.00)),
        TestDataFactory::catalog_candidate("catalog-5", "5", dec!(15.00)),
    ];

    let resolved = PriceResolver::new()
        .resolve("v1", &candidates, &TestDataFactory::context().with_catalog("5"))
        .unwrap();

    assert_eq!(resolved.amount, dec!(15.00));
}

#[test]
fn test_scenario_unknown_catalog_falls_back() {
    let candidates = vec![
        TestDataFactory::candidate("generic", dec!(20.00)),
        TestDataFactory::catalog_candidate("catalog-5", "5", dec!(15.00)),
    ];

    let resolved = PriceResolver::new()
        .resolve("v1", &candidates, &TestDataFactory::context().with_catalog("9"))
        .unwrap();

    assert_eq!(resolved.amount, dec!(20.00));
}

#[test]
fn test_scenario_quantity_above_tier_moves_to_next_candidate() {
    let mut small = TestDataFactory::candidate("small", dec!(10.00));
    small.max_quantity = Some(2);
    small.priority = 10;
    let fallback = TestDataFactory::candidate("fallback", dec!(11.00));

    let mut context = TestDataFactory::context();
    context.quantity = 3;

    let resolver = PriceResolver::new();
    let resolved = resolver
        .resolve("v1", &[small.clone(), fallback], &context)
        .unwrap();
    assert_eq!(resolved.source_candidate_id, "fallback");

    let result = resolver.resolve("v1", &[small], &context);
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn test_quantity_boundaries_five_to_ten() {
    let mut c = TestDataFactory::candidate("tier", dec!(10.00));
    c.min_quantity = 5;
    c.max_quantity = Some(10);
    let resolver = PriceResolver::new();

    for (quantity, expected) in [(4, false), (5, true), (10, true), (11, false)] {
        let mut context = TestDataFactory::context();
        context.quantity = quantity;
        assert_eq!(
            resolver.resolve("v1", &[c.clone()], &context).is_ok(),
            expected,
            "quantity {}",
            quantity
        );
    }
}

#[test]
fn test_ends_at_is_inclusive() {
    let mut c = TestDataFactory::candidate("timed", dec!(10.00));
    c.ends_at = Some(TestDataFactory::now());
    let resolver = PriceResolver::new();

    let at_end = TestDataFactory::context();
    assert!(resolver.resolve("v1", &[c.clone()], &at_end).is_ok());

    let mut after_end = TestDataFactory::context();
    after_end.as_of = TestDataFactory::now() + Duration::seconds(1);
    assert!(matches!(
        resolver.resolve("v1", &[c], &after_end),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_currency_is_never_converted() {
    let mut usd = TestDataFactory::candidate("usd", dec!(10.00));
    usd.currency = Currency::USD;

    let result = PriceResolver::new().resolve("v1", &[usd], &TestDataFactory::context());
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
