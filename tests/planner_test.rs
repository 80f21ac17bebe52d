// ABOUTME: Integration tests for the greedy 7-day planner over aggregated inventories
// ABOUTME: Monotonic depletion, rotation, determinism, and the empty-inventory precondition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project
//! Greedy planner tests
//!
//! Runs the full aggregate-then-plan flow against the mock lookup
//! capability and checks the planner's bounding properties: stock is never
//! over-drawn or negative, rotation and depletion are reproducible, and an
//! empty inventory is a distinct precondition failure.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pantry_planner::config::EngineConfig;
use pantry_planner::errors::ErrorCode;
use pantry_planner::external::MockUsdaClient;
use pantry_planner::models::{FoodRecord, InventoryEntry, NutrientEntry};
use pantry_planner::nutrition::{aggregate_inventory, plan_week};
use std::collections::HashMap;

fn entry(fdc_id: u64, description: &str, quantity: f64) -> InventoryEntry {
    InventoryEntry {
        fdc_id,
        description: description.to_owned(),
        quantity,
        unit_name: None,
    }
}

/// Mock holding a single 100 kcal/100g food with no portion data
fn single_food_client() -> MockUsdaClient {
    let mut client = MockUsdaClient::new();
    client.insert(FoodRecord {
        fdc_id: 2001,
        description: "plain rations".to_owned(),
        nutrients: vec![NutrientEntry {
            name: "Energy (kcal)".to_owned(),
            amount: Some(100.0),
            unit: Some("kcal".to_owned()),
        }],
        portions: vec![],
    });
    client
}

// ============================================================================
// DEPLETION ACROSS THE HORIZON
// ============================================================================

#[tokio::test]
async fn test_total_drawn_never_exceeds_available_grams() {
    // half a 100 g unit on hand: 50 g total, against a 2000 kcal target
    let client = single_food_client();
    let config = EngineConfig::default();
    let aggregate = aggregate_inventory(&[entry(2001, "rations", 0.5)], &client, &config)
        .await
        .unwrap();
    assert!((aggregate.breakdown[0].available_grams - 50.0).abs() < f64::EPSILON);

    let plan = plan_week(Some(2000.0), &aggregate.breakdown, 3, &config.planner).unwrap();

    let mut drawn_per_item: HashMap<u64, f64> = HashMap::new();
    for day in &plan {
        for portion in &day.items_used {
            assert!(portion.grams_taken > 0.0, "no zero-gram portions");
            *drawn_per_item.entry(portion.fdc_id).or_default() += portion.grams_taken;
        }
    }
    // across 7 days the draw never exceeds what was available
    assert!(*drawn_per_item.get(&2001).unwrap() <= 50.0 + 1e-9);
    // day 0 takes min(100, 50) = 50 g and exhausts the item
    assert_eq!(plan[0].items_used.len(), 1);
    for day in &plan[1..] {
        assert!(day.items_used.is_empty(), "exhausted stock must stay empty");
    }
}

#[tokio::test]
async fn test_later_days_see_less_availability() {
    // 3 x 100 g of a 400 kcal/100g food against a high target: early days
    // drain the pool, later days go hungry rather than re-stocking
    let mut client = MockUsdaClient::new();
    client.insert(FoodRecord {
        fdc_id: 2002,
        description: "dense bars".to_owned(),
        nutrients: vec![NutrientEntry {
            name: "Energy (kcal)".to_owned(),
            amount: Some(400.0),
            unit: None,
        }],
        portions: vec![],
    });
    let config = EngineConfig::default();
    let aggregate = aggregate_inventory(&[entry(2002, "bars", 3.0)], &client, &config)
        .await
        .unwrap();

    let plan = plan_week(Some(5000.0), &aggregate.breakdown, 3, &config.planner).unwrap();
    let day0: f64 = plan[0].items_used.iter().map(|p| p.grams_taken).sum();
    let total: f64 = plan
        .iter()
        .flat_map(|d| d.items_used.iter())
        .map(|p| p.grams_taken)
        .sum();

    // the attempt budget (4 x 1 item) caps day 0 at 300 g, leaving nothing
    assert!((day0 - 300.0).abs() < f64::EPSILON);
    assert!((total - 300.0).abs() < f64::EPSILON);
}

// ============================================================================
// DETERMINISM AND ROTATION
// ============================================================================

#[tokio::test]
async fn test_identical_inputs_produce_identical_plans() {
    let client = MockUsdaClient::new();
    let config = EngineConfig::default();
    let inventory = vec![
        entry(MockUsdaClient::CHICKEN_BREAST, "chicken", 4.0),
        entry(MockUsdaClient::APPLE, "apples", 6.0),
    ];
    let aggregate = aggregate_inventory(&inventory, &client, &config)
        .await
        .unwrap();

    let first = plan_week(Some(1800.0), &aggregate.breakdown, 3, &config.planner).unwrap();
    let second = plan_week(Some(1800.0), &aggregate.breakdown, 3, &config.planner).unwrap();

    assert_eq!(first, second);
    let first_json = serde_json::to_vec(&first).unwrap();
    let second_json = serde_json::to_vec(&second).unwrap();
    assert_eq!(first_json, second_json, "plans must serialize identically");
}

#[tokio::test]
async fn test_rotation_offsets_daily_starting_item() {
    let client = MockUsdaClient::new();
    let config = EngineConfig::default();
    let inventory = vec![
        entry(MockUsdaClient::CHICKEN_BREAST, "chicken", 50.0),
        entry(MockUsdaClient::APPLE, "apples", 50.0),
    ];
    let aggregate = aggregate_inventory(&inventory, &client, &config)
        .await
        .unwrap();

    // a tiny target is crossed by the first drawn portion, exposing the
    // rotating cursor: day d starts at index d mod 2
    let plan = plan_week(Some(1.0), &aggregate.breakdown, 3, &config.planner).unwrap();
    assert_eq!(plan[0].items_used[0].fdc_id, MockUsdaClient::CHICKEN_BREAST);
    assert_eq!(plan[1].items_used[0].fdc_id, MockUsdaClient::APPLE);
    assert_eq!(plan[2].items_used[0].fdc_id, MockUsdaClient::CHICKEN_BREAST);
}

// ============================================================================
// PRECONDITIONS AND DAY ACCEPTANCE
// ============================================================================

#[tokio::test]
async fn test_empty_breakdown_is_a_distinct_failure() {
    let config = EngineConfig::default();
    let err = plan_week(Some(2000.0), &[], 3, &config.planner).unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyInventory);
}

#[tokio::test]
async fn test_days_falling_short_are_still_accepted() {
    let client = single_food_client();
    let config = EngineConfig::default();
    let aggregate = aggregate_inventory(&[entry(2001, "rations", 1.0)], &client, &config)
        .await
        .unwrap();

    let plan = plan_week(Some(10_000.0), &aggregate.breakdown, 3, &config.planner).unwrap();
    assert_eq!(plan.len(), 7, "a short day never fails the plan");
    assert!(plan[0].day_totals.calories < 10_000.0);
}

#[tokio::test]
async fn test_plan_day_totals_reflect_contributions() {
    let client = single_food_client();
    let config = EngineConfig::default();
    let aggregate = aggregate_inventory(&[entry(2001, "rations", 2.0)], &client, &config)
        .await
        .unwrap();

    // 200 g at 100 kcal/100g: day 0 draws 100 g twice to chase 150 kcal
    let plan = plan_week(Some(150.0), &aggregate.breakdown, 3, &config.planner).unwrap();
    assert_eq!(plan[0].items_used.len(), 2);
    assert!((plan[0].day_totals.calories - 200.0).abs() < 1e-9);
    // day 1 has nothing left
    assert!(plan[1].items_used.is_empty());
}
