// ABOUTME: Greedy 7-day meal allocator over a simulated depleting inventory pool
// ABOUTME: Rotating cursor per day, bounded attempt budget, monotonic cross-day depletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Greedy Day Planner
//!
//! Allocates discrete portions from the aggregated inventory across a fixed
//! 7-day horizon. Each day rotates its starting point through the inventory
//! and draws portions until the day's calorie total approximates the target
//! or the attempt budget runs out; either way the day is accepted as-is.
//! The simulated stock depletes monotonically across the whole run, so later
//! days see less availability. The planner is deterministic, conservative,
//! and bounded — it approximates the target, it does not optimize.

use crate::config::PlannerConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{DayPlan, NutrientEstimate, NutrientTotals, PlannedPortion};

/// Fixed planning horizon in days
pub const PLANNING_HORIZON_DAYS: usize = 7;

/// Planner-private depleting copy of available grams per inventory entry.
/// Created fresh per planning run, discarded after.
struct SimulatedStock {
    remaining_grams: Vec<f64>,
}

impl SimulatedStock {
    fn new(breakdown: &[NutrientEstimate]) -> Self {
        Self {
            remaining_grams: breakdown.iter().map(|b| b.available_grams).collect(),
        }
    }

    fn remaining(&self, index: usize) -> f64 {
        self.remaining_grams[index]
    }

    fn take(&mut self, index: usize, grams: f64) {
        self.remaining_grams[index] = (self.remaining_grams[index] - grams).max(0.0);
    }
}

/// Allocate inventory across the 7-day horizon toward a daily calorie target.
///
/// `target_calories` falls back to the configured default (2000) when
/// absent. `meals_per_day` is accepted for API compatibility but does not
/// bound the allocation; it is logged and otherwise inert.
///
/// # Errors
///
/// Returns `EmptyInventory` when the breakdown holds no entries — no valid
/// rotation exists, which is distinct from a plan that falls short on
/// calories (falling short is never an error).
pub fn plan_week(
    target_calories: Option<f64>,
    breakdown: &[NutrientEstimate],
    meals_per_day: u32,
    config: &PlannerConfig,
) -> AppResult<Vec<DayPlan>> {
    if breakdown.is_empty() {
        return Err(AppError::empty_inventory("planning"));
    }

    let daily_target = target_calories.unwrap_or(config.fallback_daily_calories);
    tracing::debug!(
        daily_target,
        items = breakdown.len(),
        meals_per_day,
        "planning week"
    );

    let mut stock = SimulatedStock::new(breakdown);
    let attempt_budget = breakdown.len() * config.attempts_per_item;
    let mut plan = Vec::with_capacity(PLANNING_HORIZON_DAYS);

    for day in 0..PLANNING_HORIZON_DAYS {
        let mut day_totals = NutrientTotals::default();
        let mut items_used = Vec::new();
        let mut cursor = day % breakdown.len();
        let mut attempts = 0;

        while day_totals.calories < daily_target && attempts < attempt_budget {
            let index = cursor % breakdown.len();
            cursor += 1;
            attempts += 1;

            if stock.remaining(index) < config.depletion_floor_grams {
                continue;
            }

            let item = &breakdown[index];
            let portion_grams = if item.reference_portion_grams > 0.0 {
                item.reference_portion_grams
            } else {
                config.default_portion_grams
            };
            let taken = portion_grams.min(stock.remaining(index));
            let factor = taken / 100.0;

            day_totals.calories += item.per_100g.calories.unwrap_or(0.0) * factor;
            day_totals.protein_g += item.per_100g.protein_g.unwrap_or(0.0) * factor;
            day_totals.fat_g += item.per_100g.fat_g.unwrap_or(0.0) * factor;
            day_totals.carbs_g += item.per_100g.carbs_g.unwrap_or(0.0) * factor;

            stock.take(index, taken);
            items_used.push(PlannedPortion {
                fdc_id: item.fdc_id,
                grams_taken: taken,
            });
        }

        plan.push(DayPlan {
            day_index: day as u8,
            items_used,
            day_totals,
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MacroAmounts;

    fn item(fdc_id: u64, available_grams: f64, portion: f64, calories_per_100g: f64) -> NutrientEstimate {
        NutrientEstimate {
            fdc_id,
            description: format!("item {fdc_id}"),
            available_grams,
            reference_portion_grams: portion,
            per_100g: MacroAmounts {
                calories: Some(calories_per_100g),
                protein_g: Some(5.0),
                fat_g: None,
                carbs_g: Some(10.0),
            },
            total: MacroAmounts::default(),
        }
    }

    #[test]
    fn test_empty_inventory_is_a_precondition_failure() {
        let err = plan_week(Some(2000.0), &[], 3, &PlannerConfig::default()).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::EmptyInventory);
    }

    #[test]
    fn test_horizon_is_seven_days() {
        let breakdown = vec![item(1, 1000.0, 100.0, 150.0)];
        let plan = plan_week(Some(300.0), &breakdown, 3, &PlannerConfig::default()).unwrap();
        assert_eq!(plan.len(), 7);
        for (day, entry) in plan.iter().enumerate() {
            assert_eq!(usize::from(entry.day_index), day);
        }
    }

    #[test]
    fn test_total_drawn_never_exceeds_available() {
        // 50 g of a 100 g-portion item: day 0 takes min(100, 50) = 50 g and
        // exhausts the stock; the remaining six days draw nothing
        let breakdown = vec![item(1, 50.0, 100.0, 100.0)];
        let plan = plan_week(Some(2000.0), &breakdown, 3, &PlannerConfig::default()).unwrap();

        let total_drawn: f64 = plan
            .iter()
            .flat_map(|d| d.items_used.iter())
            .map(|p| p.grams_taken)
            .sum();
        assert!(total_drawn <= 50.0 + 1e-9);
        assert_eq!(plan[0].items_used.len(), 1);
        assert!((plan[0].items_used[0].grams_taken - 50.0).abs() < f64::EPSILON);
        for day in &plan[1..] {
            assert!(day.items_used.is_empty());
        }
    }

    #[test]
    fn test_day_stops_at_calorie_target() {
        // 400 kcal per 100 g portion against a 1000 kcal target: the day
        // crosses the target on the third portion and stops
        let breakdown = vec![item(1, 10_000.0, 100.0, 400.0)];
        let plan = plan_week(Some(1000.0), &breakdown, 3, &PlannerConfig::default()).unwrap();
        assert_eq!(plan[0].items_used.len(), 3);
        assert!((plan[0].day_totals.calories - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_attempt_budget_bounds_null_calorie_items() {
        // an item with unknown calories never reaches the target; the
        // attempt budget (4 x 1) is what ends the day
        let mut no_cal = item(1, 10_000.0, 100.0, 0.0);
        no_cal.per_100g.calories = None;
        let plan = plan_week(Some(2000.0), &[no_cal], 3, &PlannerConfig::default()).unwrap();
        assert_eq!(plan[0].items_used.len(), 4);
        assert!((plan[0].day_totals.calories).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rotation_starts_at_day_mod_len() {
        let breakdown = vec![
            item(1, 10_000.0, 100.0, 400.0),
            item(2, 10_000.0, 100.0, 400.0),
            item(3, 10_000.0, 100.0, 400.0),
        ];
        let plan = plan_week(Some(100.0), &breakdown, 3, &PlannerConfig::default()).unwrap();
        // the low target is crossed by the first portion of each day, so the
        // day's first item exposes the cursor start
        assert_eq!(plan[0].items_used[0].fdc_id, 1);
        assert_eq!(plan[1].items_used[0].fdc_id, 2);
        assert_eq!(plan[2].items_used[0].fdc_id, 3);
        assert_eq!(plan[3].items_used[0].fdc_id, 1);
    }

    #[test]
    fn test_depleted_items_are_skipped_but_consume_attempts() {
        let breakdown = vec![
            item(1, 0.5, 100.0, 400.0), // below the 1.0 g floor from the start
            item(2, 10_000.0, 100.0, 400.0),
        ];
        let plan = plan_week(Some(300.0), &breakdown, 3, &PlannerConfig::default()).unwrap();
        // day 0 starts at item 1, skips it, then draws from item 2
        assert_eq!(plan[0].items_used.len(), 1);
        assert_eq!(plan[0].items_used[0].fdc_id, 2);
    }

    #[test]
    fn test_planner_is_deterministic() {
        let breakdown = vec![
            item(1, 300.0, 120.0, 250.0),
            item(2, 500.0, 80.0, 90.0),
            item(3, 150.0, 100.0, 310.0),
        ];
        let first = plan_week(Some(1800.0), &breakdown, 3, &PlannerConfig::default()).unwrap();
        let second = plan_week(Some(1800.0), &breakdown, 3, &PlannerConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_target_when_absent() {
        let breakdown = vec![item(1, 10_000.0, 100.0, 500.0)];
        let plan = plan_week(None, &breakdown, 3, &PlannerConfig::default()).unwrap();
        // 2000 kcal fallback / 500 kcal per portion = 4 portions on day 0
        assert_eq!(plan[0].items_used.len(), 4);
    }
}
