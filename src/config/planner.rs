// ABOUTME: Configuration for inventory aggregation policy and the greedy day planner
// ABOUTME: Attempt budgets, depletion floor, and calorie fallback with reference defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! Aggregation and Planner Configuration

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// How the aggregator reacts to a failed lookup within a batch.
///
/// The reference behavior is fail-fast: one failed lookup fails the whole
/// aggregation. Best-effort keeps going and reports what it skipped.
/// Structurally invalid entries abort under both policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Propagate the first `NotFound`/`LookupError` encountered
    #[default]
    FailFast,
    /// Record failed entries in the result's `skipped` list and continue
    BestEffort,
}

/// Greedy day planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Allocation attempts allowed per day, as a multiple of inventory length (4)
    pub attempts_per_item: usize,
    /// Remaining grams below which an item is considered exhausted (1.0)
    pub depletion_floor_grams: f64,
    /// Daily calorie target assumed when the profile carries none (2000.0)
    pub fallback_daily_calories: f64,
    /// Portion size assumed when a breakdown entry reports a non-positive
    /// reference portion (100.0)
    pub default_portion_grams: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            attempts_per_item: 4,
            depletion_floor_grams: 1.0,
            fallback_daily_calories: 2000.0,
            default_portion_grams: 100.0,
        }
    }
}

impl PlannerConfig {
    /// Validate planner bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the attempt budget is zero or the default
    /// portion is not positive.
    pub fn validate(&self) -> AppResult<()> {
        if self.attempts_per_item == 0 {
            return Err(AppError::config("attempts_per_item must be at least 1"));
        }
        if self.default_portion_grams <= 0.0 {
            return Err(AppError::config("default_portion_grams must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_fail_fast() {
        assert_eq!(AggregationPolicy::default(), AggregationPolicy::FailFast);
    }

    #[test]
    fn test_zero_attempt_budget_rejected() {
        let config = PlannerConfig {
            attempts_per_item: 0,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
