// ABOUTME: Typed configuration for the nutrition pipeline, grouped per concern
// ABOUTME: Aggregates normalizer, profile, aggregation, and planner settings with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Configuration
//!
//! Every tunable constant of the pipeline lives in a config struct with a
//! documented default. Defaults reproduce the reference behavior exactly;
//! validation catches combinations that cannot be meaningful.

/// Nutrient extraction and target profile settings
pub mod nutrition;

/// Aggregation policy and greedy planner settings
pub mod planner;

pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentsConfig, MacroSplitConfig, NormalizerConfig,
    ProfileConfig,
};
pub use planner::{AggregationPolicy, PlannerConfig};

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Nutrient normalizer settings
    pub normalizer: NormalizerConfig,
    /// Target profile calculation settings
    pub profile: ProfileConfig,
    /// Aggregation failure policy
    pub aggregation: AggregationPolicy,
    /// Greedy day planner settings
    pub planner: PlannerConfig,
}

impl EngineConfig {
    /// Validate the complete configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any section holds values that cannot be
    /// meaningful (macro split not summing to 100, non-positive bounds).
    pub fn validate(&self) -> AppResult<()> {
        self.normalizer.validate()?;
        self.profile.validate()?;
        self.planner.validate()
    }
}
