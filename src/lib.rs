// ABOUTME: Library entry point for the pantry nutrition estimation and meal allocation engine
// ABOUTME: Exposes the pipeline modules, data model, configuration, and the USDA adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

#![deny(unsafe_code)]

//! # Pantry Planner
//!
//! Estimates nutrient availability from a food inventory and proposes a
//! 7-day meal allocation toward a calorie/macro target.
//!
//! ## Architecture
//!
//! The core is a synchronous, side-effect-free pipeline:
//! - **Normalizer**: maps heterogeneous food-composition records onto a
//!   fixed {calories, protein, fat, carbs} schema plus a reference portion
//! - **Quantity resolver**: converts declared quantities into grams
//! - **Aggregator**: sums estimated totals across an inventory, tolerating
//!   partial data per item
//! - **Target profile calculator**: BMI, Mifflin-St Jeor BMR, activity and
//!   goal adjustment, macro split
//! - **Greedy day planner**: bounded allocation over a rotating, depleting
//!   simulated stock
//!
//! External food data arrives exclusively through the
//! [`external::NutrientLookup`] capability; the USDA `FoodData` Central
//! client is the production adapter. The planner is a conservative bounded
//! heuristic, not an optimizer: plans approximate the calorie target and a
//! day that falls short is still a valid day.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pantry_planner::config::EngineConfig;
//! use pantry_planner::external::MockUsdaClient;
//! use pantry_planner::models::{InventoryEntry, TargetInputs};
//! use pantry_planner::nutrition::{aggregate_inventory, calculate_target_profile, plan_week};
//!
//! # async fn example() -> pantry_planner::errors::AppResult<()> {
//! let config = EngineConfig::default();
//! let lookup = MockUsdaClient::new();
//! let inventory = vec![InventoryEntry {
//!     fdc_id: MockUsdaClient::APPLE,
//!     description: "apples".into(),
//!     quantity: 6.0,
//!     unit_name: Some("pieces".into()),
//! }];
//!
//! let profile = calculate_target_profile(
//!     &TargetInputs {
//!         weight_kg: 70.0,
//!         height_cm: 175.0,
//!         age: None,
//!         gender: None,
//!         activity_level: None,
//!         goal: None,
//!     },
//!     &config.profile,
//! );
//! let aggregate = aggregate_inventory(&inventory, &lookup, &config).await?;
//! let plan = plan_week(
//!     Some(profile.nutrition.calories),
//!     &aggregate.breakdown,
//!     3,
//!     &config.planner,
//! )?;
//! assert_eq!(plan.len(), 7);
//! # Ok(())
//! # }
//! ```

/// Typed configuration with reference defaults and validation
pub mod config;

/// Unified error handling with standard error codes
pub mod errors;

/// External nutrient-data capability and the USDA adapter
pub mod external;

/// Structured logging setup
pub mod logging;

/// Common data models exchanged between pipeline stages
pub mod models;

/// The nutrient-extraction-and-allocation pipeline
pub mod nutrition;
