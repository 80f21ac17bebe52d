// ABOUTME: Common data models for food records, inventory, estimates, targets, and plans
// ABOUTME: Shared shapes exchanged between the normalizer, aggregator, profile calculator, and planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Data Model
//!
//! Plain structured data flowing through the pipeline. Nutrient fields that
//! may be absent from a source record stay `Option<f64>` until aggregation;
//! they are never silently zeroed before then.

use serde::{Deserialize, Serialize};

/// One nutrient entry from an external food-composition record.
///
/// Shape is deliberately loose: the provider's naming and units are not
/// trusted beyond the normalizer's substring heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientEntry {
    /// Nutrient name as reported (e.g. "Energy", "Total lipid (fat)")
    pub name: String,
    /// Amount per 100 g of the food, when reported
    pub amount: Option<f64>,
    /// Unit as reported (e.g. "g", "kcal") — advisory only
    pub unit: Option<String>,
}

/// A named portion definition from an external record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortionDefinition {
    /// Portion label (e.g. "1 cup", "1 medium"), when reported
    pub label: Option<String>,
    /// Gram weight of one such portion, when reported
    pub gram_weight: Option<f64>,
}

/// Opaque external food-composition record, keyed by FDC identifier.
///
/// Immutable once fetched; the adapter caches it by identifier with a
/// freshness window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRecord {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Zero or more nutrient entries
    pub nutrients: Vec<NutrientEntry>,
    /// Zero or more portion definitions
    pub portions: Vec<PortionDefinition>,
}

/// Fixed nutrient schema extracted from a [`FoodRecord`], per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedNutrients {
    /// Energy in kcal per 100 g
    pub calories: Option<f64>,
    /// Protein in grams per 100 g
    pub protein_g: Option<f64>,
    /// Fat in grams per 100 g
    pub fat_g: Option<f64>,
    /// Carbohydrates in grams per 100 g
    pub carbs_g: Option<f64>,
    /// Grams one user-declared unit of this food is assumed to represent.
    /// Always positive; 100.0 when no usable portion definition exists.
    pub reference_portion_grams: f64,
}

/// One stored pantry entry, owned by the caller and read-only here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// `FoodData` Central ID of the food
    pub fdc_id: u64,
    /// Human description of the entry
    pub description: String,
    /// Number of reference portions on hand
    pub quantity: f64,
    /// Declared unit, free text — never parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}

/// The four macro amounts with absence preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroAmounts {
    /// Energy in kcal
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein_g: Option<f64>,
    /// Fat in grams
    pub fat_g: Option<f64>,
    /// Carbohydrates in grams
    pub carbs_g: Option<f64>,
}

/// The four macro amounts as concrete sums (absent contributions count as 0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
}

/// Per-entry nutrient estimate derived from one inventory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientEstimate {
    /// `FoodData` Central ID of the food
    pub fdc_id: u64,
    /// Description carried over from the inventory entry
    pub description: String,
    /// Grams available: quantity x reference portion, exact
    pub available_grams: f64,
    /// Reference portion mass in grams
    pub reference_portion_grams: f64,
    /// Normalized per-100g values
    pub per_100g: MacroAmounts,
    /// Per-100g values scaled to `available_grams`, rounded to 2 decimals
    pub total: MacroAmounts,
}

/// An inventory entry the best-effort aggregation policy skipped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// `FoodData` Central ID of the skipped entry
    pub fdc_id: u64,
    /// Why the lookup failed
    pub reason: String,
}

/// Aggregated nutrient estimate across an inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Grand totals, absent contributions counted as 0, rounded to 2 decimals
    pub totals: NutrientTotals,
    /// Per-entry estimates in input order
    pub breakdown: Vec<NutrientEstimate>,
    /// Entries skipped under [`AggregationPolicy::BestEffort`];
    /// always empty under fail-fast
    ///
    /// [`AggregationPolicy::BestEffort`]: crate::config::AggregationPolicy::BestEffort
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntry>,
}

/// Body metrics and lifestyle selections the target calculation starts from.
///
/// Optional fields take documented defaults: age 30, gender "male",
/// activity level "sedentary", goal "maintain".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetInputs {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: Option<u32>,
    /// Gender as free text; only "male" (case-insensitive) selects the male offset
    pub gender: Option<String>,
    /// Activity level as free text (sedentary, light, moderate, active)
    pub activity_level: Option<String>,
    /// Goal as free text (lose, maintain, gain)
    pub goal: Option<String>,
}

/// Daily calorie and macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily energy target in kcal
    pub calories: f64,
    /// Daily protein target in grams
    pub protein_g: f64,
    /// Daily fat target in grams
    pub fat_g: f64,
    /// Daily carbohydrate target in grams
    pub carbs_g: f64,
}

/// Derived energy/macro profile, recomputed on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Body mass index, 0.0 when height is unusable
    pub bmi: f64,
    /// Basal metabolic rate (Mifflin-St Jeor), kcal/day
    pub bmr: f64,
    /// Daily nutrition targets after activity and goal adjustment
    pub nutrition: MacroTargets,
}

/// One portion drawn from inventory for a planned day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPortion {
    /// `FoodData` Central ID of the food drawn from
    pub fdc_id: u64,
    /// Grams taken from the simulated stock
    pub grams_taken: f64,
}

/// Allocation for a single day of the 7-day planning horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day index within the horizon, 0..=6
    pub day_index: u8,
    /// Portions drawn, in allocation order
    pub items_used: Vec<PlannedPortion>,
    /// Estimated nutrient totals for the day
    pub day_totals: NutrientTotals,
}
