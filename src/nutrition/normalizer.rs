// ABOUTME: Maps raw food-composition records onto the fixed four-nutrient schema
// ABOUTME: Substring bucket matching, last-write-wins duplicates, first-qualifying reference portion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Nutrient Normalizer
//!
//! External records name nutrients inconsistently ("Energy", "Energy (kcal)",
//! "Total lipid (fat)", "Carbohydrate, by difference"). Classification is a
//! substring heuristic over the lowercase trimmed name, kept intentionally
//! identical to the original data interpretation so cached estimates stay
//! comparable. Unmatched entries are ignored; a bucket hit by several
//! entries keeps the last one.

use crate::config::NormalizerConfig;
use crate::models::{FoodRecord, NormalizedNutrients, PortionDefinition};

/// The four nutrient buckets of the fixed schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NutrientBucket {
    Calories,
    Protein,
    Fat,
    Carbs,
}

/// Classify a raw nutrient name into a bucket, first match wins.
///
/// Energy requires an explicit kcal/calorie marker in the name so that
/// kJ-denominated energy rows are not mistaken for kcal. Beyond that, units
/// are not verified — amounts are assumed per 100 g of the food.
fn classify_nutrient_name(name: &str) -> Option<NutrientBucket> {
    let n = name.trim().to_lowercase();
    if n.is_empty() {
        return None;
    }
    if n.contains("energy") && (n.contains("kcal") || n.contains("calorie")) {
        return Some(NutrientBucket::Calories);
    }
    if n.contains("protein") {
        return Some(NutrientBucket::Protein);
    }
    if n.contains("lipid") || n.contains("fat") {
        return Some(NutrientBucket::Fat);
    }
    if n.contains("carbohydrate") || n.contains("carb") {
        return Some(NutrientBucket::Carbs);
    }
    None
}

/// Select the reference portion mass from a record's portion definitions.
///
/// First portion whose gram weight exceeds the configured threshold wins;
/// with no qualifying portion the default (100 g) applies. The tie-break is
/// first-qualifying, not largest, and is load-bearing for compatibility.
fn reference_portion_grams(portions: &[PortionDefinition], config: &NormalizerConfig) -> f64 {
    portions
        .iter()
        .filter_map(|p| p.gram_weight)
        .find(|&gw| gw.is_finite() && gw > config.min_portion_grams)
        .unwrap_or(config.default_reference_grams)
}

/// Normalize one [`FoodRecord`] onto the fixed nutrient schema.
///
/// Nutrient entries without an amount are skipped. Absent buckets stay
/// `None` — missing data propagates instead of becoming zero. The returned
/// `reference_portion_grams` is always positive.
#[must_use]
pub fn normalize_record(record: &FoodRecord, config: &NormalizerConfig) -> NormalizedNutrients {
    let mut out = NormalizedNutrients {
        calories: None,
        protein_g: None,
        fat_g: None,
        carbs_g: None,
        reference_portion_grams: reference_portion_grams(&record.portions, config),
    };

    for entry in &record.nutrients {
        let Some(amount) = entry.amount else {
            continue;
        };
        match classify_nutrient_name(&entry.name) {
            Some(NutrientBucket::Calories) => out.calories = Some(amount),
            Some(NutrientBucket::Protein) => out.protein_g = Some(amount),
            Some(NutrientBucket::Fat) => out.fat_g = Some(amount),
            Some(NutrientBucket::Carbs) => out.carbs_g = Some(amount),
            None => {}
        }
    }

    out
}
