// ABOUTME: Sums estimated nutrient totals across an inventory via the lookup capability
// ABOUTME: Per-entry estimates with null tolerance, fail-fast or best-effort batch policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Aggregator
//!
//! Request-scoped batch operation: for each inventory entry, fetch the food
//! record through the [`NutrientLookup`] capability, normalize it, resolve
//! grams, and scale the per-100g values to the entry's available mass.
//! Missing nutrient data degrades to `None` per entry and counts as zero in
//! the grand totals. The default policy fails the whole aggregation on the
//! first lookup failure; [`AggregationPolicy::BestEffort`] records skipped
//! entries instead. Lookups are awaited sequentially, one per distinct item.

use crate::config::{AggregationPolicy, EngineConfig, NormalizerConfig};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::external::NutrientLookup;
use crate::models::{
    AggregateResult, InventoryEntry, MacroAmounts, NutrientEstimate, NutrientTotals, SkippedEntry,
};
use crate::nutrition::normalizer::normalize_record;
use crate::nutrition::quantity::{available_grams, validate_entry};

/// Round to 2 decimal places, the aggregation presentation precision
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate the nutrients one inventory entry contributes.
///
/// Fetches the entry's food record, normalizes it, and scales the per-100g
/// values by `available_grams / 100`, rounding each total to 2 decimals.
/// Absent per-100g values stay `None` in the totals.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero FDC ID, or the lookup's
/// `NotFound`/`LookupError`.
pub async fn estimate_entry(
    entry: &InventoryEntry,
    lookup: &dyn NutrientLookup,
    config: &NormalizerConfig,
) -> AppResult<NutrientEstimate> {
    validate_entry(entry)?;

    let record = lookup.lookup(entry.fdc_id).await?;
    let normalized = normalize_record(&record, config);
    let grams = available_grams(entry.quantity, normalized.reference_portion_grams);
    let factor = grams / 100.0;

    let per_100g = MacroAmounts {
        calories: normalized.calories,
        protein_g: normalized.protein_g,
        fat_g: normalized.fat_g,
        carbs_g: normalized.carbs_g,
    };
    let total = MacroAmounts {
        calories: per_100g.calories.map(|v| round2(v * factor)),
        protein_g: per_100g.protein_g.map(|v| round2(v * factor)),
        fat_g: per_100g.fat_g.map(|v| round2(v * factor)),
        carbs_g: per_100g.carbs_g.map(|v| round2(v * factor)),
    };

    Ok(NutrientEstimate {
        fdc_id: entry.fdc_id,
        description: entry.description.clone(),
        available_grams: grams,
        reference_portion_grams: normalized.reference_portion_grams,
        per_100g,
        total,
    })
}

/// Aggregate estimated nutrients across an ordered inventory.
///
/// The breakdown preserves input order. Grand totals count absent values as
/// zero and are rounded to 2 decimals.
///
/// # Errors
///
/// Returns `EmptyInventory` for zero entries and `InvalidInput` for a
/// structurally invalid entry under either policy. Under
/// [`AggregationPolicy::FailFast`] the first lookup failure aborts the
/// batch; under [`AggregationPolicy::BestEffort`] failed lookups land in
/// the result's `skipped` list.
pub async fn aggregate_inventory(
    entries: &[InventoryEntry],
    lookup: &dyn NutrientLookup,
    config: &EngineConfig,
) -> AppResult<AggregateResult> {
    if entries.is_empty() {
        return Err(AppError::empty_inventory("aggregation"));
    }

    tracing::debug!(entries = entries.len(), policy = ?config.aggregation, "aggregating inventory");

    let mut totals = NutrientTotals::default();
    let mut breakdown = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
        let estimate = match estimate_entry(entry, lookup, &config.normalizer).await {
            Ok(estimate) => estimate,
            Err(err)
                if config.aggregation == AggregationPolicy::BestEffort
                    && matches!(err.code, ErrorCode::NotFound | ErrorCode::LookupError) =>
            {
                tracing::warn!(fdc_id = entry.fdc_id, error = %err, "skipping entry under best-effort policy");
                skipped.push(SkippedEntry {
                    fdc_id: entry.fdc_id,
                    reason: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        totals.calories += estimate.total.calories.unwrap_or(0.0);
        totals.protein_g += estimate.total.protein_g.unwrap_or(0.0);
        totals.fat_g += estimate.total.fat_g.unwrap_or(0.0);
        totals.carbs_g += estimate.total.carbs_g.unwrap_or(0.0);
        breakdown.push(estimate);
    }

    totals.calories = round2(totals.calories);
    totals.protein_g = round2(totals.protein_g);
    totals.fat_g = round2(totals.fat_g);
    totals.carbs_g = round2(totals.carbs_g);

    Ok(AggregateResult {
        totals,
        breakdown,
        skipped,
    })
}
