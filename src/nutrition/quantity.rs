// ABOUTME: Converts user-declared inventory quantities into absolute gram amounts
// ABOUTME: Quantity is a count of reference portions; the declared unit text is never parsed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Quantity Resolver
//!
//! A stored quantity is interpreted as a number of reference portions,
//! regardless of what the free-text unit field claims. The product with the
//! reference portion mass is exact — no rounding happens here.

use crate::errors::{AppError, AppResult};
use crate::models::InventoryEntry;

/// Resolve an inventory quantity to absolute grams.
///
/// `quantity` counts reference portions. A non-positive or non-finite
/// quantity defaults to 1.0 portion.
#[must_use]
pub fn available_grams(quantity: f64, reference_portion_grams: f64) -> f64 {
    let portions = if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        1.0
    };
    portions * reference_portion_grams
}

/// Structural validation of an inventory entry.
///
/// Only the identifier is structural: a zero FDC ID can never resolve.
/// Quantity problems are not errors — they degrade to the 1-portion default.
pub fn validate_entry(entry: &InventoryEntry) -> AppResult<()> {
    if entry.fdc_id == 0 {
        return Err(AppError::invalid_input(format!(
            "invalid FDC ID for inventory entry '{}'",
            entry.description
        )));
    }
    Ok(())
}
