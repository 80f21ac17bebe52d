// ABOUTME: External nutrient-data capability: lookup trait, USDA client, response cache
// ABOUTME: The core only ever sees the NutrientLookup seam; resilience lives in the adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # External Interfaces
//!
//! The pipeline consumes food-composition data exclusively through the
//! [`NutrientLookup`] capability. The USDA `FoodData` Central client is the
//! production adapter; [`MockUsdaClient`] serves tests. Retry and caching
//! policy belong here, never in the core.

use crate::errors::AppResult;
use crate::models::FoodRecord;
use async_trait::async_trait;

/// Response caching with read-time TTL expiry and LRU bounds
pub mod cache;

/// USDA `FoodData` Central API client
pub mod usda_client;

pub use cache::ResponseCache;
pub use usda_client::{FoodSearchResult, MockUsdaClient, UsdaClient, UsdaClientConfig};

/// Capability to resolve an external food identifier to its composition record.
///
/// Fails with `NotFound` when the identifier is unknown to the provider and
/// `LookupError` on provider/transport failure. Implementations must not
/// retry on behalf of the core.
#[async_trait]
pub trait NutrientLookup: Send + Sync {
    /// Fetch the food record for an external identifier
    async fn lookup(&self, fdc_id: u64) -> AppResult<FoodRecord>;
}
