// ABOUTME: USDA FoodData Central API client implementing the NutrientLookup capability
// ABOUTME: Food search and detail retrieval with TTL caching, rate limiting, and a mock for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! USDA `FoodData` Central API Client
//!
//! The production adapter behind [`NutrientLookup`]. The API is free and
//! needs only an API key.
//!
//! # Features
//! - Food detail retrieval by FDC ID, converted to [`FoodRecord`]
//! - Food search with configurable page size
//! - Injectable TTL/LRU response caching to minimize API calls
//! - Rate limiting (default 30 requests per minute)
//! - Mock client for tests
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::errors::{AppError, AppResult};
use crate::external::cache::ResponseCache;
use crate::external::NutrientLookup;
use crate::models::{FoodRecord, NutrientEntry, PortionDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Environment variable holding the USDA API key
pub const USDA_API_KEY_VAR: &str = "USDA_API_KEY";

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for the USDA API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Cache TTL in seconds (default: 3600 = 1 hour)
    pub cache_ttl_secs: u64,
    /// Max cached responses (LRU eviction)
    pub max_cache_items: usize,
    /// Rate limit per minute
    pub rate_limit_per_minute: u32,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
            timeout_secs: 15,
            cache_ttl_secs: 3600,
            max_cache_items: 1000,
            rate_limit_per_minute: 30,
        }
    }
}

impl UsdaClientConfig {
    /// Build a configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `USDA_API_KEY` is unset or empty.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(USDA_API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::config(format!("{USDA_API_KEY_VAR} environment variable is not set"))
            })?;
        Ok(Self {
            api_key,
            ..Self::default()
        })
    }
}

/// USDA food search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g. "Survey (FNDDS)", "Foundation", "SR Legacy")
    pub data_type: Option<String>,
    /// Brand owner (for branded foods)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
}

// ── Wire DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    foods: Vec<SearchFoodItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFoodItem {
    fdc_id: u64,
    description: String,
    data_type: Option<String>,
    brand_owner: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodDetailsResponse {
    fdc_id: u64,
    description: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<FoodNutrientResponse>,
    #[serde(default)]
    food_portions: Vec<FoodPortionResponse>,
}

/// Nutrient rows appear in two shapes: flat (`nutrientName`/`unitName`) in
/// search payloads and nested (`nutrient.name`) in detail payloads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodNutrientResponse {
    nutrient: Option<NutrientInfo>,
    nutrient_name: Option<String>,
    unit_name: Option<String>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NutrientInfo {
    name: Option<String>,
    unit_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodPortionResponse {
    portion_description: Option<String>,
    modifier: Option<String>,
    gram_weight: Option<f64>,
}

impl From<FoodDetailsResponse> for FoodRecord {
    fn from(response: FoodDetailsResponse) -> Self {
        let nutrients = response
            .food_nutrients
            .into_iter()
            .map(|n| {
                let (nested_name, nested_unit) = n
                    .nutrient
                    .map(|i| (i.name, i.unit_name))
                    .unwrap_or((None, None));
                NutrientEntry {
                    name: n.nutrient_name.or(nested_name).unwrap_or_default(),
                    amount: n.amount,
                    unit: n.unit_name.or(nested_unit),
                }
            })
            .collect();
        let portions = response
            .food_portions
            .into_iter()
            .map(|p| PortionDefinition {
                label: p.portion_description.or(p.modifier),
                gram_weight: p.gram_weight,
            })
            .collect();
        Self {
            fdc_id: response.fdc_id,
            description: response.description.unwrap_or_default(),
            nutrients,
            portions,
        }
    }
}

// ── Rate limiting ───────────────────────────────────────────────────────

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Check if a request can be made, removing expired entries
    fn can_request(&mut self) -> bool {
        let now = Instant::now();
        self.requests
            .retain(|&t| now.duration_since(t) < self.window);
        self.requests.len() < self.limit as usize
    }

    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }

    async fn wait_if_needed(&mut self) {
        while !self.can_request() {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────────

/// USDA `FoodData` Central API client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
    details_cache: ResponseCache<u64, FoodRecord>,
    search_cache: ResponseCache<String, Vec<FoodSearchResult>>,
    rate_limiter: Mutex<RateLimiter>,
}

impl UsdaClient {
    /// Create a new USDA API client with caches sized from the configuration
    #[must_use]
    pub fn new(config: UsdaClientConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_cache_items.max(1)).unwrap_or(NonZeroUsize::MIN);
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let details_cache = ResponseCache::new(capacity, ttl);
        let search_cache = ResponseCache::new(capacity, ttl);
        Self::with_caches(config, details_cache, search_cache)
    }

    /// Create a client around externally constructed caches.
    ///
    /// The caches are owned by the adapter; callers wanting a different
    /// eviction shape (or a shared warm cache across clients is NOT
    /// supported — each client owns its caches) inject them here.
    #[must_use]
    pub fn with_caches(
        config: UsdaClientConfig,
        details_cache: ResponseCache<u64, FoodRecord>,
        search_cache: ResponseCache<String, Vec<FoodSearchResult>>,
    ) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));
        let http_client = reqwest::Client::new();
        Self {
            config,
            http_client,
            details_cache,
            search_cache,
            rate_limiter: Mutex::new(rate_limiter),
        }
    }

    /// Search for foods by query string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query or out-of-range page size,
    /// `LookupError` if the API request fails.
    pub async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> AppResult<Vec<FoodSearchResult>> {
        if query.is_empty() {
            return Err(AppError::invalid_input("search query cannot be empty"));
        }
        if page_size == 0 || page_size > 200 {
            return Err(AppError::invalid_input(
                "page size must be between 1 and 200",
            ));
        }

        let cache_key = format!("{query}:{page_size}");
        if let Some(results) = self.search_cache.get(&cache_key).await {
            return Ok(results);
        }

        self.throttle().await;

        let url = format!("{}/foods/search", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .query(&[
                ("query", query),
                ("pageSize", &page_size.to_string()),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await
            .map_err(|e| AppError::lookup("USDA API", "search request failed").with_source(e))?;

        if !response.status().is_success() {
            return Err(AppError::lookup(
                "USDA API",
                format!(
                    "search returned HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::lookup("USDA API", "malformed search response").with_source(e))?;

        let results: Vec<FoodSearchResult> = search_response
            .foods
            .into_iter()
            .map(|f| FoodSearchResult {
                fdc_id: f.fdc_id,
                description: f.description,
                data_type: f.data_type,
                brand_owner: f.brand_owner,
            })
            .collect();

        self.search_cache.insert(cache_key, results.clone()).await;
        Ok(results)
    }

    /// Fetch the full composition record for one FDC ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero ID, `NotFound` when the provider
    /// has no such record, `LookupError` on any other failure.
    pub async fn get_food(&self, fdc_id: u64) -> AppResult<FoodRecord> {
        if fdc_id == 0 {
            return Err(AppError::invalid_input(format!("invalid FDC ID: {fdc_id}")));
        }

        if let Some(record) = self.details_cache.get(&fdc_id).await {
            tracing::debug!(fdc_id, "USDA cache hit");
            return Ok(record);
        }

        self.throttle().await;

        let url = format!("{}/food/{fdc_id}", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .query(&[("api_key", &self.config.api_key)])
            .send()
            .await
            .map_err(|e| AppError::lookup("USDA API", "food request failed").with_source(e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Food with FDC ID {fdc_id}")));
        }
        if !response.status().is_success() {
            return Err(AppError::lookup(
                "USDA API",
                format!(
                    "food lookup returned HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let details: FoodDetailsResponse = response
            .json()
            .await
            .map_err(|e| AppError::lookup("USDA API", "malformed food response").with_source(e))?;
        let record = FoodRecord::from(details);

        self.details_cache.insert(fdc_id, record.clone()).await;
        Ok(record)
    }

    /// Clear both response caches (useful for testing)
    pub async fn clear_caches(&self) {
        self.details_cache.clear().await;
        self.search_cache.clear().await;
    }

    /// Cache statistics as (search entries, detail entries)
    pub async fn cache_stats(&self) -> (usize, usize) {
        (self.search_cache.len().await, self.details_cache.len().await)
    }

    async fn throttle(&self) {
        let mut limiter = self.rate_limiter.lock().await;
        limiter.wait_if_needed().await;
        limiter.record_request();
    }
}

#[async_trait]
impl NutrientLookup for UsdaClient {
    async fn lookup(&self, fdc_id: u64) -> AppResult<FoodRecord> {
        self.get_food(fdc_id).await
    }
}

// ── Mock client ─────────────────────────────────────────────────────────

/// Mock USDA client for testing (no API calls)
pub struct MockUsdaClient {
    mock_foods: HashMap<u64, FoodRecord>,
}

impl MockUsdaClient {
    /// FDC ID of the mock chicken breast record
    pub const CHICKEN_BREAST: u64 = 171_477;
    /// FDC ID of the mock raw apple record
    pub const APPLE: u64 = 171_688;

    /// Create a new mock client with predefined test data
    #[must_use]
    pub fn new() -> Self {
        let mut mock_foods = HashMap::new();

        mock_foods.insert(
            Self::CHICKEN_BREAST,
            FoodRecord {
                fdc_id: Self::CHICKEN_BREAST,
                description: "Chicken, breast, meat only, cooked, roasted".to_owned(),
                nutrients: vec![
                    nutrient("Protein", Some(31.02), "g"),
                    nutrient("Total lipid (fat)", Some(3.57), "g"),
                    nutrient("Carbohydrate, by difference", Some(0.0), "g"),
                    nutrient("Energy (kcal)", Some(165.0), "kcal"),
                ],
                portions: vec![PortionDefinition {
                    label: Some("1/2 breast".to_owned()),
                    gram_weight: Some(86.0),
                }],
            },
        );

        mock_foods.insert(
            Self::APPLE,
            FoodRecord {
                fdc_id: Self::APPLE,
                description: "Apples, raw, with skin".to_owned(),
                nutrients: vec![
                    nutrient("Protein", Some(0.26), "g"),
                    nutrient("Total lipid (fat)", Some(0.17), "g"),
                    nutrient("Carbohydrate, by difference", Some(13.81), "g"),
                    nutrient("Energy (kcal)", Some(52.0), "kcal"),
                ],
                portions: vec![
                    PortionDefinition {
                        label: Some("1 slice".to_owned()),
                        gram_weight: Some(4.0),
                    },
                    PortionDefinition {
                        label: Some("1 medium".to_owned()),
                        gram_weight: Some(182.0),
                    },
                ],
            },
        );

        Self { mock_foods }
    }

    /// Register or replace a mock record
    pub fn insert(&mut self, record: FoodRecord) {
        self.mock_foods.insert(record.fdc_id, record);
    }

    /// Mock search over the fixture descriptions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the query is empty.
    pub fn search_foods(&self, query: &str) -> AppResult<Vec<FoodSearchResult>> {
        if query.is_empty() {
            return Err(AppError::invalid_input("search query cannot be empty"));
        }
        let query_lower = query.to_lowercase();
        let mut results: Vec<FoodSearchResult> = self
            .mock_foods
            .values()
            .filter(|food| food.description.to_lowercase().contains(&query_lower))
            .map(|food| FoodSearchResult {
                fdc_id: food.fdc_id,
                description: food.description.clone(),
                data_type: Some("SR Legacy".to_owned()),
                brand_owner: None,
            })
            .collect();
        results.sort_by_key(|r| r.fdc_id);
        Ok(results)
    }
}

impl Default for MockUsdaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NutrientLookup for MockUsdaClient {
    async fn lookup(&self, fdc_id: u64) -> AppResult<FoodRecord> {
        if fdc_id == 0 {
            return Err(AppError::invalid_input(format!("invalid FDC ID: {fdc_id}")));
        }
        self.mock_foods
            .get(&fdc_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Food with FDC ID {fdc_id}")))
    }
}

fn nutrient(name: &str, amount: Option<f64>, unit: &str) -> NutrientEntry {
    NutrientEntry {
        name: name.to_owned(),
        amount,
        unit: Some(unit.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_details_response_conversion_handles_both_nutrient_shapes() {
        let json = serde_json::json!({
            "fdcId": 1105314,
            "description": "Oat milk",
            "foodNutrients": [
                {"nutrientName": "Energy", "unitName": "KCAL", "amount": 47.0},
                {"nutrient": {"name": "Protein", "unitName": "G"}, "amount": 1.0},
                {"nutrient": {"name": "Fiber"}}
            ],
            "foodPortions": [
                {"portionDescription": "1 cup", "gramWeight": 240.0},
                {"modifier": "fl oz", "gramWeight": 30.0}
            ]
        });
        let details: FoodDetailsResponse = serde_json::from_value(json).unwrap();
        let record = FoodRecord::from(details);

        assert_eq!(record.fdc_id, 1_105_314);
        assert_eq!(record.nutrients.len(), 3);
        assert_eq!(record.nutrients[0].name, "Energy");
        assert_eq!(record.nutrients[1].name, "Protein");
        assert_eq!(record.nutrients[2].amount, None);
        assert_eq!(record.portions[0].label.as_deref(), Some("1 cup"));
        assert_eq!(record.portions[1].label.as_deref(), Some("fl oz"));
    }

    #[tokio::test]
    async fn test_mock_lookup_known_food() {
        let client = MockUsdaClient::new();
        let record = client.lookup(MockUsdaClient::APPLE).await.unwrap();
        assert_eq!(record.description, "Apples, raw, with skin");
        assert_eq!(record.nutrients.len(), 4);
    }

    #[tokio::test]
    async fn test_mock_lookup_unknown_food_is_not_found() {
        let client = MockUsdaClient::new();
        let err = client.lookup(999).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_mock_search_filters_by_description() {
        let client = MockUsdaClient::new();
        let results = client.search_foods("apple").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].fdc_id, MockUsdaClient::APPLE);
        assert!(client.search_foods("").is_err());
    }

    #[test]
    fn test_config_from_env_requires_key() {
        // run with the variable unset in the test environment
        if env::var(USDA_API_KEY_VAR).is_err() {
            let err = UsdaClientConfig::from_env().unwrap_err();
            assert_eq!(err.code, ErrorCode::ConfigError);
        }
    }

    #[test]
    fn test_rate_limiter_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.can_request());
        limiter.record_request();
        limiter.record_request();
        assert!(!limiter.can_request());
    }
}
