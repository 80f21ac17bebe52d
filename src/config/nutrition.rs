// ABOUTME: Configuration for nutrient normalization and target profile calculation
// ABOUTME: BMR coefficients, activity factors, goal adjustments, and the macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! Nutrition Calculation Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010).
//!   Exercise Physiology.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Nutrient normalizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// A portion definition qualifies as the reference portion only when its
    /// gram weight exceeds this threshold (5.0)
    pub min_portion_grams: f64,
    /// Reference portion mass assumed when no portion definition qualifies (100.0)
    pub default_reference_grams: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_portion_grams: 5.0,
            default_reference_grams: 100.0,
        }
    }
}

impl NormalizerConfig {
    /// Validate normalizer bounds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the default reference portion is not positive.
    pub fn validate(&self) -> AppResult<()> {
        if self.default_reference_grams <= 0.0 {
            return Err(AppError::config(
                "default_reference_grams must be positive",
            ));
        }
        Ok(())
    }
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for the calorie target
///
/// Reference: `McArdle` et al. (2010) - Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2 — also the unknown-level fallback
    pub sedentary: f64,
    /// Light activity (1-3 days/week): 1.375
    pub light: f64,
    /// Moderate activity (3-5 days/week): 1.55
    pub moderate: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
        }
    }
}

/// Calorie deltas applied to the activity-adjusted target per goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentsConfig {
    /// Delta for a weight-loss goal (-500 kcal)
    pub lose_kcal: f64,
    /// Delta for a weight-gain goal (+300 kcal)
    pub gain_kcal: f64,
}

impl Default for GoalAdjustmentsConfig {
    fn default() -> Self {
        Self {
            lose_kcal: -500.0,
            gain_kcal: 300.0,
        }
    }
}

/// Macro split applied to the daily calorie target
///
/// Percentages must sum to 100. Energy densities convert the calorie share
/// of each macro into grams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Protein share of calories (25.0)
    pub protein_pct: f64,
    /// Fat share of calories (25.0)
    pub fat_pct: f64,
    /// Carbohydrate share of calories (50.0)
    pub carbs_pct: f64,
    /// Protein energy density (4 kcal/g)
    pub protein_kcal_per_g: f64,
    /// Fat energy density (9 kcal/g)
    pub fat_kcal_per_g: f64,
    /// Carbohydrate energy density (4 kcal/g)
    pub carbs_kcal_per_g: f64,
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            protein_pct: 25.0,
            fat_pct: 25.0,
            carbs_pct: 50.0,
            protein_kcal_per_g: 4.0,
            fat_kcal_per_g: 9.0,
            carbs_kcal_per_g: 4.0,
        }
    }
}

impl MacroSplitConfig {
    /// Validate that the macro percentages sum to 100
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the shares do not sum to 100 or any energy
    /// density is not positive.
    pub fn validate(&self) -> AppResult<()> {
        let sum = self.protein_pct + self.fat_pct + self.carbs_pct;
        if (sum - 100.0).abs() > 1e-9 {
            return Err(AppError::config(format!(
                "macro split must sum to 100, got {sum}"
            )));
        }
        for (name, density) in [
            ("protein_kcal_per_g", self.protein_kcal_per_g),
            ("fat_kcal_per_g", self.fat_kcal_per_g),
            ("carbs_kcal_per_g", self.carbs_kcal_per_g),
        ] {
            if density <= 0.0 {
                return Err(AppError::config(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

/// Target profile calculation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// Activity multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Goal calorie deltas
    pub goal_adjustments: GoalAdjustmentsConfig,
    /// Macro split of the calorie target
    pub macro_split: MacroSplitConfig,
}

impl ProfileConfig {
    /// Validate the profile configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the macro split is invalid.
    pub fn validate(&self) -> AppResult<()> {
        self.macro_split.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_macro_split_sums_to_100() {
        assert!(MacroSplitConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unbalanced_macro_split_rejected() {
        let split = MacroSplitConfig {
            protein_pct: 40.0,
            ..MacroSplitConfig::default()
        };
        let err = split.validate().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigError);
    }

    #[test]
    fn test_non_positive_reference_grams_rejected() {
        let config = NormalizerConfig {
            default_reference_grams: 0.0,
            ..NormalizerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
