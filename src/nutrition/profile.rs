// ABOUTME: Derives energy and macro targets from body metrics using Mifflin-St Jeor
// ABOUTME: BMI, BMR, activity multiplier, goal adjustment, and the configured macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Target Profile Calculator
//!
//! Pure functions of body metrics and lifestyle selections. Parsing of the
//! free-text gender/activity/goal fields is lenient: unknown values take the
//! documented defaults instead of failing, so a profile can always be
//! derived.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010).
//!   Exercise Physiology.

use crate::config::{ActivityFactorsConfig, BmrConfig, GoalAdjustmentsConfig, ProfileConfig};
use crate::models::{MacroTargets, TargetInputs, TargetProfile};
use serde::{Deserialize, Serialize};

/// Default age assumed when the input omits one
pub const DEFAULT_AGE: u32 = 30;

/// Gender for the BMR constant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    /// Male constant (+5)
    Male,
    /// Female constant (-161)
    Female,
}

impl Gender {
    /// Lenient parse: only a case-insensitive "male" selects [`Gender::Male`];
    /// everything else, including absence, selects [`Gender::Female`]'s
    /// constant — matching the reference formula's else-branch.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("male") => Self::Male,
            Some(_) => Self::Female,
            None => Self::Male, // documented default gender is "male"
        }
    }
}

/// Activity level for the calorie multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivityLevel {
    /// Little/no exercise (1.2)
    Sedentary,
    /// 1-3 days/week (1.375)
    Light,
    /// 3-5 days/week (1.55)
    Moderate,
    /// 6-7 days/week (1.725)
    Active,
}

impl ActivityLevel {
    /// Lenient, case-insensitive parse; unknown or empty input falls back to
    /// [`ActivityLevel::Sedentary`] (multiplier 1.2).
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("light") => Self::Light,
            Some("moderate") => Self::Moderate,
            Some("active") => Self::Active,
            _ => Self::Sedentary,
        }
    }

    /// Multiplier applied to BMR for this level
    #[must_use]
    pub const fn multiplier(self, config: &ActivityFactorsConfig) -> f64 {
        match self {
            Self::Sedentary => config.sedentary,
            Self::Light => config.light,
            Self::Moderate => config.moderate,
            Self::Active => config.active,
        }
    }
}

/// Goal selection adjusting the calorie target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Goal {
    /// Caloric deficit (-500 kcal)
    Lose,
    /// Caloric balance (no adjustment)
    Maintain,
    /// Caloric surplus (+300 kcal)
    Gain,
}

impl Goal {
    /// Lenient, case-insensitive parse; unknown or empty input falls back to
    /// [`Goal::Maintain`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("lose") => Self::Lose,
            Some("gain") => Self::Gain,
            _ => Self::Maintain,
        }
    }

    /// Calorie delta applied after the activity multiplier
    #[must_use]
    pub const fn calorie_delta(self, config: &GoalAdjustmentsConfig) -> f64 {
        match self {
            Self::Lose => config.lose_kcal,
            Self::Maintain => 0.0,
            Self::Gain => config.gain_kcal,
        }
    }
}

/// Round to 1 decimal place, the profile presentation precision
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body mass index; 0.0 when the height is unusable
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Basal metabolic rate via Mifflin-St Jeor
///
/// Formula: `10 x weight_kg + 6.25 x height_cm - 5 x age + constant`,
/// +5 for male and -161 otherwise, with coefficients from [`BmrConfig`].
#[must_use]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> f64 {
    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };
    config.msj_weight_coef * weight_kg
        + config.msj_height_coef * height_cm
        + config.msj_age_coef * f64::from(age)
        + gender_constant
}

/// Derive the complete target profile from body metrics.
///
/// Absent optional inputs take the documented defaults (age 30, male,
/// sedentary, maintain). All outputs are rounded to 1 decimal.
#[must_use]
pub fn calculate_target_profile(inputs: &TargetInputs, config: &ProfileConfig) -> TargetProfile {
    let age = inputs.age.unwrap_or(DEFAULT_AGE);
    let gender = Gender::parse(inputs.gender.as_deref());
    let activity = ActivityLevel::parse(inputs.activity_level.as_deref());
    let goal = Goal::parse(inputs.goal.as_deref());

    let bmi = calculate_bmi(inputs.weight_kg, inputs.height_cm);
    let bmr = calculate_bmr(inputs.weight_kg, inputs.height_cm, age, gender, &config.bmr);
    let calories =
        bmr * activity.multiplier(&config.activity_factors) + goal.calorie_delta(&config.goal_adjustments);

    let split = &config.macro_split;
    let nutrition = MacroTargets {
        calories: round1(calories),
        protein_g: round1(calories * split.protein_pct / 100.0 / split.protein_kcal_per_g),
        fat_g: round1(calories * split.fat_pct / 100.0 / split.fat_kcal_per_g),
        carbs_g: round1(calories * split.carbs_pct / 100.0 / split.carbs_kcal_per_g),
    };

    TargetProfile {
        bmi: round1(bmi),
        bmr: round1(bmr),
        nutrition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_typical() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.857).abs() < 0.01);
    }

    #[test]
    fn test_bmi_zero_height_is_zero() {
        assert!((calculate_bmi(70.0, 0.0)).abs() < f64::EPSILON);
        assert!((calculate_bmi(70.0, -10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmr_male_reference_case() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 700 + 1093.75 - 150 + 5 = 1648.75
        let bmr = calculate_bmr(70.0, 175.0, 30, Gender::Male, &BmrConfig::default());
        assert!((bmr - 1648.75).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_constant() {
        let male = calculate_bmr(60.0, 165.0, 25, Gender::Male, &BmrConfig::default());
        let female = calculate_bmr(60.0, 165.0, 25, Gender::Female, &BmrConfig::default());
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_gender_parse_is_lenient() {
        assert_eq!(Gender::parse(Some("MALE")), Gender::Male);
        assert_eq!(Gender::parse(Some(" male ")), Gender::Male);
        assert_eq!(Gender::parse(Some("female")), Gender::Female);
        assert_eq!(Gender::parse(Some("nonbinary")), Gender::Female);
        assert_eq!(Gender::parse(None), Gender::Male);
    }

    #[test]
    fn test_activity_parse_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::parse(Some("Moderate")), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::parse(Some("couch")), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::parse(Some("")), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::parse(None), ActivityLevel::Sedentary);
    }

    #[test]
    fn test_goal_parse_defaults_to_maintain() {
        assert_eq!(Goal::parse(Some("LOSE")), Goal::Lose);
        assert_eq!(Goal::parse(Some("gain")), Goal::Gain);
        assert_eq!(Goal::parse(Some("bulk")), Goal::Maintain);
        assert_eq!(Goal::parse(None), Goal::Maintain);
    }

    #[test]
    fn test_goal_adjustments() {
        let config = ProfileConfig::default();
        let base = TargetInputs {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: Some(30),
            gender: Some("male".to_owned()),
            activity_level: Some("sedentary".to_owned()),
            goal: None,
        };
        let maintain = calculate_target_profile(&base, &config);

        let lose = calculate_target_profile(
            &TargetInputs {
                goal: Some("lose".to_owned()),
                ..base.clone()
            },
            &config,
        );
        let gain = calculate_target_profile(
            &TargetInputs {
                goal: Some("gain".to_owned()),
                ..base
            },
            &config,
        );

        assert!((maintain.nutrition.calories - lose.nutrition.calories - 500.0).abs() < 0.2);
        assert!((gain.nutrition.calories - maintain.nutrition.calories - 300.0).abs() < 0.2);
    }
}
