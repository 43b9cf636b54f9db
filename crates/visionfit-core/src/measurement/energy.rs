// ABOUTME: BMR (Mifflin-St Jeor), TDEE, goal scaling, and the kcal/kJ conversion boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basal Metabolic Rate, Total Daily Energy Expenditure, and goal-based
//! calorie scaling.
//!
//! # Scientific Reference
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting
//! energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//! 241-247.

use crate::constants::energy::{activity_multiplier, goal_scale, KCAL_TO_KJ};
use crate::models::{ActivityLevel, Goal, Sex};

/// Basal Metabolic Rate in kcal/day via Mifflin-St Jeor (§4.1).
///
/// `male: 10*w + 6.25*h - 5*age + 5`; `female: 10*w + 6.25*h - 5*age - 161`.
/// Non-binary averages the two.
#[must_use]
pub fn bmr_kcal(sex: Sex, weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
        Sex::NonBinary => ((base + 5.0) + (base - 161.0)) / 2.0,
    }
}

/// Total Daily Energy Expenditure in kcal/day: BMR scaled by activity
/// multiplier (§4.1).
#[must_use]
pub fn tdee_kcal(bmr: f64, activity_level: ActivityLevel) -> f64 {
    let multiplier = match activity_level {
        ActivityLevel::Sedentary => activity_multiplier::SEDENTARY,
        ActivityLevel::Light => activity_multiplier::LIGHT,
        ActivityLevel::Moderate => activity_multiplier::MODERATE,
        ActivityLevel::High => activity_multiplier::HIGH,
    };
    bmr * multiplier
}

/// Target daily energy in kcal/day: TDEE scaled by the primary goal
/// (§4.1).
#[must_use]
pub fn goal_scaled_energy_kcal(tdee: f64, goal: Goal) -> f64 {
    let scale = match goal {
        Goal::FatLoss => goal_scale::FAT_LOSS,
        Goal::MuscleGain => goal_scale::MUSCLE_GAIN,
        Goal::Recomp => goal_scale::RECOMP,
        Goal::Maintenance => goal_scale::MAINTENANCE,
    };
    tdee * scale
}

/// Convert kilocalories to kilojoules. This is the single unit-conversion
/// boundary in the system: every external surface reports kJ (§6), every
/// internal formula above this module operates in kcal.
#[must_use]
pub fn kcal_to_kj(kcal: f64) -> f64 {
    kcal * KCAL_TO_KJ
}

/// Convert kilojoules to kilocalories, the inverse of [`kcal_to_kj`].
#[must_use]
pub fn kj_to_kcal(kj: f64) -> f64 {
    kj / KCAL_TO_KJ
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn male_moderate_muscle_gain_scenario_1() {
        // §8 scenario 1: male, 28y, 180cm, 78kg, moderate, muscle-gain.
        let bmr = bmr_kcal(Sex::Male, 78.0, 180.0, 28.0);
        assert!((bmr - 1773.0).abs() < 1.0, "bmr = {bmr}");

        let tdee = tdee_kcal(bmr, ActivityLevel::Moderate);
        assert!((tdee - 2748.0).abs() < 2.0, "tdee = {tdee}");

        let target = goal_scaled_energy_kcal(tdee, Goal::MuscleGain);
        assert!((target - 3023.0).abs() < 3.0, "target = {target}");

        let target_kj = kcal_to_kj(target);
        assert!((target_kj - 12648.0).abs() < 15.0, "target_kj = {target_kj}");
    }

    #[test]
    fn non_binary_bmr_averages_male_and_female() {
        let male = bmr_kcal(Sex::Male, 70.0, 175.0, 30.0);
        let female = bmr_kcal(Sex::Female, 70.0, 175.0, 30.0);
        let nb = bmr_kcal(Sex::NonBinary, 70.0, 175.0, 30.0);
        assert!((nb - (male + female) / 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn kcal_kj_round_trip() {
        let kcal = 2500.0;
        assert!((kj_to_kcal(kcal_to_kj(kcal)) - kcal).abs() < 1e-9);
    }
}
