// ABOUTME: Nutrition target derivation — BMR/TDEE/goal energy through the vision-aware macro split (§4.6 step 7)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::measurement::{bmr_kcal, goal_scaled_energy_kcal, kcal_to_kj, macro_split, tdee_kcal};
use visionfit_core::models::plan::NutritionTargets;
use visionfit_core::models::{Confidence, StaticProfile, VisionRecord};

/// Grams of fiber per 1000 kcal of target energy, a fixed ratio rather than
/// a named constant table (this system tracks fiber as informational only,
/// unlike protein/carbs/fat which drive meal-idea composition).
const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Milliliters of water per kilogram of body weight per day.
const WATER_ML_PER_KG: f64 = 35.0;

/// Derive one week's [`NutritionTargets`] row (§4.6 step 7).
///
/// Runs the full measurement chain — BMR, TDEE, goal-scaled energy, the
/// kcal→kJ boundary crossing exactly once — then the vision-aware macro
/// split. When `vision.confidence` is [`Confidence::Low`], blends the
/// vision-driven split 50/50 with the default (18% body-fat) split, since a
/// low-confidence estimate should not fully drive the macro prescription
/// (§4.3 Stage 5, §9 Open Question: exact blending mechanism left to the
/// implementation — see `DESIGN.md`).
#[must_use]
pub fn weekly_targets(
    week: u32,
    profile: &StaticProfile,
    wizard_height_cm: f64,
    wizard_weight_kg: f64,
    vision: &VisionRecord,
) -> NutritionTargets {
    let age_years = f64::from(u32::try_from(profile.age_years().max(0)).unwrap_or(0));
    let bmr = bmr_kcal(profile.sex, wizard_weight_kg, wizard_height_cm, age_years);
    let tdee = tdee_kcal(bmr, profile.activity_level);
    let target_kcal = goal_scaled_energy_kcal(tdee, profile.primary_goal);

    let vision_driven = macro_split(target_kcal, vision.bf_estimate);
    let macros = if matches!(vision.confidence, Confidence::Low) {
        let default_driven = macro_split(target_kcal, 18.0);
        visionfit_core::measurement::MacroGrams {
            protein_g: (vision_driven.protein_g + default_driven.protein_g) / 2.0,
            carbs_g: (vision_driven.carbs_g + default_driven.carbs_g) / 2.0,
            fat_g: (vision_driven.fat_g + default_driven.fat_g) / 2.0,
        }
    } else {
        vision_driven
    };

    #[allow(clippy::cast_possible_truncation)]
    let kj_per_day = kcal_to_kj(target_kcal).round() as i64;

    NutritionTargets {
        week,
        kj_per_day,
        protein_g: round_1dp(macros.protein_g),
        carbs_g: round_1dp(macros.carbs_g),
        fat_g: round_1dp(macros.fat_g),
        fiber_g: round_1dp(target_kcal / 1000.0 * FIBER_G_PER_1000_KCAL),
        water_ml: round_1dp(wizard_weight_kg * WATER_ML_PER_KG),
    }
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use visionfit_core::models::{ActivityLevel, Anthro, Confidence, Experience, Goal, Sex, VISION_RECORD_SCHEMA_VERSION};

    fn profile() -> StaticProfile {
        StaticProfile {
            user_id: uuid::Uuid::nil(),
            full_name: "Test".to_string(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1996, 1, 1).unwrap(),
            sex: Sex::Male,
            primary_goal: Goal::MuscleGain,
            training_days_per_week: 4,
            activity_level: ActivityLevel::Moderate,
            experience: Experience::Intermediate,
            dietary_restrictions: vec![],
        }
    }

    fn vision(confidence: Confidence) -> VisionRecord {
        VisionRecord {
            quality: 0.9,
            bf_estimate: 18.0,
            anthro: Anthro {
                shoulder_cm: 45.0,
                hip_cm: 95.0,
                waist_cm: 85.0,
                chest_cm: 95.0,
                neck_cm: 38.0,
                thigh_cm: 55.0,
                arm_cm: 30.0,
            },
            pose_alerts: std::collections::BTreeSet::new(),
            confidence,
            analyzed_at: Utc::now(),
            schema_version: VISION_RECORD_SCHEMA_VERSION,
        }
    }

    #[test]
    fn low_confidence_blends_toward_the_default_split() {
        let p = profile();
        let high = weekly_targets(1, &p, 180.0, 80.0, &vision(Confidence::High));
        let low = weekly_targets(1, &p, 180.0, 80.0, &vision(Confidence::Low));
        assert!((high.kj_per_day - low.kj_per_day).abs() <= 1);
        assert!(high.protein_g != low.protein_g || (high.protein_g - low.protein_g).abs() < 0.01);
    }

    #[test]
    fn kj_is_the_only_energy_unit_on_the_row() {
        let targets = weekly_targets(1, &profile(), 180.0, 80.0, &vision(Confidence::High));
        assert!(targets.kj_per_day > 0);
    }
}
