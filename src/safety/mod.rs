// ABOUTME: Safety validator — advisory exercise blocking pre-synthesis, six-check post-hoc audit
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The safety validator runs in two distinct modes (§4.7), grounded on the
//! teacher's insight-validation pass (`src/intelligence/insight_validation.rs`)
//! which likewise runs named checks after generation and repairs or flags
//! what it finds rather than trusting the generator blindly.
//!
//! - **Advisory mode** ([`blocked_exercises`]) runs before exercise
//!   selection: injury keywords plus equipment limits narrow the catalog.
//! - **Audit mode** ([`audit`]) runs after a [`Plan`] is assembled: six
//!   named checks, each either passing outright, repairing the plan in
//!   place, or leaving an unresolved warning. A catastrophic progression
//!   jump is the one failure this mode cannot repair — it raises a hard
//!   [`ErrorKind::SafetyViolation`] instead (§4.7: "no plan is emitted").

use std::collections::BTreeMap;

use tracing::warn;
use visionfit_core::catalog;
use visionfit_core::constants::safety as limits;
use visionfit_core::errors::{AppError, ErrorKind};
use visionfit_core::measurement::{macro_split, tdee_kcal};
use visionfit_core::models::plan::SafetyCheckResult;
use visionfit_core::models::{Experience, Plan, Sex};

/// The stateless safety validator (§4.7). Holds no data of its own, same
/// discipline as [`crate::plan::PlanSynthesizer`].
pub struct SafetyValidator;

impl SafetyValidator {
    /// Advisory pre-check (§4.6 step 1, §4.7 "advisory mode"): the union of
    /// injury-keyword exclusions and any equipment the catalog cannot
    /// substitute around, before exercise selection runs.
    #[must_use]
    pub fn blocked_exercises(injuries: &[String]) -> Vec<String> {
        catalog::blocked_exercises_for_injury(injuries)
    }

    /// Run all six named post-hoc checks against an assembled plan,
    /// repairing in place where possible (§4.7). Returns the updated
    /// safety-check map to attach to the plan, or a hard [`AppError`] if the
    /// catastrophic progression check fails.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SafetyViolation`] if any week-over-week volume
    /// increase exceeds [`limits::CATASTROPHIC_PROGRESSION_FRACTION`] — this
    /// check cannot be repaired in place because it would require silently
    /// rewriting the mesocycle the user already reviewed.
    pub fn audit(
        plan: &mut Plan,
        sex: Sex,
        tdee_kcal_value: f64,
        weight_kg: f64,
        experience: Experience,
    ) -> Result<BTreeMap<String, SafetyCheckResult>, AppError> {
        let mut results = BTreeMap::new();

        results.insert("minimum_calories_met".to_string(), check_minimum_calories(plan, sex));
        results.insert(
            "deficit_within_limits".to_string(),
            check_deficit_within_limits(plan, tdee_kcal_value),
        );
        results.insert("protein_adequate".to_string(), check_protein_adequate(plan, weight_kg));
        results.insert(
            "training_frequency_safe".to_string(),
            check_training_frequency(plan, experience),
        );
        results.insert("injury_exclusions_honored".to_string(), check_injury_exclusions(plan));

        check_progression_safe(plan, experience)?;
        results.insert("progression_safe".to_string(), SafetyCheckResult::Passed);

        Ok(results)
    }

    /// Reconstruct TDEE in kcal from a profile/wizard pair, for the audit's
    /// deficit check — kept here rather than in
    /// [`visionfit_core::measurement`] since it is a convenience
    /// composition, not a primitive.
    #[must_use]
    pub fn reconstruct_tdee_kcal(
        sex: Sex,
        weight_kg: f64,
        height_cm: f64,
        age_years: f64,
        activity_level: visionfit_core::models::ActivityLevel,
    ) -> f64 {
        let bmr = visionfit_core::measurement::bmr_kcal(sex, weight_kg, height_cm, age_years);
        tdee_kcal(bmr, activity_level)
    }
}

/// §4.7 check 1: every week's `kj_per_day` must be at or above the
/// sex-specific calorie floor. Repairs in place by raising the target to
/// the floor and recomputing macros at the existing body-fat estimate.
fn check_minimum_calories(plan: &mut Plan, sex: Sex) -> SafetyCheckResult {
    let floor_kcal = match sex {
        Sex::Male => limits::MIN_CALORIES_MALE_KCAL,
        Sex::Female | Sex::NonBinary => limits::MIN_CALORIES_FEMALE_KCAL,
    };
    let floor_kj = visionfit_core::measurement::kcal_to_kj(floor_kcal);

    let mut repaired = false;
    for week in &mut plan.nutrition {
        #[allow(clippy::cast_precision_loss)]
        let kj = week.kj_per_day as f64;
        if kj < floor_kj {
            #[allow(clippy::cast_possible_truncation)]
            {
                week.kj_per_day = floor_kj.round() as i64;
            }
            let macros = macro_split(floor_kcal, plan.vision_snapshot.bf_estimate);
            week.protein_g = round_1dp(macros.protein_g);
            week.carbs_g = round_1dp(macros.carbs_g);
            week.fat_g = round_1dp(macros.fat_g);
            repaired = true;
        }
    }

    if repaired {
        warn!("safety audit: raised one or more weeks to the minimum-calorie floor");
        SafetyCheckResult::RepairedInPlace
    } else {
        SafetyCheckResult::Passed
    }
}

/// §4.7 check 2: the deficit implied by any week's energy target must not
/// exceed [`limits::MAX_CALORIE_DEFICIT_FRACTION`] of TDEE. Repairs in
/// place by clamping the target to the maximum allowed deficit.
fn check_deficit_within_limits(plan: &mut Plan, tdee_kcal_value: f64) -> SafetyCheckResult {
    let floor_kcal = tdee_kcal_value * (1.0 - limits::MAX_CALORIE_DEFICIT_FRACTION);
    let floor_kj = visionfit_core::measurement::kcal_to_kj(floor_kcal);

    let mut repaired = false;
    for week in &mut plan.nutrition {
        #[allow(clippy::cast_precision_loss)]
        let kj = week.kj_per_day as f64;
        if kj < floor_kj {
            #[allow(clippy::cast_possible_truncation)]
            {
                week.kj_per_day = floor_kj.round() as i64;
            }
            let macros = macro_split(floor_kcal, plan.vision_snapshot.bf_estimate);
            week.protein_g = round_1dp(macros.protein_g);
            week.carbs_g = round_1dp(macros.carbs_g);
            week.fat_g = round_1dp(macros.fat_g);
            repaired = true;
        }
    }

    if repaired {
        warn!("safety audit: clamped one or more weeks to the maximum allowed deficit");
        SafetyCheckResult::RepairedInPlace
    } else {
        SafetyCheckResult::Passed
    }
}

/// §4.7 check 3: every week's protein target must meet
/// [`limits::MIN_PROTEIN_PER_KG`] times body weight. Repairs in place by
/// raising protein (and backfilling the calorie difference from carbs).
fn check_protein_adequate(plan: &mut Plan, weight_kg: f64) -> SafetyCheckResult {
    let floor_protein_g = limits::MIN_PROTEIN_PER_KG * weight_kg;

    let mut repaired = false;
    for week in &mut plan.nutrition {
        if week.protein_g < floor_protein_g {
            let protein_shortfall_g = floor_protein_g - week.protein_g;
            week.protein_g = round_1dp(floor_protein_g);
            week.carbs_g = round_1dp((week.carbs_g - protein_shortfall_g).max(0.0));
            repaired = true;
        }
    }

    if repaired {
        warn!("safety audit: raised one or more weeks to the minimum protein floor");
        SafetyCheckResult::RepairedInPlace
    } else {
        SafetyCheckResult::Passed
    }
}

/// §4.7 check 4: total scheduled days per week must not exceed the
/// experience-tier ceiling. This cannot be repaired without discarding a
/// whole day's exercises, so a violation is surfaced as a warning rather
/// than silently dropped.
fn check_training_frequency(plan: &Plan, experience: Experience) -> SafetyCheckResult {
    let ceiling = match experience {
        Experience::Beginner => limits::max_weekly_sessions::BEGINNER,
        Experience::Intermediate => limits::max_weekly_sessions::INTERMEDIATE,
        Experience::Advanced => limits::max_weekly_sessions::ADVANCED,
    };

    let over_ceiling = plan
        .mesocycles
        .iter()
        .any(|week| u8::try_from(week.days.len()).unwrap_or(u8::MAX) > ceiling);

    if over_ceiling {
        warn!("safety audit: a mesocycle week exceeds the safe weekly session ceiling");
        SafetyCheckResult::Warning
    } else {
        SafetyCheckResult::Passed
    }
}

/// §4.7 check 5: no exercise name in the plan's days should match the
/// injury-exclusion set derived from `wizard_snapshot.injuries`. This is a
/// sanity re-check, not exercise selection's first line of defense — a
/// mismatch here means selection let something through, which the audit
/// can only flag.
fn check_injury_exclusions(plan: &Plan) -> SafetyCheckResult {
    let blocked = SafetyValidator::blocked_exercises(&plan.wizard_snapshot.injuries);
    if blocked.is_empty() {
        return SafetyCheckResult::Passed;
    }

    let violated = plan
        .mesocycles
        .iter()
        .flat_map(|week| &week.days)
        .flat_map(|day| &day.exercises)
        .any(|exercise| blocked.contains(&exercise.name));

    if violated {
        warn!("safety audit: a blocked exercise survived selection");
        SafetyCheckResult::Warning
    } else {
        SafetyCheckResult::Passed
    }
}

/// §4.7 check 6: week-over-week volume increase must not exceed the
/// experience-tier ceiling, and must never exceed the catastrophic
/// threshold regardless of experience.
///
/// # Errors
///
/// Returns [`ErrorKind::SafetyViolation`] on a catastrophic jump.
fn check_progression_safe(plan: &Plan, experience: Experience) -> Result<(), AppError> {
    let ceiling = match experience {
        Experience::Beginner => limits::max_progression_fraction::BEGINNER,
        Experience::Intermediate => limits::max_progression_fraction::INTERMEDIATE,
        Experience::Advanced => limits::max_progression_fraction::ADVANCED,
    };

    let mut sorted = plan.mesocycles.clone();
    sorted.sort_by_key(|week| week.week);

    for pair in sorted.windows(2) {
        let increase = (pair[1].volume_multiplier - pair[0].volume_multiplier) / pair[0].volume_multiplier;
        if increase > limits::CATASTROPHIC_PROGRESSION_FRACTION {
            return Err(AppError::with_message(
                ErrorKind::SafetyViolation,
                format!(
                    "week {} volume jumped {:.0}% over week {}, exceeding the catastrophic progression limit",
                    pair[1].week,
                    increase * 100.0,
                    pair[0].week
                ),
            ));
        }
        if increase > ceiling {
            warn!(week = pair[1].week, increase, "safety audit: progression exceeds the experience-tier ceiling");
        }
    }

    Ok(())
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn blocked_exercises_follows_injury_keywords() {
        let blocked = SafetyValidator::blocked_exercises(&["left knee pain".to_string()]);
        assert!(!blocked.is_empty());
    }

    #[test]
    fn no_injuries_blocks_nothing() {
        assert!(SafetyValidator::blocked_exercises(&[]).is_empty());
    }
}
