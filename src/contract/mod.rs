// ABOUTME: Pure validator: produces a DataContract or the full accumulated list of violations
// ABOUTME: Also decides kid-safe routing for age < 13 — a distinct outcome, not an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shape, range, and vocabulary validation of the combined
//! profile/wizard/vision payload (§4.5), grounded on the teacher's
//! accumulate-all-errors idiom in `src/configuration/validation.rs`.
//!
//! Checks run in a fixed order and never short-circuit: every problem in
//! the payload is reported together, matching §4.5's "errors are
//! accumulated, not short-circuited."

mod vocabulary;

pub use vocabulary::{RECOGNIZED_EQUIPMENT_TOKENS, RECOGNIZED_INJURY_KEYWORDS};

use visionfit_core::constants::contract as limits;
use visionfit_core::errors::FieldViolation;
use visionfit_core::models::{StaticProfile, VisionRecord, WizardInputs};
use visionfit_core::models::DataContract;

/// Outcome of validating a submission: either a contract ready for adult
/// synthesis, or a routing decision to the kid-safe path (§4.5: "age ≥ 13;
/// if violated, the caller switches to a separate kid-safe synthesis
/// path").
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// All checks passed; ready for [`crate::plan::PlanSynthesizer::synthesize`].
    Adult(DataContract),
    /// Age < 13; route to [`crate::plan::PlanSynthesizer::synthesize_kid_safe`].
    KidSafe {
        /// The frozen profile snapshot (still carries the real age).
        profile: StaticProfile,
        /// The frozen wizard snapshot.
        wizard: WizardInputs,
        /// The frozen vision snapshot.
        vision: VisionRecord,
    },
}

/// Validate a submission, in the fixed order named by §4.5: presence is
/// enforced by the type system (all three parameters are required, not
/// `Option`), so this function starts at range checks, then age routing,
/// then vision quality, then the injury/equipment vocabulary check.
///
/// # Errors
///
/// Returns every [`FieldViolation`] found in one pass — never just the
/// first.
pub fn validate(
    profile: StaticProfile,
    wizard: WizardInputs,
    vision: VisionRecord,
) -> Result<ValidationOutcome, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    check_range(
        &mut violations,
        "profile.trainingDaysPerWeek",
        f64::from(profile.training_days_per_week),
        f64::from(limits::TRAINING_DAYS_RANGE.0),
        f64::from(limits::TRAINING_DAYS_RANGE.1),
    );
    check_range(
        &mut violations,
        "wizard.heightCm",
        wizard.height_cm,
        limits::HEIGHT_CM_RANGE.0,
        limits::HEIGHT_CM_RANGE.1,
    );
    check_range(
        &mut violations,
        "wizard.weightKg",
        wizard.weight_kg,
        limits::WEIGHT_KG_RANGE.0,
        limits::WEIGHT_KG_RANGE.1,
    );
    if let Some(bf) = wizard.smart_scale.body_fat_pct {
        check_range(
            &mut violations,
            "wizard.smartScale.bodyFatPct",
            bf,
            limits::BODY_FAT_PCT_RANGE.0,
            limits::BODY_FAT_PCT_RANGE.1,
        );
    }
    if let Some(muscle) = wizard.smart_scale.muscle_pct {
        check_range(
            &mut violations,
            "wizard.smartScale.musclePct",
            muscle,
            limits::MUSCLE_PCT_RANGE.0,
            limits::MUSCLE_PCT_RANGE.1,
        );
    }
    if let Some(visceral) = wizard.smart_scale.visceral_fat_score {
        check_range(
            &mut violations,
            "wizard.smartScale.visceralFatScore",
            visceral,
            limits::VISCERAL_FAT_SCORE_RANGE.0,
            limits::VISCERAL_FAT_SCORE_RANGE.1,
        );
    }
    if wizard.user_comment.chars().count() > limits::MAX_COMMENT_CHARS {
        violations.push(FieldViolation::new(
            "wizard.userComment",
            format!("must be at most {} characters", limits::MAX_COMMENT_CHARS),
        ));
    }

    if vision.quality < limits::MIN_VISION_QUALITY {
        violations.push(FieldViolation::new(
            "vision.quality",
            format!("must be >= {}", limits::MIN_VISION_QUALITY),
        ));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let age = profile.age_years();
    if age < i64::from(limits::MIN_ADULT_AGE_YEARS) {
        return Ok(ValidationOutcome::KidSafe { profile, wizard, vision });
    }

    let unrecognized_tokens = vocabulary::unrecognized_tokens(&wizard);

    Ok(ValidationOutcome::Adult(DataContract::from_validated_parts(
        profile,
        wizard,
        vision,
        unrecognized_tokens,
    )))
}

fn check_range(violations: &mut Vec<FieldViolation>, field: &str, value: f64, min: f64, max: f64) {
    if value < min || value > max {
        violations.push(FieldViolation::new(field, format!("must be in [{min}, {max}]")));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;
    use visionfit_core::models::{ActivityLevel, Confidence, Experience, Goal, Sex};
    use visionfit_core::models::vision_record::Anthro;

    fn valid_profile(age_years: i32) -> StaticProfile {
        use chrono::Datelike;
        let today = Utc::now().date_naive();
        let dob = NaiveDate::from_ymd_opt(today.year() - age_years, 6, 15).unwrap_or(today);
        StaticProfile {
            user_id: Uuid::nil(),
            full_name: "Test User".to_string(),
            date_of_birth: dob,
            sex: Sex::Male,
            primary_goal: Goal::MuscleGain,
            training_days_per_week: 4,
            activity_level: ActivityLevel::Moderate,
            experience: Experience::Intermediate,
            dietary_restrictions: vec![],
        }
    }

    fn valid_wizard() -> WizardInputs {
        WizardInputs {
            photo_reference: "photo-1".to_string(),
            height_cm: 180.0,
            weight_kg: 78.0,
            smart_scale: visionfit_core::models::SmartScaleReadings::default(),
            injuries: vec![],
            equipment_limits: vec![],
            user_comment: String::new(),
            reported_rir: None,
        }
    }

    fn valid_vision() -> VisionRecord {
        VisionRecord {
            quality: 0.82,
            bf_estimate: 15.0,
            anthro: Anthro {
                shoulder_cm: 45.0,
                hip_cm: 90.0,
                waist_cm: 80.0,
                chest_cm: 95.0,
                neck_cm: 38.0,
                thigh_cm: 55.0,
                arm_cm: 30.0,
            },
            pose_alerts: Default::default(),
            confidence: Confidence::High,
            analyzed_at: Utc::now(),
            schema_version: visionfit_core::models::vision_record::VISION_RECORD_SCHEMA_VERSION,
        }
    }

    #[test]
    fn age_13_is_adult_age_12_is_kid_safe() {
        let outcome_13 = validate(valid_profile(13), valid_wizard(), valid_vision()).unwrap();
        assert!(matches!(outcome_13, ValidationOutcome::Adult(_)));

        let outcome_12 = validate(valid_profile(12), valid_wizard(), valid_vision()).unwrap();
        assert!(matches!(outcome_12, ValidationOutcome::KidSafe { .. }));
    }

    #[test]
    fn quality_exactly_0_70_accepted_0_699_rejected() {
        let mut vision = valid_vision();
        vision.quality = 0.70;
        assert!(validate(valid_profile(28), valid_wizard(), vision).is_ok());

        let mut vision = valid_vision();
        vision.quality = 0.699;
        let err = validate(valid_profile(28), valid_wizard(), vision).unwrap_err();
        assert!(err.iter().any(|v| v.field == "vision.quality"));
    }

    #[test]
    fn accumulates_every_violation_in_one_pass() {
        let mut wizard = valid_wizard();
        wizard.height_cm = 10.0;
        wizard.weight_kg = 1000.0;
        let mut vision = valid_vision();
        vision.quality = 0.1;

        let err = validate(valid_profile(28), wizard, vision).unwrap_err();
        assert_eq!(err.len(), 3);
    }
}
