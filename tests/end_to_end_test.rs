// ABOUTME: End-to-end coverage of the §8 scenarios — validator through synthesizer through formatter
// ABOUTME: Vision records are constructed directly here; the pipeline's own stages are unit-tested in src/vision

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use visionfit_core::models::vision_record::Anthro;
use visionfit_core::models::{
    ActivityLevel, Confidence, DietaryRestriction, Experience, Goal, PoseAlert, Sex, SmartScaleReadings, StaticProfile,
    VisionRecord, WizardInputs, VISION_RECORD_SCHEMA_VERSION,
};
use visionfit_server::contract::{self, ValidationOutcome};
use visionfit_server::formatter::ResponseFormatter;
use visionfit_server::plan::PlanSynthesizer;

fn profile(age_years: i32, sex: Sex, goal: Goal, training_days: u32, activity: ActivityLevel) -> StaticProfile {
    use chrono::Datelike;
    let today = Utc::now().date_naive();
    let dob = NaiveDate::from_ymd_opt(today.year() - age_years, 6, 15).unwrap_or(today);
    StaticProfile {
        user_id: Uuid::new_v4(),
        full_name: "Scenario User".to_string(),
        date_of_birth: dob,
        sex,
        primary_goal: goal,
        training_days_per_week: training_days,
        activity_level: activity,
        experience: Experience::Intermediate,
        dietary_restrictions: Vec::new(),
    }
}

fn wizard(height_cm: f64, weight_kg: f64) -> WizardInputs {
    WizardInputs {
        photo_reference: "photo-ref".to_string(),
        height_cm,
        weight_kg,
        smart_scale: SmartScaleReadings::default(),
        injuries: Vec::new(),
        equipment_limits: Vec::new(),
        user_comment: String::new(),
        reported_rir: None,
    }
}

fn vision(quality: f64, bf_estimate: f64, hip_cm: f64, pose_alerts: BTreeSet<PoseAlert>) -> VisionRecord {
    VisionRecord {
        quality,
        bf_estimate,
        anthro: Anthro {
            shoulder_cm: 45.0,
            hip_cm,
            waist_cm: 80.0,
            chest_cm: 95.0,
            neck_cm: 38.0,
            thigh_cm: 55.0,
            arm_cm: 30.0,
        },
        pose_alerts,
        confidence: Confidence::High,
        analyzed_at: Utc::now(),
        schema_version: VISION_RECORD_SCHEMA_VERSION,
    }
}

/// §8 scenario 1: male, moderate activity, muscle-gain, clean posture.
#[test]
fn scenario_1_male_muscle_gain_clean_posture() {
    let profile = profile(28, Sex::Male, Goal::MuscleGain, 4, ActivityLevel::Moderate);
    let wizard = wizard(180.0, 78.0);
    let vision = vision(0.82, 15.0, 92.0, BTreeSet::new());

    let outcome = contract::validate(profile, wizard, vision).expect("should validate cleanly");
    let ValidationOutcome::Adult(data_contract) = outcome else {
        panic!("a 28-year-old must route to the adult path");
    };

    let plan = PlanSynthesizer::synthesize(&data_contract, None, Utc::now()).expect("synthesis should succeed");
    assert_eq!(plan.mesocycles.len(), 4);
    assert_eq!(plan.nutrition.len(), 4);

    let week_1 = &plan.nutrition[0];
    assert!((11000..14000).contains(&week_1.kj_per_day), "kj_per_day = {}", week_1.kj_per_day);
    assert!(week_1.protein_g >= 0.8 * 78.0);

    for week in &plan.mesocycles {
        for day in &week.days {
            assert!(!day.exercises.iter().any(|e| e.corrective), "clean posture should add no correctives");
        }
    }

    assert!(plan.rationale.iter().any(|b| b.to_lowercase().contains("muscle gain")));
}

/// §8 scenario 2: female, fat-loss, rounded shoulders, long-femur hip width.
#[test]
fn scenario_2_female_fat_loss_rounded_shoulders_and_hip_adaptation() {
    let profile = profile(34, Sex::Female, Goal::FatLoss, 3, ActivityLevel::Light);
    let wizard = wizard(165.0, 72.0);
    let alerts = BTreeSet::from([PoseAlert::RoundedShoulders]);
    let vision = vision(0.78, 29.0, 102.0, alerts);

    let outcome = contract::validate(profile, wizard, vision).expect("should validate cleanly");
    let ValidationOutcome::Adult(data_contract) = outcome else {
        panic!("a 34-year-old must route to the adult path");
    };

    let plan = PlanSynthesizer::synthesize(&data_contract, None, Utc::now()).expect("synthesis should succeed");

    // Every day carries a corrective exercise tied to the rounded-shoulders alert.
    for week in &plan.mesocycles {
        for day in &week.days {
            assert!(day.exercises.iter().any(|e| e.corrective
                && e.rationale_note.as_deref().is_some_and(|note| note.contains("RoundedShoulders"))));
        }
    }

    // hipCm = 102 > 95 so back squats must never appear.
    for week in &plan.mesocycles {
        for day in &week.days {
            assert!(!day.exercises.iter().any(|e| e.name == "Barbell Back Squat"));
        }
    }

    assert!(plan.rationale.iter().any(|b| b.to_lowercase().contains("posture")));
    assert!(plan.rationale.iter().any(|b| b.contains("29.0")));
}

/// §8 scenario 3: knee injury plus a "no barbell" equipment limit.
#[test]
fn scenario_3_knee_injury_and_no_barbell() {
    let mut wizard = wizard(175.0, 85.0);
    wizard.injuries.push("left knee pain".to_string());
    wizard.equipment_limits.push("no barbell".to_string());

    let profile = profile(30, Sex::Male, Goal::Recomp, 5, ActivityLevel::Moderate);
    let vision = vision(0.85, 18.0, 90.0, BTreeSet::new());

    let outcome = contract::validate(profile, wizard, vision).expect("should validate cleanly");
    let ValidationOutcome::Adult(data_contract) = outcome else {
        panic!("a 30-year-old must route to the adult path");
    };

    let plan = PlanSynthesizer::synthesize(&data_contract, None, Utc::now()).expect("synthesis should succeed");

    for week in &plan.mesocycles {
        for day in &week.days {
            for exercise in &day.exercises {
                assert!(!["Lunges", "Jump Squats", "Plyometrics"].contains(&exercise.name.as_str()));
                assert!(!exercise.equipment.iter().any(|e| e == "barbell"), "{} still requires a barbell", exercise.name);
            }
        }
    }

    assert_eq!(plan.safety_checks.get("injury_exclusions_honored"), Some(&visionfit_core::models::plan::SafetyCheckResult::Passed));
}

/// §8 scenario 4: a low-quality vision record must never reach synthesis.
#[test]
fn scenario_4_low_quality_vision_is_rejected_before_synthesis() {
    let profile = profile(25, Sex::Male, Goal::Maintenance, 4, ActivityLevel::Moderate);
    let wizard = wizard(180.0, 80.0);
    let vision = vision(0.55, 18.0, 90.0, BTreeSet::new());

    let result = contract::validate(profile, wizard, vision);
    let violations = result.expect_err("a sub-threshold quality score must fail validation");
    assert!(violations.iter().any(|v| v.field == "vision.quality"));
}

/// §8 scenario 6: a profile below the adult age floor routes to the kid-safe path.
#[test]
fn scenario_6_age_12_routes_to_kid_safe_plan_with_no_calorie_numbers() {
    let profile = profile(12, Sex::Female, Goal::FatLoss, 3, ActivityLevel::Light);
    let wizard = wizard(150.0, 45.0);
    let vision = vision(0.80, 20.0, 85.0, BTreeSet::new());

    let outcome = contract::validate(profile, wizard, vision).expect("should validate cleanly");
    let ValidationOutcome::KidSafe { profile, wizard, vision } = outcome else {
        panic!("a 12-year-old must route to the kid-safe path");
    };

    let kid_plan = PlanSynthesizer::synthesize_kid_safe(&profile, &wizard, &vision, Utc::now());
    assert!(!kid_plan.activities.is_empty());
    assert!(kid_plan.disclaimer.to_lowercase().contains("pediatric") || kid_plan.disclaimer.to_lowercase().contains("pediatrician"));
}

/// The response formatter is a mechanical, policy-free projection: every
/// number it emits must already exist on the synthesized plan.
#[test]
fn formatter_flattens_every_week_and_day_with_no_recomputation() {
    let profile = profile(28, Sex::Male, Goal::MuscleGain, 4, ActivityLevel::Moderate);
    let wizard = wizard(180.0, 78.0);
    let vision = vision(0.82, 15.0, 92.0, BTreeSet::new());

    let outcome = contract::validate(profile, wizard, vision).expect("should validate cleanly");
    let ValidationOutcome::Adult(data_contract) = outcome else {
        panic!("expected the adult path");
    };
    let plan = PlanSynthesizer::synthesize(&data_contract, None, Utc::now()).expect("synthesis should succeed");
    let response = ResponseFormatter::format(&plan);

    assert_eq!(response.weekly_nutrition_targets.len(), 4);
    let expected_rows: usize = plan.mesocycles.iter().map(|w| w.days.iter().map(|d| d.exercises.len()).sum::<usize>()).sum();
    assert_eq!(response.training_mesocycle.len(), expected_rows);
    assert_eq!(response.overview.duration_weeks, 4);
    assert_eq!(response.overview.training_days_per_week, 4);
}

/// Synthesis is a pure function of the `DataContract` (§8 "Round-trip /
/// idempotence"): two runs on an equal contract agree on everything but
/// the plan id and timestamp.
#[test]
fn synthesis_is_deterministic_given_an_identical_contract() {
    let profile = profile(40, Sex::NonBinary, Goal::Recomp, 6, ActivityLevel::High);
    let wizard = wizard(170.0, 70.0);
    let alerts = BTreeSet::from([PoseAlert::ForwardHead, PoseAlert::KneeValgus]);
    let vision = vision(0.9, 22.0, 88.0, alerts);

    let outcome_a = contract::validate(profile.clone(), wizard.clone(), vision.clone()).expect("should validate");
    let outcome_b = contract::validate(profile, wizard, vision).expect("should validate");
    let (ValidationOutcome::Adult(contract_a), ValidationOutcome::Adult(contract_b)) = (outcome_a, outcome_b) else {
        panic!("expected the adult path");
    };

    let now = Utc::now();
    let plan_a = PlanSynthesizer::synthesize(&contract_a, None, now).expect("synthesis should succeed");
    let plan_b = PlanSynthesizer::synthesize(&contract_b, None, now).expect("synthesis should succeed");

    assert_eq!(plan_a.mesocycles, plan_b.mesocycles);
    assert_eq!(plan_a.nutrition, plan_b.nutrition);
    assert_eq!(plan_a.rationale, plan_b.rationale);
    assert_eq!(plan_a.mobility_drills, plan_b.mobility_drills);
}

/// Dietary restrictions declared on the profile must filter meal ideas.
#[test]
fn vegan_restriction_filters_meal_ideas() {
    let mut profile = profile(27, Sex::Female, Goal::Maintenance, 4, ActivityLevel::Moderate);
    profile.dietary_restrictions.push(DietaryRestriction::Vegan);
    let wizard = wizard(165.0, 60.0);
    let vision = vision(0.85, 22.0, 90.0, BTreeSet::new());

    let outcome = contract::validate(profile, wizard, vision).expect("should validate cleanly");
    let ValidationOutcome::Adult(data_contract) = outcome else {
        panic!("expected the adult path");
    };
    let plan = PlanSynthesizer::synthesize(&data_contract, None, Utc::now()).expect("synthesis should succeed");

    assert!(!plan.meal_ideas.is_empty());
    for meal in &plan.meal_ideas {
        let lower = format!("{} {}", meal.name, meal.ingredients.join(" ")).to_lowercase();
        assert!(
            !lower.contains("chicken") && !lower.contains("beef") && !lower.contains("salmon") && !lower.contains("egg") && !lower.contains("yogurt"),
            "vegan restriction violated by meal idea: {} ({:?})",
            meal.name,
            meal.ingredients
        );
    }
}
