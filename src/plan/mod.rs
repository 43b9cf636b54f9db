// ABOUTME: Plan Synthesizer — the ten-step deterministic pipeline from a DataContract to a Plan
// ABOUTME: Also the sibling kid-safe path, which never touches calorie math
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthesis runs a fixed ten-step pipeline (§4.6): safety precheck,
//! corrective injection, training-split selection, exercise selection,
//! sets/reps/rest prescription, week-over-week progression, nutrition
//! targets, meal ideas, rationale, and final assembly. Every step is a pure
//! function of the [`visionfit_core::models::DataContract`] plus the
//! previous steps' output — no hidden state, mirroring the teacher's
//! `recommendation_engine`/`goal_engine` staged-pipeline style.

pub mod correctives;
pub mod exercises;
pub mod meals;
pub mod nutrition;
pub mod rationale;
pub mod split;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use visionfit_core::constants::plan::MESOCYCLE_WEEKS;
use visionfit_core::errors::AppError;
use visionfit_core::measurement::week_volume_multiplier;
use visionfit_core::models::plan::{PlanExercise, WeeklyMesocycle, WorkoutDay};
use visionfit_core::models::{DataContract, Experience, Plan, Sex, StaticProfile, VisionRecord, WizardInputs};

use exercises::SelectedExercise;

/// The stateless plan synthesizer (§3, §4.6). Holds no data of its own —
/// every method takes the contract it needs, matching the rest of this
/// system's pure-function discipline at the orchestration layer.
pub struct PlanSynthesizer;

impl PlanSynthesizer {
    /// Run the full ten-step synthesis pipeline against a validated adult
    /// contract (§4.6).
    ///
    /// `parent_plan_id` is `Some` when this call regenerates an existing
    /// plan (§3: "a regenerated plan is a new Plan whose parent_id
    /// references the original").
    ///
    /// # Errors
    ///
    /// Returns [`visionfit_core::errors::ErrorKind::SafetyViolation`] if the
    /// post-hoc safety audit finds a catastrophic week-over-week
    /// progression jump (§4.7) — no plan is emitted in that case.
    pub fn synthesize(contract: &DataContract, parent_plan_id: Option<Uuid>, now: DateTime<Utc>) -> Result<Plan, AppError> {
        let profile = &contract.profile;
        let wizard = &contract.wizard;
        let vision = &contract.vision;
        let experience = profile.experience();

        // Step 1: advisory safety precheck.
        let blocked = crate::safety::SafetyValidator::blocked_exercises(&wizard.injuries);

        // Step 2 is folded into day assembly below: correctives are injected
        // into every day of every week, not computed once up front.
        let day_templates = split::choose_split(profile.training_days_per_week);

        let mut substitution_notes = Vec::new();
        let mut mesocycles = Vec::with_capacity(MESOCYCLE_WEEKS as usize);

        for week in 1..=MESOCYCLE_WEEKS {
            let volume_multiplier = week_volume_multiplier(week, experience);
            let mut days = Vec::with_capacity(day_templates.len());

            for day in &day_templates {
                // Step 4: exercise selection (equipment substitution, anthro
                // adaptation, difficulty/injury filtering).
                let selected = exercises::select_exercises(day, experience, &blocked, wizard, vision.anthro.hip_cm);

                for exercise in &selected {
                    if let Some(note) = &exercise.rationale_note {
                        if note.contains("substituted") {
                            substitution_notes.push(note.clone());
                        }
                    }
                }

                // Step 2: corrective drills, injected into every day.
                let correctives = correctives::corrective_exercises(&vision.pose_alerts);

                // Steps 5-6: baseline prescription, then RIR bump (week 1
                // only) and week-over-week volume scaling, chained.
                let plan_exercises = selected
                    .into_iter()
                    .chain(correctives)
                    .map(|exercise| prescribe_for_week(exercise, wizard.reported_rir, volume_multiplier))
                    .collect();

                days.push(WorkoutDay {
                    label: day.label.to_string(),
                    muscle_groups: day.groups.iter().map(|g| format!("{g:?}")).collect(),
                    exercises: plan_exercises,
                });
            }

            mesocycles.push(WeeklyMesocycle {
                week,
                focus: week_focus_label(week, experience),
                volume_multiplier,
                days,
            });
        }

        // Step 7: nutrition targets, one row per week.
        let nutrition: Vec<_> = (1..=MESOCYCLE_WEEKS)
            .map(|week| nutrition::weekly_targets(week, profile, wizard.height_cm, wizard.weight_kg, vision))
            .collect();

        // Step 8: meal ideas, scaled to week 1's (baseline) energy target.
        let baseline_kj = nutrition.first().map_or(0, |row| row.kj_per_day);
        let meal_ideas = meals::meal_ideas_for_day(baseline_kj, &profile.dietary_restrictions);

        let mobility_drills = correctives::mobility_drill_names(&vision.pose_alerts);

        // Step 9: rationale bullets.
        let rationale = rationale::build_rationale(profile, &vision.pose_alerts, &substitution_notes, vision.bf_estimate);

        let (profile_snapshot, wizard_snapshot, vision_snapshot) = Plan::snapshot_from(contract);

        // Step 10: final assembly, then the post-hoc safety audit.
        let mut plan = Plan {
            plan_id: Uuid::new_v4(),
            parent_plan_id,
            created_at: now,
            mesocycles,
            nutrition,
            meal_ideas,
            mobility_drills,
            rationale,
            safety_checks: std::collections::BTreeMap::new(),
            profile_snapshot,
            wizard_snapshot,
            vision_snapshot,
        };

        let age_years = f64::from(u32::try_from(profile.age_years().max(0)).unwrap_or(0));
        let tdee_kcal_value =
            crate::safety::SafetyValidator::reconstruct_tdee_kcal(profile.sex, wizard.weight_kg, wizard.height_cm, age_years, profile.activity_level);
        let safety_checks = crate::safety::SafetyValidator::audit(&mut plan, profile.sex, tdee_kcal_value, wizard.weight_kg, experience)?;
        plan.safety_checks = safety_checks;

        Ok(plan)
    }

    /// Build the kid-safe artifact for a profile below the adult age floor
    /// (§4.5 routing, §8 scenario 6). Play-based activities only — no
    /// calorie or macro numbers anywhere in the output.
    #[must_use]
    pub fn synthesize_kid_safe(
        _profile: &StaticProfile,
        _wizard: &WizardInputs,
        _vision: &VisionRecord,
        now: DateTime<Utc>,
    ) -> visionfit_core::models::KidSafePlan {
        use visionfit_core::models::PlayActivity;

        visionfit_core::models::KidSafePlan {
            plan_id: Uuid::new_v4(),
            created_at: now,
            activities: vec![
                PlayActivity {
                    name: "Tag".to_string(),
                    suggested_duration: "20-30 min".to_string(),
                    benefit_note: "Builds cardiovascular fitness and coordination through unstructured play.".to_string(),
                },
                PlayActivity {
                    name: "Obstacle Course".to_string(),
                    suggested_duration: "15-20 min".to_string(),
                    benefit_note: "Develops balance, agility, and full-body strength without a training load.".to_string(),
                },
                PlayActivity {
                    name: "Swimming".to_string(),
                    suggested_duration: "30 min".to_string(),
                    benefit_note: "Low-impact full-body activity that supports healthy growth.".to_string(),
                },
                PlayActivity {
                    name: "Bike Ride".to_string(),
                    suggested_duration: "30-45 min".to_string(),
                    benefit_note: "Builds leg strength and cardiovascular endurance.".to_string(),
                },
            ],
            disclaimer: "This plan is for users under the adult training age floor. It offers active play \
                         suggestions only, with no calorie targets or structured resistance training. \
                         Consult a pediatrician before starting any new physical activity program."
                .to_string(),
        }
    }
}

fn prescribe_for_week(exercise: SelectedExercise, reported_rir: Option<u8>, volume_multiplier: f64) -> PlanExercise {
    let week_1_reps = match reported_rir {
        Some(rir) => exercise.reps.rir_bumped(rir),
        None => exercise.reps,
    };
    let reps_this_week = week_1_reps.scaled(volume_multiplier);

    PlanExercise {
        name: exercise.name,
        sets: exercise.sets,
        reps: reps_this_week.to_display_string(),
        rest_seconds: exercise.rest_seconds,
        equipment: exercise.equipment,
        corrective: exercise.corrective,
        rationale_note: exercise.rationale_note,
    }
}

fn week_focus_label(week: u32, experience: Experience) -> String {
    match week {
        1 => "Base".to_string(),
        2 => "Build".to_string(),
        3 => "Peak".to_string(),
        4 => match experience {
            Experience::Beginner => "Repeat".to_string(),
            Experience::Intermediate | Experience::Advanced => "Deload".to_string(),
        },
        _ => "Base".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use visionfit_core::models::vision_record::Anthro;
    use visionfit_core::models::{ActivityLevel, Confidence, Goal, SmartScaleReadings, VISION_RECORD_SCHEMA_VERSION};

    fn contract() -> DataContract {
        let profile = StaticProfile {
            user_id: Uuid::nil(),
            full_name: "Test User".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1996, 3, 1).unwrap(),
            sex: Sex::Male,
            primary_goal: Goal::MuscleGain,
            training_days_per_week: 4,
            activity_level: ActivityLevel::Moderate,
            experience: Experience::Intermediate,
            dietary_restrictions: vec![],
        };
        let wizard = WizardInputs {
            photo_reference: "photo-1".to_string(),
            height_cm: 180.0,
            weight_kg: 80.0,
            smart_scale: SmartScaleReadings::default(),
            injuries: vec![],
            equipment_limits: vec![],
            user_comment: String::new(),
            reported_rir: Some(1),
        };
        let vision = VisionRecord {
            quality: 0.85,
            bf_estimate: 18.0,
            anthro: Anthro {
                shoulder_cm: 45.0,
                hip_cm: 92.0,
                waist_cm: 85.0,
                chest_cm: 95.0,
                neck_cm: 38.0,
                thigh_cm: 55.0,
                arm_cm: 30.0,
            },
            pose_alerts: std::collections::BTreeSet::from([visionfit_core::models::PoseAlert::RoundedShoulders]),
            confidence: Confidence::High,
            analyzed_at: Utc::now(),
            schema_version: VISION_RECORD_SCHEMA_VERSION,
        };
        DataContract::from_validated_parts(profile, wizard, vision, vec![])
    }

    #[test]
    fn synthesize_produces_exactly_four_mesocycles_and_nutrition_rows() {
        let plan = PlanSynthesizer::synthesize(&contract(), None, Utc::now()).unwrap();
        assert_eq!(plan.mesocycles.len(), 4);
        assert_eq!(plan.nutrition.len(), 4);
    }

    #[test]
    fn every_detected_pose_alert_has_a_corrective_exercise_every_day() {
        let plan = PlanSynthesizer::synthesize(&contract(), None, Utc::now()).unwrap();
        for week in &plan.mesocycles {
            for day in &week.days {
                assert!(day.exercises.iter().any(|e| e.corrective));
            }
        }
    }

    #[test]
    fn rationale_has_at_most_five_bullets() {
        let plan = PlanSynthesizer::synthesize(&contract(), None, Utc::now()).unwrap();
        assert!(plan.rationale.len() <= 5 && !plan.rationale.is_empty());
    }

    #[test]
    fn kid_safe_plan_carries_no_calorie_numbers() {
        let c = contract();
        let kid_plan = PlanSynthesizer::synthesize_kid_safe(&c.profile, &c.wizard, &c.vision, Utc::now());
        assert!(!kid_plan.activities.is_empty());
        assert!(!kid_plan.disclaimer.is_empty());
    }

    #[test]
    fn regeneration_carries_the_parent_id() {
        let parent = Uuid::new_v4();
        let plan = PlanSynthesizer::synthesize(&contract(), Some(parent), Utc::now()).unwrap();
        assert_eq!(plan.parent_plan_id, Some(parent));
    }
}
