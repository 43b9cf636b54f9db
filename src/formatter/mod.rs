// ABOUTME: Response Formatter — mechanical, policy-free projection of a Plan into the external wire shape (§6)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Grounded on the teacher's `src/formatters/mod.rs` format-selection/flatten
//! shape (`OutputFormat`, `FormattedOutput`). Here there is exactly one
//! external shape, so [`ResponseFormatter::format`] is a single mechanical
//! projection with no policy decisions — it never recomputes a number, it
//! only reshapes and re-stringifies what [`crate::plan::PlanSynthesizer`]
//! already produced.

use serde::{Deserialize, Serialize};
use visionfit_core::constants::plan::MESOCYCLE_WEEKS;
use visionfit_core::models::Plan;

/// Assumed time-under-tension per working set, used only to estimate
/// session length for [`Overview::estimated_time_per_session`] — this is
/// display-only and never feeds back into prescription.
const ASSUMED_SECONDS_PER_SET: u32 = 40;

/// Plan overview summary (§6 `overview`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// One-line human summary, e.g. `"4-week muscle-gain plan, 4 days/week"`.
    pub summary: String,
    /// Always [`MESOCYCLE_WEEKS`] (4).
    pub duration_weeks: u32,
    /// Training days per week, echoed from the profile.
    pub training_days_per_week: u32,
    /// Estimated session length, e.g. `"55 min"`.
    pub estimated_time_per_session: String,
    /// Fixed disclaimer text.
    pub disclaimer: String,
}

/// One week's nutrition row on the wire (§6 `weeklyNutritionTargets`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyNutritionRow {
    /// Week number, in [1, 4].
    pub week: u32,
    /// Target daily energy, in kilojoules.
    pub kj_per_day: i64,
    /// Target daily protein, in grams, to 0.1.
    pub protein_g: f64,
    /// Target daily carbohydrates, in grams, to 0.1.
    pub carbs_g: f64,
    /// Target daily fat, in grams, to 0.1.
    pub fat_g: f64,
}

/// One flattened exercise row on the wire (§6 `trainingMesocycle`). Carries
/// `week` in addition to the spec's named fields (`day`, `exercise`, `sets`,
/// `reps`, `rest`) since the internal model spans four weeks and the wire
/// table would otherwise have four indistinguishable rows per exercise —
/// see `DESIGN.md` for this Open Question's resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MesocycleRow {
    /// Week number, in [1, 4].
    pub week: u32,
    /// Day label, e.g. `"Day 1 — Upper A"`.
    pub day: String,
    /// Exercise name.
    pub exercise: String,
    /// Working sets.
    pub sets: u32,
    /// Rep prescription string, e.g. `"12-15"` or `"30 s"`.
    pub reps: String,
    /// Rest between sets, as a `"N s"`/`"N min"` string.
    pub rest: String,
}

/// The complete external wire shape (§6 "Plan response").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Plan-level overview.
    pub overview: Overview,
    /// One nutrition row per week, always four.
    pub weekly_nutrition_targets: Vec<WeeklyNutritionRow>,
    /// One flattened row per exercise per week per day.
    pub training_mesocycle: Vec<MesocycleRow>,
    /// Flat, human-readable meal-idea strings.
    pub meal_ideas: Vec<String>,
    /// Flat mobility-drill name list.
    pub mobility_drills: Vec<String>,
    /// Ordered rationale bullets.
    pub rationale: Vec<String>,
}

/// The stateless response formatter (§6). Holds no data of its own, same
/// discipline as [`crate::plan::PlanSynthesizer`] and
/// [`crate::safety::SafetyValidator`].
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Project an internal [`Plan`] into the external wire format. Purely
    /// mechanical: every number here was already computed upstream.
    #[must_use]
    pub fn format(plan: &Plan) -> PlanResponse {
        PlanResponse {
            overview: Self::build_overview(plan),
            weekly_nutrition_targets: plan
                .nutrition
                .iter()
                .map(|row| WeeklyNutritionRow {
                    week: row.week,
                    kj_per_day: row.kj_per_day,
                    protein_g: row.protein_g,
                    carbs_g: row.carbs_g,
                    fat_g: row.fat_g,
                })
                .collect(),
            training_mesocycle: plan
                .mesocycles
                .iter()
                .flat_map(|week| {
                    week.days.iter().flat_map(move |day| {
                        day.exercises.iter().map(move |exercise| MesocycleRow {
                            week: week.week,
                            day: day.label.clone(),
                            exercise: exercise.name.clone(),
                            sets: exercise.sets,
                            reps: exercise.reps.clone(),
                            rest: format_seconds(exercise.rest_seconds),
                        })
                    })
                })
                .collect(),
            meal_ideas: plan.meal_ideas.iter().map(format_meal_idea).collect(),
            mobility_drills: plan.mobility_drills.clone(),
            rationale: plan.rationale.clone(),
        }
    }

    fn build_overview(plan: &Plan) -> Overview {
        let training_days_per_week = plan.profile_snapshot.training_days_per_week;
        let summary = format!(
            "{}-week {} plan, {} days/week",
            MESOCYCLE_WEEKS,
            goal_label(plan.profile_snapshot.primary_goal),
            training_days_per_week
        );

        Overview {
            summary,
            duration_weeks: MESOCYCLE_WEEKS,
            training_days_per_week,
            estimated_time_per_session: estimate_session_time(plan),
            disclaimer: "This plan is generated from an automated photo-based estimate and is not a substitute \
                         for individualized advice from a qualified coach, physician, or registered dietitian."
                .to_string(),
        }
    }
}

fn goal_label(goal: visionfit_core::models::Goal) -> &'static str {
    use visionfit_core::models::Goal;
    match goal {
        Goal::MuscleGain => "muscle-gain",
        Goal::FatLoss => "fat-loss",
        Goal::Recomp => "recomposition",
        Goal::Maintenance => "maintenance",
    }
}

fn format_seconds(seconds: u32) -> String {
    if seconds >= 60 && seconds % 60 == 0 {
        format!("{} min", seconds / 60)
    } else {
        format!("{seconds} s")
    }
}

fn estimate_session_time(plan: &Plan) -> String {
    let Some(first_week) = plan.mesocycles.first() else {
        return "0 min".to_string();
    };
    let Some(busiest_day) = first_week.days.iter().max_by_key(|day| day.exercises.len()) else {
        return "0 min".to_string();
    };

    let total_seconds: u32 = busiest_day
        .exercises
        .iter()
        .map(|exercise| exercise.sets * (exercise.rest_seconds + ASSUMED_SECONDS_PER_SET))
        .sum();

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (f64::from(total_seconds) / 60.0).round() as u32;
    format!("{minutes} min")
}

fn format_meal_idea(meal: &visionfit_core::models::plan::MealIdea) -> String {
    format!(
        "{}: {} ({} kJ, {:.1} g protein, {:.1} g carbs, {:.1} g fat) — {}",
        meal.slot,
        meal.name,
        meal.kj,
        meal.protein_g,
        meal.carbs_g,
        meal.fat_g,
        meal.ingredients.join(", ")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::PlanSynthesizer;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;
    use visionfit_core::models::vision_record::Anthro;
    use visionfit_core::models::{
        ActivityLevel, Confidence, DataContract, Experience, Goal, Sex, SmartScaleReadings, StaticProfile, VisionRecord, WizardInputs,
        VISION_RECORD_SCHEMA_VERSION,
    };

    fn sample_plan() -> Plan {
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
            reported_rir: None,
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
            pose_alerts: std::collections::BTreeSet::new(),
            confidence: Confidence::High,
            analyzed_at: Utc::now(),
            schema_version: VISION_RECORD_SCHEMA_VERSION,
        };
        let contract = DataContract::from_validated_parts(profile, wizard, vision, vec![]);
        PlanSynthesizer::synthesize(&contract, None, Utc::now()).unwrap()
    }

    #[test]
    fn formatted_response_has_four_nutrition_rows_and_a_nonempty_mesocycle() {
        let response = ResponseFormatter::format(&sample_plan());
        assert_eq!(response.weekly_nutrition_targets.len(), 4);
        assert!(!response.training_mesocycle.is_empty());
        assert_eq!(response.overview.duration_weeks, 4);
    }

    #[test]
    fn rest_seconds_format_as_seconds_or_minutes() {
        assert_eq!(format_seconds(45), "45 s");
        assert_eq!(format_seconds(120), "2 min");
        assert_eq!(format_seconds(105), "105 s");
    }

    #[test]
    fn meal_ideas_flatten_to_readable_strings() {
        let response = ResponseFormatter::format(&sample_plan());
        assert_eq!(response.meal_ideas.len(), 4);
        assert!(response.meal_ideas[0].contains("kJ"));
    }
}
