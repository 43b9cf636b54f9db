// ABOUTME: Plan — the output artifact of synthesis: four weekly mesocycles, nutrition, rationale, safety checks
// ABOUTME: Immutable after creation; a regenerated plan is a new Plan whose parent_id references the original
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DataContract, StaticProfile, VisionRecord, WizardInputs};

/// A single prescribed exercise within a workout day (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExercise {
    /// Exercise name, as it appears in the [`crate::catalog::ExerciseCatalog`].
    pub name: String,
    /// Number of working sets.
    pub sets: u32,
    /// Rep prescription, e.g. `"12-15"` or a hold duration like `"30 s"`.
    pub reps: String,
    /// Rest between sets, in seconds.
    pub rest_seconds: u32,
    /// Equipment required for this exercise.
    pub equipment: Vec<String>,
    /// True if this exercise was injected to address a [`crate::models::PoseAlert`]
    /// rather than to drive goal progress.
    pub corrective: bool,
    /// Optional note explaining why this exercise was chosen — e.g. which
    /// pose alert it corrects, or which substitution was applied.
    pub rationale_note: Option<String>,
}

/// One scheduled training day within a weekly mesocycle (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// Day label, e.g. `"Day 1 — Push"`.
    pub label: String,
    /// Muscle groups targeted this day.
    pub muscle_groups: Vec<String>,
    /// Ordered list of prescribed exercises.
    pub exercises: Vec<PlanExercise>,
}

/// One of the four weekly training blocks (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMesocycle {
    /// Week number, in [1, 4].
    pub week: u32,
    /// Short label describing this week's emphasis, e.g. `"Deload"`.
    pub focus: String,
    /// Volume multiplier applied to baseline rep prescriptions this week.
    pub volume_multiplier: f64,
    /// Scheduled workout days.
    pub days: Vec<WorkoutDay>,
}

/// Daily nutrition targets for one week (§3). All energy values are in
/// kilojoules (integer); all masses are in grams to 0.1 (§6 "Units").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Week number this row applies to, in [1, 4].
    pub week: u32,
    /// Target daily energy, in kilojoules.
    pub kj_per_day: i64,
    /// Target daily protein, in grams.
    pub protein_g: f64,
    /// Target daily carbohydrates, in grams.
    pub carbs_g: f64,
    /// Target daily fat, in grams.
    pub fat_g: f64,
    /// Target daily fiber, in grams.
    pub fiber_g: f64,
    /// Target daily water intake, in milliliters.
    pub water_ml: f64,
}

/// A single sample meal idea with a metric ingredient list (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealIdea {
    /// Meal slot, e.g. `"Breakfast"`.
    pub slot: String,
    /// Human-readable meal name.
    pub name: String,
    /// Target energy for this meal, in kilojoules.
    pub kj: i64,
    /// Protein content, in grams.
    pub protein_g: f64,
    /// Carbohydrate content, in grams.
    pub carbs_g: f64,
    /// Fat content, in grams.
    pub fat_g: f64,
    /// Ingredients with metric quantities, e.g. `"200 g chicken breast"`.
    pub ingredients: Vec<String>,
}

/// Result of one named safety check from the post-hoc audit (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyCheckResult {
    /// The check passed outright.
    Passed,
    /// The check failed but was repaired in place (e.g. calories raised to
    /// the floor and macros recomputed).
    RepairedInPlace,
    /// The check failed and is surfaced as an unresolved warning.
    Warning,
}

/// The complete generated plan artifact (§3 `Plan`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique plan identifier.
    pub plan_id: Uuid,
    /// Parent plan id, if this plan is a regeneration of a prior one.
    pub parent_plan_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// The four weekly mesocycles, always exactly 4 (§8 invariant).
    pub mesocycles: Vec<WeeklyMesocycle>,
    /// One nutrition-targets row per week, always exactly 4.
    pub nutrition: Vec<NutritionTargets>,
    /// Sample meal ideas.
    pub meal_ideas: Vec<MealIdea>,
    /// Mobility drills derived from `vision.pose_alerts`.
    pub mobility_drills: Vec<String>,
    /// Ordered rationale bullets, each referencing a specific input, 1-5
    /// entries.
    pub rationale: Vec<String>,
    /// Boolean/result map keyed by safety-rule name (§4.7).
    pub safety_checks: BTreeMap<String, SafetyCheckResult>,
    /// Frozen snapshot of the profile used to generate this plan.
    pub profile_snapshot: StaticProfile,
    /// Frozen snapshot of the wizard inputs used to generate this plan.
    pub wizard_snapshot: WizardInputs,
    /// Frozen snapshot of the vision record used to generate this plan.
    pub vision_snapshot: VisionRecord,
}

impl Plan {
    /// Assemble the frozen snapshots from a validated contract. The caller
    /// supplies everything else (`plan_id`, `created_at`, etc. are threaded
    /// through by the synthesizer as they're computed).
    #[must_use]
    pub fn snapshot_from(contract: &DataContract) -> (StaticProfile, WizardInputs, VisionRecord) {
        (
            contract.profile.clone(),
            contract.wizard.clone(),
            contract.vision.clone(),
        )
    }
}
