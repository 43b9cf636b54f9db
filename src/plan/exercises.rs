// ABOUTME: Exercise selection against the catalog — difficulty/injury filtering, equipment substitution, anthro adaptation (§4.6 step 4)
// ABOUTME: Also seeds baseline sets/reps/rest by experience and muscle group (§4.6 step 5)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::catalog::{self, Difficulty, Exercise, MuscleGroup};
use visionfit_core::constants::plan::{LONG_FEMUR_HIP_CM_THRESHOLD, TARGET_MAIN_EXERCISES_PER_DAY};
use visionfit_core::models::{Experience, WizardInputs};

use crate::plan::split::DayTemplate;

/// A low/high rep prescription, or a fixed hold duration (§3: "rep
/// prescription as a range or time").
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepPrescription {
    /// An inclusive rep-count range, e.g. 12-15.
    Range(u32, u32),
    /// A fixed hold duration in seconds, e.g. a 30s plank.
    HoldSeconds(u32),
}

impl RepPrescription {
    /// Scale a range prescription by a volume multiplier, rounding each
    /// bound to the nearest whole rep (§4.6 step 6). Hold durations are
    /// left unscaled — week-over-week progression in this system is
    /// expressed through rep count, not hold time.
    #[must_use]
    pub fn scaled(self, multiplier: f64) -> Self {
        match self {
            Self::Range(low, high) => {
                let scale = |value: u32| (f64::from(value) * multiplier).round() as u32;
                Self::Range(scale(low), scale(high))
            }
            Self::HoldSeconds(seconds) => Self::HoldSeconds(seconds),
        }
    }

    /// Apply the RIR-adjustment rule (§4.1) to both bounds of a range
    /// prescription via [`visionfit_core::measurement::rir_adjusted_reps`].
    /// No-op for a hold duration.
    #[must_use]
    pub fn rir_bumped(self, reported_rir: u8) -> Self {
        match self {
            Self::Range(low, high) => Self::Range(
                visionfit_core::measurement::rir_adjusted_reps(low, reported_rir),
                visionfit_core::measurement::rir_adjusted_reps(high, reported_rir),
            ),
            Self::HoldSeconds(seconds) => Self::HoldSeconds(seconds),
        }
    }

    /// Render as the external wire string, e.g. `"12-15"` or `"30 s"`.
    #[must_use]
    pub fn to_display_string(self) -> String {
        match self {
            Self::Range(low, high) => format!("{low}-{high}"),
            Self::HoldSeconds(seconds) => format!("{seconds} s"),
        }
    }
}

/// A catalog exercise paired with its prescribed sets/reps/rest, before
/// being frozen into a [`visionfit_core::models::PlanExercise`] for a
/// specific week (week-over-week scaling happens one layer up).
#[derive(Debug, Clone)]
pub struct SelectedExercise {
    /// Catalog or corrective-drill name.
    pub name: String,
    /// Equipment required.
    pub equipment: Vec<String>,
    /// Working sets.
    pub sets: u32,
    /// Baseline (week-1) rep prescription.
    pub reps: RepPrescription,
    /// Rest between sets, in seconds.
    pub rest_seconds: u32,
    /// `true` if injected to address a posture alert rather than selected
    /// for goal progress.
    pub corrective: bool,
    /// Rationale note, e.g. which posture alert this corrects or which
    /// substitution was applied.
    pub rationale_note: Option<String>,
}

/// Baseline sets by experience tier (§4.6 step 5).
fn baseline_sets(experience: Experience) -> u32 {
    match experience {
        Experience::Beginner => 3,
        Experience::Intermediate | Experience::Advanced => 4,
    }
}

/// Baseline reps/rest by targeted muscle group (§4.6 step 5: "legs 12-15 /
/// 90-120s rest; core 15-20 / 45s; upper body 6-12 / 60-90s"). Ranges are
/// represented by their midpoint-leaning single value since the external
/// rest field is one integer, not a range.
fn baseline_reps_rest(group: MuscleGroup) -> (RepPrescription, u32) {
    match group {
        MuscleGroup::Legs => (RepPrescription::Range(12, 15), 105),
        MuscleGroup::Core => (RepPrescription::Range(15, 20), 45),
        MuscleGroup::Chest
        | MuscleGroup::Back
        | MuscleGroup::Shoulders
        | MuscleGroup::Arms
        | MuscleGroup::FullBody => (RepPrescription::Range(6, 12), 75),
    }
}

/// Select exercises for one scheduled day, applying difficulty filtering,
/// injury exclusions, the hip-width anthropometric adaptation, and
/// equipment substitution (§4.6 step 4), then seed sets/reps/rest
/// (§4.6 step 5).
///
/// Aims for [`TARGET_MAIN_EXERCISES_PER_DAY`] main exercises, adding
/// accessory core work if the targeted groups come up short.
#[must_use]
pub fn select_exercises(
    day: &DayTemplate,
    experience: Experience,
    blocked: &[String],
    wizard: &WizardInputs,
    hip_cm: f64,
) -> Vec<SelectedExercise> {
    let mut picked: Vec<SelectedExercise> = Vec::new();
    let mut seen_names: Vec<String> = Vec::new();
    let no_barbell = wizard.has_equipment_limit("no barbell");
    let prefer_shorter_lever_squats = hip_cm > LONG_FEMUR_HIP_CM_THRESHOLD;

    let per_group_quota = TARGET_MAIN_EXERCISES_PER_DAY.div_ceil(day.groups.len().max(1));

    for &group in day.groups {
        let mut taken_for_group = 0usize;
        for exercise in catalog::by_muscle_group(group) {
            if taken_for_group >= per_group_quota {
                break;
            }
            if seen_names.iter().any(|n| n == exercise.name) {
                continue;
            }
            if exercise.difficulty > difficulty_ceiling(experience) {
                continue;
            }
            if group == MuscleGroup::Legs && prefer_shorter_lever_squats && exercise.name == "Barbell Back Squat" {
                continue;
            }
            if catalog::is_blocked(exercise.name, blocked) {
                continue;
            }

            let Some(resolved) = resolve_equipment(exercise, no_barbell, blocked) else {
                continue;
            };

            let (reps, rest_seconds) = baseline_reps_rest(group);
            seen_names.push(resolved.name.clone());
            picked.push(SelectedExercise {
                name: resolved.name,
                equipment: resolved.equipment,
                sets: baseline_sets(experience),
                reps,
                rest_seconds,
                corrective: false,
                rationale_note: resolved.rationale_note,
            });
            taken_for_group += 1;
        }
    }

    if picked.len() < TARGET_MAIN_EXERCISES_PER_DAY {
        for exercise in catalog::by_muscle_group(MuscleGroup::Core) {
            if picked.len() >= TARGET_MAIN_EXERCISES_PER_DAY {
                break;
            }
            if seen_names.iter().any(|n| n == exercise.name) || catalog::is_blocked(exercise.name, blocked) {
                continue;
            }
            if exercise.difficulty > difficulty_ceiling(experience) {
                continue;
            }
            let (reps, rest_seconds) = baseline_reps_rest(MuscleGroup::Core);
            seen_names.push(exercise.name.to_string());
            picked.push(SelectedExercise {
                name: exercise.name.to_string(),
                equipment: exercise.equipment.iter().map(|e| (*e).to_string()).collect(),
                sets: baseline_sets(experience),
                reps,
                rest_seconds,
                corrective: false,
                rationale_note: Some("accessory core work added to round out the session".to_string()),
            });
        }
    }

    picked
}

fn difficulty_ceiling(experience: Experience) -> Difficulty {
    match experience {
        Experience::Beginner => Difficulty::Beginner,
        Experience::Intermediate => Difficulty::Intermediate,
        Experience::Advanced => Difficulty::Advanced,
    }
}

struct ResolvedExercise {
    name: String,
    equipment: Vec<String>,
    rationale_note: Option<String>,
}

/// Resolve an `is_barbell` exercise under a `"no barbell"` equipment limit
/// by walking its substitution list; leaves non-barbell exercises
/// untouched. Returns `None` if no unblocked substitution exists.
fn resolve_equipment(exercise: &'static Exercise, no_barbell: bool, blocked: &[String]) -> Option<ResolvedExercise> {
    if !(no_barbell && exercise.is_barbell) {
        return Some(ResolvedExercise {
            name: exercise.name.to_string(),
            equipment: exercise.equipment.iter().map(|e| (*e).to_string()).collect(),
            rationale_note: None,
        });
    }

    let substitute_name = catalog::substitute_for(exercise.name, blocked)?;
    let substitute = catalog::find(substitute_name)?;
    Some(ResolvedExercise {
        name: substitute.name.to_string(),
        equipment: substitute.equipment.iter().map(|e| (*e).to_string()).collect(),
        rationale_note: Some(format!(
            "{} substituted for {} (no barbell equipment available)",
            substitute.name, exercise.name
        )),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::split::choose_split;

    fn no_limits_wizard() -> WizardInputs {
        WizardInputs {
            photo_reference: "p".to_string(),
            height_cm: 180.0,
            weight_kg: 80.0,
            smart_scale: visionfit_core::models::SmartScaleReadings::default(),
            injuries: vec![],
            equipment_limits: vec![],
            user_comment: String::new(),
            reported_rir: None,
        }
    }

    #[test]
    fn no_barbell_limit_removes_every_barbell_exercise() {
        let mut wizard = no_limits_wizard();
        wizard.equipment_limits.push("no barbell".to_string());
        for day in choose_split(4) {
            let selected = select_exercises(&day, Experience::Intermediate, &[], &wizard, 90.0);
            for exercise in &selected {
                assert!(
                    !exercise.equipment.iter().any(|e| e == "barbell"),
                    "{} still requires a barbell",
                    exercise.name
                );
            }
        }
    }

    #[test]
    fn hip_width_over_95_avoids_barbell_back_squat() {
        let day = split_with_legs();
        let selected = select_exercises(&day, Experience::Intermediate, &[], &no_limits_wizard(), 100.0);
        assert!(!selected.iter().any(|e| e.name == "Barbell Back Squat"));
    }

    #[test]
    fn blocked_exercise_names_never_appear() {
        let blocked = vec!["Deadlift".to_string(), "Bent-Over Row".to_string()];
        for day in choose_split(4) {
            let selected = select_exercises(&day, Experience::Advanced, &blocked, &no_limits_wizard(), 90.0);
            for exercise in &selected {
                assert!(!blocked.contains(&exercise.name));
            }
        }
    }

    fn split_with_legs() -> DayTemplate {
        choose_split(5).into_iter().find(|d| d.groups.contains(&MuscleGroup::Legs)).unwrap()
    }
}
