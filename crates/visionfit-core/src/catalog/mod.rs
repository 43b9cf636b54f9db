// ABOUTME: Static, process-wide exercise reference data — exercises by muscle group, queried never mutated
// ABOUTME: Also holds the injury/equipment exclusion tables consumed by the plan synthesizer's safety pre-check
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Exercise Catalog
//!
//! A static, read-only reference table keyed by muscle group (§4.2). The
//! plan synthesizer queries it; nothing mutates it at runtime. Organized
//! the way `IntelligenceConfig::global()` holds a process-wide `LazyLock`
//! of static configuration: one table, computed once, shared by every
//! request.

use std::sync::LazyLock;

mod data;

pub use data::{blocked_exercises_for_injury, EXERCISES};

/// A muscle group targeted by a workout day or exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MuscleGroup {
    /// Chest (horizontal press, fly).
    Chest,
    /// Back (vertical and horizontal pull).
    Back,
    /// Shoulders (press, raise).
    Shoulders,
    /// Legs (squat, hinge, lunge patterns).
    Legs,
    /// Core (anti-extension, anti-rotation).
    Core,
    /// Arms (isolated biceps/triceps work).
    Arms,
    /// Full-body / compound movements spanning multiple groups.
    FullBody,
}

/// Exercise difficulty tier. Ordered so an exercise-selection filter can
/// read `exercise.difficulty <= profile.experience` naturally (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    /// Suitable for a first-time trainee.
    Beginner,
    /// Requires a consistent training history.
    Intermediate,
    /// Requires years of structured training.
    Advanced,
}

/// A static catalog entry (§3, §4.2).
#[derive(Debug, Clone, Copy)]
pub struct Exercise {
    /// Exercise name, as referenced by [`crate::models::PlanExercise::name`].
    pub name: &'static str,
    /// Muscle groups this exercise targets.
    pub muscle_groups: &'static [MuscleGroup],
    /// Equipment required, e.g. `["barbell"]`, `[]` for bodyweight.
    pub equipment: &'static [&'static str],
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// `true` if this exercise requires a barbell specifically (equipment
    /// substitution keys off this flag rather than string-matching
    /// `equipment`, per §4.6 step 4 "no barbell").
    pub is_barbell: bool,
    /// Ordered substitution names, tried in order when this exercise is
    /// blocked or its equipment is unavailable.
    pub substitutions: &'static [&'static str],
    /// Free-text safety notes surfaced alongside the exercise.
    pub safety_notes: &'static [&'static str],
}

/// Process-wide, lazily-initialized catalog index. Computed once per
/// process the first time any lookup runs, mirroring the teacher's
/// `IntelligenceConfig::global()` `LazyLock` pattern rather than
/// recomputing per-request.
static CATALOG: LazyLock<Vec<Exercise>> = LazyLock::new(|| EXERCISES.to_vec());

/// All exercises targeting a given muscle group, in catalog order
/// (deterministic — §8 "ordering: exercises within a day are stable given
/// identical input").
#[must_use]
pub fn by_muscle_group(group: MuscleGroup) -> Vec<&'static Exercise> {
    EXERCISES.iter().filter(|exercise| exercise.muscle_groups.contains(&group)).collect()
}

/// Look up a catalog entry by exact name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|exercise| exercise.name == name)
}

/// The first substitution for `name` not itself present in `blocked`, or
/// `None` if every substitution (and the original) is blocked.
#[must_use]
pub fn substitute_for(name: &str, blocked: &[String]) -> Option<&'static str> {
    let exercise = find(name)?;
    exercise
        .substitutions
        .iter()
        .find(|candidate| !blocked.iter().any(|b| b == *candidate))
        .copied()
}

/// `true` if `name` is present in `blocked` (case-sensitive exact match,
/// matching the vocabulary the safety pre-check builds — §4.6 step 1).
#[must_use]
pub fn is_blocked(name: &str, blocked: &[String]) -> bool {
    blocked.iter().any(|b| b == name)
}

/// Force initialization of the lazily-built catalog index. Exposed so
/// callers that want predictable first-request latency (e.g. the worker's
/// startup path) can warm it eagerly.
pub fn warm() {
    LazyLock::force(&CATALOG);
}
