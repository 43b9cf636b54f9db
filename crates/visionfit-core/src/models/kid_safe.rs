// ABOUTME: KidSafePlan — the alternate artifact for profiles under the adult age floor
// ABOUTME: Never touches calorie math; play-based activities instead of a training mesocycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single play-based physical activity suggestion for the kid-safe path
/// (§4.5 routing, §8 scenario 6). No sets/reps/load — framed as unstructured
/// active play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayActivity {
    /// Activity name, e.g. `"Tag"` or `"Obstacle course"`.
    pub name: String,
    /// Suggested duration, e.g. `"20-30 min"`.
    pub suggested_duration: String,
    /// Short description of the physical benefit, free of training jargon.
    pub benefit_note: String,
}

/// The artifact produced for a profile whose derived age is below the
/// adult synthesis floor. Carries no calorie or macro numbers (§8 scenario
/// 6: "no calorie numbers").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidSafePlan {
    /// Unique identifier, same id space as [`crate::models::Plan::plan_id`].
    pub plan_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Play-based activity suggestions, in place of a training mesocycle.
    pub activities: Vec<PlayActivity>,
    /// Disclaimer referencing pediatric guidance (§8 scenario 6).
    pub disclaimer: String,
}
