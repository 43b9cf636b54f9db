// ABOUTME: WizardInputs — per-plan-generation dynamic data, immutable once submitted
// ABOUTME: Created per plan; carries the photo reference, anthropometrics, and injury/equipment context
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// Optional smart-scale readings supplied alongside the photo (§3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SmartScaleReadings {
    /// Body-fat percentage, in [3, 60].
    pub body_fat_pct: Option<f64>,
    /// Muscle percentage, in [20, 70].
    pub muscle_pct: Option<f64>,
    /// Visceral-fat score, in [1, 30].
    pub visceral_fat_score: Option<f64>,
}

/// Per-plan-generation dynamic data. Created per plan, immutable once
/// submitted (§3 `WizardInputs`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardInputs {
    /// Reference to the uploaded photo (opaque to this type; resolved by
    /// the external `ImageStore` collaborator).
    pub photo_reference: String,
    /// Height in centimeters, in [100, 230].
    pub height_cm: f64,
    /// Weight in kilograms, in [30, 300].
    pub weight_kg: f64,
    /// Optional smart-scale readings.
    pub smart_scale: SmartScaleReadings,
    /// Free-text injury tokens (e.g. `"left knee pain"`).
    pub injuries: Vec<String>,
    /// Free-text equipment-limitation tokens (e.g. `"no barbell"`).
    pub equipment_limits: Vec<String>,
    /// Free-text user comment, at most 500 characters.
    pub user_comment: String,
    /// Most recently reported reps-in-reserve from the prior week, used by
    /// the progression rule (§4.1). `None` on a user's first plan.
    pub reported_rir: Option<u8>,
}

impl WizardInputs {
    /// True if `token` (case-insensitively) appears among the declared
    /// equipment limitations.
    #[must_use]
    pub fn has_equipment_limit(&self, token: &str) -> bool {
        self.equipment_limits
            .iter()
            .any(|t| t.eq_ignore_ascii_case(token))
    }

    /// True if any declared injury token contains `needle` (case-insensitive
    /// substring match — injury free text is not a closed vocabulary, so
    /// exact equality would miss e.g. `"left knee pain"` matching `"knee"`).
    #[must_use]
    pub fn mentions_injury(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.injuries
            .iter()
            .any(|t| t.to_ascii_lowercase().contains(&needle))
    }
}
