// ABOUTME: VisionRecord — the sole output of the vision pipeline, versioned and machine-readable
// ABOUTME: A VisionRecord with quality < 0.70 is rejected upstream and never persisted as valid
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version of the current [`VisionRecord`] shape. Bump when any
/// field is added, removed, or reinterpreted.
pub const VISION_RECORD_SCHEMA_VERSION: u32 = 1;

/// Confidence tier for the body-composition estimate, derived from the
/// maximum pairwise deviation between the three independent estimators
/// (§4.3 Stage 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Maximum pairwise deviation < 3 percentage points.
    High,
    /// Maximum pairwise deviation < 6 percentage points.
    Medium,
    /// Maximum pairwise deviation >= 6 percentage points, or a fallback
    /// path was taken (Navy domain error, pipeline exception).
    Low,
}

/// A named postural deviation detected from landmark positions. This is a
/// closed, sorted enumeration by design (Design Notes §9): adding a
/// variant requires pairing it with a corrective drill list in the plan
/// synthesizer, enforced there by an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseAlert {
    /// Mean shoulder height sits above mean ear height beyond tolerance.
    RoundedShoulders,
    /// Mean hip height sits well below mean shoulder height.
    AnteriorPelvicTilt,
    /// Nose projects forward of the mean shoulder x-position.
    ForwardHead,
    /// Left/right shoulder heights differ beyond tolerance.
    AsymmetricShoulders,
    /// Knees collapse inward relative to ankle/hip alignment.
    KneeValgus,
}

/// Centimeter anthropometric measurements emitted by Stage 4. Every field
/// other than `shoulder_cm` and `hip_cm` is derived from a fixed ratio of
/// shoulder or hip width rather than independently measured (§4.3, §9 Open
/// Question) — treat them as point estimates, not as independently
/// verified circumferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anthro {
    /// Shoulder width, measured directly from landmarks.
    pub shoulder_cm: f64,
    /// Hip width, measured directly from landmarks.
    pub hip_cm: f64,
    /// Waist circumference, derived as `shoulder_cm * 0.75`.
    pub waist_cm: f64,
    /// Chest circumference, derived as `shoulder_cm * 0.85`.
    pub chest_cm: f64,
    /// Neck circumference, derived as `shoulder_cm * 0.35`.
    pub neck_cm: f64,
    /// Thigh circumference, derived as `hip_cm * 0.40`.
    pub thigh_cm: f64,
    /// Upper-arm circumference, derived as `shoulder_cm * 0.30`.
    pub arm_cm: f64,
}

/// Output of the vision pipeline (§3 `VisionRecord`). This is the exclusive
/// interface between the vision pipeline and plan synthesis — nothing
/// upstream of Stage 6 is visible to the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionRecord {
    /// Stage 1 composite quality score, in [0, 1].
    pub quality: f64,
    /// Blended body-fat estimate, in [3, 60].
    pub bf_estimate: f64,
    /// Centimeter anthropometric measurements.
    pub anthro: Anthro,
    /// Detected postural deviations, sorted and deduplicated.
    pub pose_alerts: BTreeSet<PoseAlert>,
    /// Confidence tier for `bf_estimate`.
    pub confidence: Confidence,
    /// UTC timestamp of this analysis.
    pub analyzed_at: DateTime<Utc>,
    /// Schema version, see [`VISION_RECORD_SCHEMA_VERSION`].
    pub schema_version: u32,
}

impl VisionRecord {
    /// Waist-to-hip ratio, derived from [`Anthro::waist_cm`] and
    /// [`Anthro::hip_cm`].
    #[must_use]
    pub fn waist_to_hip_ratio(&self) -> f64 {
        self.anthro.waist_cm / self.anthro.hip_cm
    }

    /// A conservative fallback record for [`crate::errors::ErrorKind::ProcessingFailed`]:
    /// default anthropometrics, confidence [`Confidence::Low`], and the
    /// quality score observed before the failure (or 0.0 if none was
    /// computed).
    #[must_use]
    pub fn fallback(quality: f64, now: DateTime<Utc>) -> Self {
        Self {
            quality,
            bf_estimate: crate::constants::navy_bodyfat::MALE_FALLBACK_PCT,
            anthro: Anthro {
                shoulder_cm: 45.0,
                hip_cm: 95.0,
                waist_cm: 85.0,
                chest_cm: 95.0,
                neck_cm: 38.0,
                thigh_cm: 55.0,
                arm_cm: 30.0,
            },
            pose_alerts: BTreeSet::new(),
            confidence: Confidence::Low,
            analyzed_at: now,
            schema_version: VISION_RECORD_SCHEMA_VERSION,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pose_alerts_are_sorted() {
        let mut alerts = BTreeSet::new();
        alerts.insert(PoseAlert::ForwardHead);
        alerts.insert(PoseAlert::RoundedShoulders);
        let ordered: Vec<_> = alerts.into_iter().collect();
        assert_eq!(ordered, vec![PoseAlert::RoundedShoulders, PoseAlert::ForwardHead]);
    }

    #[test]
    fn waist_to_hip_ratio_is_waist_over_hip() {
        let record = VisionRecord::fallback(0.5, Utc::now());
        let expected = record.anthro.waist_cm / record.anthro.hip_cm;
        assert!((record.waist_to_hip_ratio() - expected).abs() < f64::EPSILON);
    }
}
