// ABOUTME: Stage 5 — three-estimator body-composition blend plus posture-alert detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use visionfit_core::constants::vision::{bf_blend_weights, posture, ratio_bucket, silhouette_baseline, BF_ESTIMATE_RANGE};
use visionfit_core::measurement::navy_bodyfat::navy_body_fat_pct;
use visionfit_core::models::{Anthro, Confidence, PoseAlert, Sex};

use crate::vision::pose::{Keypoint, Landmarks};
use crate::vision::segmentation::SegmentationMask;

/// Output of Stage 5's body-composition estimation: the blended estimate,
/// its confidence tier, and the three contributing point estimates kept
/// for observability/debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionEstimate {
    /// Blended body-fat percentage, in [3, 60].
    pub bf_estimate: f64,
    /// Confidence tier derived from estimator disagreement.
    pub confidence: Confidence,
    /// The Navy-formula point estimate.
    pub navy_pct: f64,
    /// The silhouette edge-density point estimate.
    pub silhouette_pct: f64,
    /// The waist/hip-ratio bucket point estimate.
    pub ratio_pct: f64,
}

/// Combine the three independent body-fat estimators with weights
/// (0.5, 0.3, 0.2) and derive a confidence tier from their maximum
/// pairwise deviation (§4.3 Stage 5).
///
/// `user_height_cm` is the user's declared height — the same value Stage 4
/// used to derive `cmPerPixel`, so it is the cm-space body height the Navy
/// formula needs, not a value reconstructed from `anthro`.
#[must_use]
pub fn estimate_composition(sex: Sex, anthro: &Anthro, user_height_cm: f64, mask: &SegmentationMask) -> CompositionEstimate {
    let navy = navy_body_fat_pct(sex, anthro.waist_cm, anthro.neck_cm, user_height_cm, anthro.hip_cm);

    let edge_density = edge_density_proxy(mask);
    let silhouette_pct = silhouette_estimate(sex, edge_density);

    let whr = anthro.waist_cm / anthro.hip_cm;
    let ratio_pct = ratio_bucket_estimate(sex, whr);

    let blended = bf_blend_weights::NAVY * navy.pct
        + bf_blend_weights::SILHOUETTE * silhouette_pct
        + bf_blend_weights::RATIO * ratio_pct;

    let max_pairwise_deviation = [
        (navy.pct - silhouette_pct).abs(),
        (navy.pct - ratio_pct).abs(),
        (silhouette_pct - ratio_pct).abs(),
    ]
    .into_iter()
    .fold(0.0_f64, f64::max);

    let confidence = if navy.used_fallback {
        Confidence::Low
    } else if max_pairwise_deviation < visionfit_core::constants::confidence::HIGH_MAX_DEVIATION_PP {
        Confidence::High
    } else if max_pairwise_deviation < visionfit_core::constants::confidence::MEDIUM_MAX_DEVIATION_PP {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    CompositionEstimate {
        bf_estimate: blended.clamp(BF_ESTIMATE_RANGE.0, BF_ESTIMATE_RANGE.1),
        confidence,
        navy_pct: navy.pct,
        silhouette_pct,
        ratio_pct,
    }
}

fn silhouette_estimate(sex: Sex, edge_density: f64) -> f64 {
    let baseline = match sex {
        Sex::Male => silhouette_baseline::MALE_PCT,
        Sex::Female | Sex::NonBinary => silhouette_baseline::FEMALE_PCT,
    };
    let deviation = silhouette_baseline::REFERENCE_EDGE_DENSITY - edge_density;
    (baseline + deviation * silhouette_baseline::EDGE_DENSITY_SENSITIVITY).clamp(BF_ESTIMATE_RANGE.0, BF_ESTIMATE_RANGE.1)
}

fn ratio_bucket_estimate(sex: Sex, whr: f64) -> f64 {
    let (buckets, catchall) = match sex {
        Sex::Male => (ratio_bucket::MALE_BUCKETS, ratio_bucket::MALE_CATCHALL_PCT),
        Sex::Female | Sex::NonBinary => (ratio_bucket::FEMALE_BUCKETS, ratio_bucket::FEMALE_CATCHALL_PCT),
    };
    buckets
        .iter()
        .find(|(upper_bound, _)| whr < *upper_bound)
        .map_or(catchall, |(_, pct)| *pct)
}

/// Edge density over the masked foreground region: the fraction of
/// foreground pixels whose 4-neighborhood mask value disagrees with their
/// own (a cheap proxy for silhouette boundary complexity — a leaner,
/// more-defined subject produces a higher-frequency mask boundary than a
/// smoother one).
fn edge_density_proxy(mask: &SegmentationMask) -> f64 {
    let (width, height) = mask.dimensions();
    if width < 2 || height < 2 {
        return 0.0;
    }

    let mut edge_count = 0u64;
    let mut foreground_count = 0u64;
    for y in 0..height {
        for x in 0..width {
            if !mask.is_foreground(x, y) {
                continue;
            }
            foreground_count += 1;
            let right_disagrees = x + 1 < width && !mask.is_foreground(x + 1, y);
            let down_disagrees = y + 1 < height && !mask.is_foreground(x, y + 1);
            if right_disagrees || down_disagrees {
                edge_count += 1;
            }
        }
    }

    if foreground_count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let (edge_count, foreground_count) = (edge_count as f64, foreground_count as f64);
    edge_count / foreground_count
}

/// Run all five posture-deviation tests over a landmark set (§4.3
/// "Posture detection"), returning the sorted, deduplicated set of alerts
/// that fired. Landmarks missing any keypoint a given test needs simply
/// skip that test rather than panicking.
#[must_use]
pub fn detect_posture_alerts(landmarks: &Landmarks) -> BTreeSet<PoseAlert> {
    let mut alerts = BTreeSet::new();

    if let (Some(left_shoulder), Some(right_shoulder), Some(left_ear), Some(right_ear)) = (
        landmarks.get(Keypoint::LeftShoulder),
        landmarks.get(Keypoint::RightShoulder),
        landmarks.get(Keypoint::LeftEar),
        landmarks.get(Keypoint::RightEar),
    ) {
        let mean_shoulder_y = (left_shoulder.y + right_shoulder.y) / 2.0;
        let mean_ear_y = (left_ear.y + right_ear.y) / 2.0;
        if mean_shoulder_y < mean_ear_y - posture::ROUNDED_SHOULDERS_Y_DELTA {
            alerts.insert(PoseAlert::RoundedShoulders);
        }

        if (left_shoulder.y - right_shoulder.y).abs() > posture::ASYMMETRIC_SHOULDERS_Y_DELTA {
            alerts.insert(PoseAlert::AsymmetricShoulders);
        }
    }

    if let (Some(nose), Some(left_shoulder), Some(right_shoulder)) = (
        landmarks.get(Keypoint::Nose),
        landmarks.get(Keypoint::LeftShoulder),
        landmarks.get(Keypoint::RightShoulder),
    ) {
        let mean_shoulder_x = (left_shoulder.x + right_shoulder.x) / 2.0;
        if nose.x - mean_shoulder_x > posture::FORWARD_HEAD_X_DELTA {
            alerts.insert(PoseAlert::ForwardHead);
        }
    }

    if let (Some(left_hip), Some(right_hip), Some(left_shoulder), Some(right_shoulder)) = (
        landmarks.get(Keypoint::LeftHip),
        landmarks.get(Keypoint::RightHip),
        landmarks.get(Keypoint::LeftShoulder),
        landmarks.get(Keypoint::RightShoulder),
    ) {
        let mean_hip_y = (left_hip.y + right_hip.y) / 2.0;
        let mean_shoulder_y = (left_shoulder.y + right_shoulder.y) / 2.0;
        if mean_hip_y < mean_shoulder_y - posture::ANTERIOR_PELVIC_TILT_Y_DELTA {
            alerts.insert(PoseAlert::AnteriorPelvicTilt);
        }
    }

    if let (Some(left_knee), Some(right_knee), Some(left_ankle), Some(right_ankle)) = (
        landmarks.get(Keypoint::LeftKnee),
        landmarks.get(Keypoint::RightKnee),
        landmarks.get(Keypoint::LeftAnkle),
        landmarks.get(Keypoint::RightAnkle),
    ) {
        let knee_separation = (left_knee.x - right_knee.x).abs();
        let ankle_separation = (left_ankle.x - right_ankle.x).abs();
        if ankle_separation - knee_separation > posture::KNEE_VALGUS_X_DELTA {
            alerts.insert(PoseAlert::KneeValgus);
        }
    }

    alerts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::vision::pose::{DeterministicPoseLandmarker, PoseLandmarker};
    use crate::vision::segmentation::{SegmentationModel, ThresholdSegmenter};
    use image::{DynamicImage, Rgb, RgbImage};

    fn sample_anthro() -> Anthro {
        Anthro {
            shoulder_cm: 45.0,
            hip_cm: 90.0,
            waist_cm: 80.0,
            chest_cm: 95.0,
            neck_cm: 38.0,
            thigh_cm: 55.0,
            arm_cm: 30.0,
        }
    }

    #[test]
    fn bf_estimate_is_always_within_range() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(128, 256, Rgb([120, 100, 90])));
        let mask = ThresholdSegmenter.segment(&image).unwrap();
        let estimate = estimate_composition(Sex::Male, &sample_anthro(), 180.0, &mask);
        assert!(estimate.bf_estimate >= 3.0 && estimate.bf_estimate <= 60.0);
    }

    #[test]
    fn navy_domain_error_forces_low_confidence() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([100, 100, 100])));
        let mask = ThresholdSegmenter.segment(&image).unwrap();
        let mut anthro = sample_anthro();
        anthro.waist_cm = anthro.neck_cm; // forces Navy domain error for male
        let estimate = estimate_composition(Sex::Male, &anthro, 180.0, &mask);
        assert_eq!(estimate.confidence, Confidence::Low);
    }

    #[test]
    fn clean_landmarks_produce_no_posture_alerts() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(128, 256, Rgb([100, 100, 100])));
        let landmarks = DeterministicPoseLandmarker.detect(&image, 0.5).unwrap();
        let alerts = detect_posture_alerts(&landmarks);
        assert!(alerts.is_empty(), "unexpected alerts: {alerts:?}");
    }

    #[test]
    fn forward_head_fires_when_nose_is_well_ahead_of_shoulders() {
        use crate::vision::pose::Landmark;
        use std::collections::BTreeMap;
        let mut points = BTreeMap::new();
        points.insert(Keypoint::Nose, Landmark { x: 0.70, y: 0.12, visibility: 0.9 });
        points.insert(Keypoint::LeftShoulder, Landmark { x: 0.40, y: 0.25, visibility: 0.9 });
        points.insert(Keypoint::RightShoulder, Landmark { x: 0.60, y: 0.25, visibility: 0.9 });
        let landmarks = test_landmarks(points);
        let alerts = detect_posture_alerts(&landmarks);
        assert!(alerts.contains(&PoseAlert::ForwardHead));
    }

    fn test_landmarks(points: std::collections::BTreeMap<Keypoint, crate::vision::pose::Landmark>) -> Landmarks {
        Landmarks::from_points(points)
    }
}
