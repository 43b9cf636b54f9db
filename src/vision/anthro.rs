// ABOUTME: Stage 4 — pixel-to-centimeter anthropometric scaling from landmark positions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::constants::vision::anthro_ratios;
use visionfit_core::models::Anthro;

use crate::config::AnthroRatios;
use crate::vision::pose::{Keypoint, Landmarks};

/// Smallest body-height-in-pixels this module will divide by; below this,
/// the landmark set is too degenerate to scale meaningfully and a caller
/// should treat the result as unreliable (the pipeline's outer `run()`
/// converts such cases to `ProcessingFailed` — see §4.3 "failure
/// semantics").
const MIN_BODY_HEIGHT_PX: f64 = 1.0;

/// Project normalized landmark positions to centimeter anthropometric
/// measurements (§4.3 Stage 4).
///
/// `cmPerPixel = userHeightCm / bodyHeightPx`, where `bodyHeightPx` is the
/// pixel distance from the nose/ear midpoint to the ankle midpoint. Waist,
/// chest, neck, thigh, and arm are all ratio-derived from shoulder or hip
/// width, never independently measured (Design Notes §9 Open Question:
/// preserved as point estimates).
///
/// Returns `None` if the body-height estimate collapses to (near) zero —
/// e.g. degenerate landmark placement — since no scale factor can be
/// derived.
#[must_use]
pub fn scale_to_cm(
    landmarks: &Landmarks,
    image_width: u32,
    image_height: u32,
    user_height_cm: f64,
    ratios: AnthroRatios,
) -> Option<Anthro> {
    let left_shoulder = landmarks.get(Keypoint::LeftShoulder)?;
    let right_shoulder = landmarks.get(Keypoint::RightShoulder)?;
    let left_hip = landmarks.get(Keypoint::LeftHip)?;
    let right_hip = landmarks.get(Keypoint::RightHip)?;
    let left_ankle = landmarks.get(Keypoint::LeftAnkle)?;
    let right_ankle = landmarks.get(Keypoint::RightAnkle)?;
    let nose = landmarks.get(Keypoint::Nose)?;

    let width = f64::from(image_width);
    let height = f64::from(image_height);

    let shoulder_width_px = (left_shoulder.x - right_shoulder.x).abs() * width;
    let hip_width_px = (left_hip.x - right_hip.x).abs() * width;
    let ankle_mid_y = (left_ankle.y + right_ankle.y) / 2.0;
    let body_height_px = (ankle_mid_y - nose.y).abs() * height;

    if body_height_px < MIN_BODY_HEIGHT_PX {
        return None;
    }

    let cm_per_pixel = user_height_cm / body_height_px;
    let shoulder_cm = shoulder_width_px * cm_per_pixel;
    let hip_cm = hip_width_px * cm_per_pixel;

    Some(Anthro {
        shoulder_cm: round_1dp(shoulder_cm),
        hip_cm: round_1dp(hip_cm),
        waist_cm: round_1dp(shoulder_cm * ratios.waist_of_shoulder),
        chest_cm: round_1dp(shoulder_cm * anthro_ratios::CHEST_OF_SHOULDER),
        neck_cm: round_1dp(shoulder_cm * ratios.neck_of_shoulder),
        thigh_cm: round_1dp(hip_cm * anthro_ratios::THIGH_OF_HIP),
        arm_cm: round_1dp(shoulder_cm * anthro_ratios::ARM_OF_SHOULDER),
    })
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    use crate::vision::pose::{DeterministicPoseLandmarker, PoseLandmarker};

    #[test]
    fn every_emitted_field_is_positive_for_a_typical_subject() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(512, 1024, Rgb([100, 100, 100])));
        let landmarks = DeterministicPoseLandmarker.detect(&image, 0.5).unwrap();
        let anthro = scale_to_cm(&landmarks, 512, 1024, 180.0, AnthroRatios::default()).unwrap();

        assert!(anthro.shoulder_cm > 0.0);
        assert!(anthro.hip_cm > 0.0);
        assert!(anthro.waist_cm > 0.0);
        assert!(anthro.chest_cm > 0.0);
        assert!(anthro.neck_cm > 0.0);
        assert!(anthro.thigh_cm > 0.0);
        assert!(anthro.arm_cm > 0.0);
    }

    #[test]
    fn waist_is_shoulder_times_configured_ratio() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(512, 1024, Rgb([100, 100, 100])));
        let landmarks = DeterministicPoseLandmarker.detect(&image, 0.5).unwrap();
        let ratios = AnthroRatios::default();
        let anthro = scale_to_cm(&landmarks, 512, 1024, 180.0, ratios).unwrap();
        let expected = round_1dp(anthro.shoulder_cm * ratios.waist_of_shoulder);
        assert!((anthro.waist_cm - expected).abs() < 0.15);
    }
}
