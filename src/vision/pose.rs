// ABOUTME: Stage 3 — full-body keypoint estimation; no landmarks is a terminal PoseDetectionFailed
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use image::{DynamicImage, GenericImageView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A fixed anatomical keypoint set (§4.3 Stage 3: "shoulders, hips, knees,
/// ankles, ears, nose").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Keypoint {
    /// Nose tip.
    Nose,
    /// Left ear.
    LeftEar,
    /// Right ear.
    RightEar,
    /// Left shoulder.
    LeftShoulder,
    /// Right shoulder.
    RightShoulder,
    /// Left hip.
    LeftHip,
    /// Right hip.
    RightHip,
    /// Left knee.
    LeftKnee,
    /// Right knee.
    RightKnee,
    /// Left ankle.
    LeftAnkle,
    /// Right ankle.
    RightAnkle,
}

/// A single landmark: normalized image-space position and a
/// per-landmark detection confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Normalized x in [0, 1], left to right.
    pub x: f64,
    /// Normalized y in [0, 1], top to bottom.
    pub y: f64,
    /// Per-landmark visibility/confidence in [0, 1].
    pub visibility: f64,
}

/// The full detected keypoint set for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks {
    points: BTreeMap<Keypoint, Landmark>,
}

impl Landmarks {
    /// Construct a landmark set directly from a keypoint map. Exposed
    /// crate-wide (rather than only under `cfg(test)`) so sibling modules'
    /// tests can build fixture landmark sets without going through a
    /// [`PoseLandmarker`].
    #[must_use]
    pub(crate) fn from_points(points: BTreeMap<Keypoint, Landmark>) -> Self {
        Self { points }
    }

    /// Look up a keypoint's landmark, if detected.
    #[must_use]
    pub fn get(&self, keypoint: Keypoint) -> Option<Landmark> {
        self.points.get(&keypoint).copied()
    }

    /// Mean visibility across every keypoint, used as the overall
    /// detection-confidence summary.
    #[must_use]
    pub fn mean_visibility(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.points.len() as f64;
        self.points.values().map(|p| p.visibility).sum::<f64>() / count
    }
}

/// The pose estimator is an external ML collaborator; this trait is the
/// seam (mirrors [`crate::vision::segmentation::SegmentationModel`] and the
/// teacher's provider-trait pattern). Returning `None` signals no
/// landmarks were produced, which the pipeline turns into a terminal
/// `pose_detection_failed` (§4.3 Stage 3).
pub trait PoseLandmarker: Send + Sync {
    /// Detect keypoints in `image`. Landmarks below `min_confidence` are
    /// omitted from the returned set entirely rather than included with a
    /// low score, so `Landmarks::get` returning `Some` is always an
    /// actionable detection.
    fn detect(&self, image: &DynamicImage, min_confidence: f64) -> Option<Landmarks>;
}

/// Deterministic reference implementation seeded from the image's own byte
/// content, so repeated runs on the same image produce the same landmarks
/// (Design Notes: "pin seeds" for reproducible tests). Places keypoints at
/// anatomically plausible normalized positions with small seeded jitter;
/// this is a stand-in for a real keypoint model, not an attempt at visual
/// understanding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicPoseLandmarker;

/// Below this pixel area, the reference landmarker treats the image as too
/// small to carry a usable pose and reports no detection.
const MIN_USABLE_PIXELS: u32 = 64 * 64;

impl PoseLandmarker for DeterministicPoseLandmarker {
    fn detect(&self, image: &DynamicImage, min_confidence: f64) -> Option<Landmarks> {
        let (width, height) = image.dimensions();
        if width.saturating_mul(height) < MIN_USABLE_PIXELS {
            return None;
        }

        let seed = seed_from_image(image);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let base_visibility = 0.7 + rng.gen_range(0.0..0.25);
        if base_visibility < min_confidence {
            return None;
        }

        let jitter = |rng: &mut ChaCha8Rng| rng.gen_range(-0.01..0.01);
        let mut points = BTreeMap::new();
        let mut place = |rng: &mut ChaCha8Rng, points: &mut BTreeMap<Keypoint, Landmark>, keypoint: Keypoint, x: f64, y: f64| {
            points.insert(
                keypoint,
                Landmark {
                    x: (x + jitter(rng)).clamp(0.0, 1.0),
                    y: (y + jitter(rng)).clamp(0.0, 1.0),
                    visibility: base_visibility,
                },
            );
        };

        place(&mut rng, &mut points, Keypoint::Nose, 0.50, 0.12);
        place(&mut rng, &mut points, Keypoint::LeftEar, 0.47, 0.10);
        place(&mut rng, &mut points, Keypoint::RightEar, 0.53, 0.10);
        place(&mut rng, &mut points, Keypoint::LeftShoulder, 0.40, 0.25);
        place(&mut rng, &mut points, Keypoint::RightShoulder, 0.60, 0.25);
        place(&mut rng, &mut points, Keypoint::LeftHip, 0.44, 0.55);
        place(&mut rng, &mut points, Keypoint::RightHip, 0.56, 0.55);
        place(&mut rng, &mut points, Keypoint::LeftKnee, 0.44, 0.75);
        place(&mut rng, &mut points, Keypoint::RightKnee, 0.56, 0.75);
        place(&mut rng, &mut points, Keypoint::LeftAnkle, 0.44, 0.95);
        place(&mut rng, &mut points, Keypoint::RightAnkle, 0.56, 0.95);

        Some(Landmarks { points })
    }
}

fn seed_from_image(image: &DynamicImage) -> u64 {
    let bytes = image.to_luma8();
    let mut hasher_state: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes.as_raw() {
        hasher_state ^= u64::from(*byte);
        hasher_state = hasher_state.wrapping_mul(0x0000_0100_0000_01B3);
    }
    hasher_state
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(128, 256, Rgb([100, 120, 140])))
    }

    #[test]
    fn same_image_yields_identical_landmarks() {
        let image = sample_image();
        let first = DeterministicPoseLandmarker.detect(&image, 0.5).unwrap();
        let second = DeterministicPoseLandmarker.detect(&image, 0.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tiny_image_fails_detection() {
        let tiny = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])));
        assert!(DeterministicPoseLandmarker.detect(&tiny, 0.5).is_none());
    }

    #[test]
    fn all_named_keypoints_are_present() {
        let landmarks = DeterministicPoseLandmarker.detect(&sample_image(), 0.5).unwrap();
        assert!(landmarks.get(Keypoint::Nose).is_some());
        assert!(landmarks.get(Keypoint::LeftAnkle).is_some());
        assert!(landmarks.get(Keypoint::RightShoulder).is_some());
    }

    #[test]
    fn visibility_below_floor_rejects_detection() {
        let image = sample_image();
        assert!(DeterministicPoseLandmarker.detect(&image, 0.999).is_none());
    }
}
