// ABOUTME: Six-stage vision pipeline orchestrator — quality gate through composition/posture assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vision pipeline runs six stages in sequence against one uploaded
//! image: quality gate, segmentation, pose detection, anthropometric
//! scaling, body-composition/posture estimation, and assembly into a
//! [`visionfit_core::models::VisionRecord`]. Segmentation failure is
//! advisory (§4.3 Stage 2); every other stage failure is terminal for the
//! task.

pub mod anthro;
pub mod composition;
pub mod pose;
pub mod quality;
pub mod segmentation;

use std::sync::Arc;

use chrono::Utc;
use image::DynamicImage;
use tracing::{debug, warn};
use visionfit_core::errors::{AppError, ErrorKind};
use visionfit_core::models::{Sex, VisionRecord, VISION_RECORD_SCHEMA_VERSION};

use crate::config::{AnthroRatios, PipelineConfig};
use pose::PoseLandmarker;
use segmentation::{SegmentationModel, ThresholdSegmenter};

/// A vision task failed after Stage 1 passed; carries the terminal error
/// plus a [`VisionRecord::fallback`] for display purposes only. Callers
/// must not feed this fallback record into plan synthesis (§4.3 "failure
/// semantics": `ProcessingFailed`'s attached record is informational, not
/// an input).
#[derive(Debug, Clone)]
pub struct VisionFailure {
    /// The terminal error (`low_quality`, `pose_detection_failed`, or
    /// `processing_failed`).
    pub error: AppError,
    /// A display-only fallback record; never pass this to plan synthesis.
    pub fallback: VisionRecord,
}

/// The vision pipeline. Holds the two pluggable ML collaborators
/// ([`segmentation::SegmentationModel`], [`pose::PoseLandmarker`]) behind
/// trait objects so a real backend can be wired in without touching this
/// orchestration.
pub struct VisionPipeline {
    segmenter: Arc<dyn SegmentationModel>,
    pose_landmarker: Arc<dyn PoseLandmarker>,
}

impl VisionPipeline {
    /// Construct a pipeline from explicit collaborators.
    #[must_use]
    pub fn new(segmenter: Arc<dyn SegmentationModel>, pose_landmarker: Arc<dyn PoseLandmarker>) -> Self {
        Self {
            segmenter,
            pose_landmarker,
        }
    }

    /// Run all six stages against `image_bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`VisionFailure`] if the quality gate fails (`LowQuality`),
    /// no pose is detected (`PoseDetectionFailed`), or any later stage
    /// cannot produce a usable result (`ProcessingFailed`).
    pub fn run(
        &self,
        image_bytes: &[u8],
        user_height_cm: f64,
        user_sex: Sex,
        config: &PipelineConfig,
        anthro_ratios: AnthroRatios,
    ) -> Result<VisionRecord, VisionFailure> {
        let now = Utc::now();

        let image = image::load_from_memory(image_bytes).map_err(|e| {
            warn!(error = %e, "failed to decode uploaded image");
            VisionFailure {
                error: AppError::with_message(ErrorKind::ProcessingFailed, "The uploaded file is not a readable image."),
                fallback: VisionRecord::fallback(0.0, now),
            }
        })?;

        let quality_report = quality::assess_quality(&image, config);
        debug!(score = quality_report.score, "stage 1: quality assessed");
        if quality_report.score < config.min_image_quality {
            return Err(VisionFailure {
                error: AppError::new(ErrorKind::LowQuality),
                fallback: VisionRecord::fallback(quality_report.score, now),
            });
        }

        let scaled_image = quality::downscale_if_needed(&image);

        let mask = self.segmenter.segment(&scaled_image).unwrap_or_else(|error| {
            warn!(%error, "stage 2: segmentation failed, proceeding unmasked");
            ThresholdSegmenter.segment(&scaled_image).unwrap_or_else(|fallback_error| {
                warn!(error = %fallback_error, "stage 2: fallback segmenter also failed");
                segmentation::blank_mask(&scaled_image)
            })
        });
        debug!(foreground_fraction = mask.foreground_fraction(), "stage 2: segmented");

        let landmarks = self
            .pose_landmarker
            .detect(&scaled_image, config.min_detection_confidence)
            .ok_or_else(|| VisionFailure {
                error: AppError::new(ErrorKind::PoseDetectionFailed),
                fallback: VisionRecord::fallback(quality_report.score, now),
            })?;
        debug!(mean_visibility = landmarks.mean_visibility(), "stage 3: pose detected");

        let (width, height) = (scaled_image.width(), scaled_image.height());
        let anthro = anthro::scale_to_cm(&landmarks, width, height, user_height_cm, anthro_ratios).ok_or_else(|| {
            warn!("stage 4: anthropometric scaling collapsed (degenerate body-height estimate)");
            VisionFailure {
                error: AppError::with_message(
                    ErrorKind::ProcessingFailed,
                    "Could not establish a scale from the detected pose.",
                ),
                fallback: VisionRecord::fallback(quality_report.score, now),
            }
        })?;
        debug!(shoulder_cm = anthro.shoulder_cm, hip_cm = anthro.hip_cm, "stage 4: scaled to cm");

        let estimate = composition::estimate_composition(user_sex, &anthro, user_height_cm, &mask);
        let pose_alerts = composition::detect_posture_alerts(&landmarks);
        debug!(
            bf_estimate = estimate.bf_estimate,
            confidence = ?estimate.confidence,
            alert_count = pose_alerts.len(),
            "stage 5: composition and posture estimated"
        );

        Ok(VisionRecord {
            quality: quality_report.score,
            bf_estimate: estimate.bf_estimate,
            anthro,
            pose_alerts,
            confidence: estimate.confidence,
            analyzed_at: now,
            schema_version: VISION_RECORD_SCHEMA_VERSION,
        })
    }
}

/// A pipeline wired with the deterministic reference collaborators
/// ([`segmentation::ThresholdSegmenter`], [`pose::DeterministicPoseLandmarker`]).
/// Usable standalone and as the default when no real ML backend is
/// configured.
#[must_use]
pub fn reference_pipeline() -> VisionPipeline {
    VisionPipeline::new(
        Arc::new(ThresholdSegmenter),
        Arc::new(pose::DeterministicPoseLandmarker),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encode_jpeg(width: u32, height: u32, value: u8) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value, value, value])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn unreadable_bytes_are_processing_failed() {
        let pipeline = reference_pipeline();
        let result = pipeline.run(b"not an image", 180.0, Sex::Male, &PipelineConfig::default(), AnthroRatios::default());
        assert!(matches!(result.unwrap_err().error.kind, ErrorKind::ProcessingFailed));
    }

    #[test]
    fn very_dark_image_fails_the_quality_gate() {
        let pipeline = reference_pipeline();
        let bytes = encode_jpeg(512, 1024, 5);
        let result = pipeline.run(&bytes, 180.0, Sex::Male, &PipelineConfig::default(), AnthroRatios::default());
        assert!(matches!(result.unwrap_err().error.kind, ErrorKind::LowQuality));
    }

    #[test]
    fn clean_image_produces_a_complete_vision_record() {
        let pipeline = reference_pipeline();
        let bytes = encode_jpeg(512, 1024, 140);
        let record = pipeline
            .run(&bytes, 180.0, Sex::Male, &PipelineConfig::default(), AnthroRatios::default())
            .unwrap();
        assert!(record.quality >= PipelineConfig::default().min_image_quality);
        assert!(record.bf_estimate >= 3.0 && record.bf_estimate <= 60.0);
        assert_eq!(record.schema_version, VISION_RECORD_SCHEMA_VERSION);
    }

    #[test]
    fn tiny_image_fails_pose_detection() {
        let pipeline = reference_pipeline();
        // large enough to pass quality downscale logic but still below the
        // landmarker's minimum usable pixel area
        let bytes = encode_jpeg(32, 32, 140);
        let result = pipeline.run(&bytes, 180.0, Sex::Male, &PipelineConfig::default(), AnthroRatios::default());
        assert!(matches!(
            result.unwrap_err().error.kind,
            ErrorKind::PoseDetectionFailed | ErrorKind::LowQuality
        ));
    }
}
