// ABOUTME: Typed configuration loaded from environment variables with defaults matching the spec's configuration table
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration structs covering every row of the external configuration
//! table: the vision pipeline's tunables and the safety validator's fixed
//! limits. Loaded via `std::env` with typed defaults, the way
//! `ServerConfig::from_env` loads the teacher's server configuration.

use std::env;

use anyhow::{Context, Result};
use visionfit_core::constants::{safety, vision};

/// Per-axis anthropometric ratio table (§6 `anthroRatios`). Only the three
/// operator-tunable ratios are exposed; chest/thigh/arm remain fixed
/// internal constants per §4.3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnthroRatios {
    /// waist = shoulder width * this ratio.
    pub waist_of_shoulder: f64,
    /// hip = shoulder width * this ratio.
    pub hip_of_shoulder: f64,
    /// neck = shoulder width * this ratio.
    pub neck_of_shoulder: f64,
}

impl Default for AnthroRatios {
    fn default() -> Self {
        Self {
            waist_of_shoulder: vision::anthro_ratios::WAIST_OF_SHOULDER,
            hip_of_shoulder: vision::anthro_ratios::HIP_OF_SHOULDER,
            neck_of_shoulder: vision::anthro_ratios::NECK_OF_SHOULDER,
        }
    }
}

/// Tunables recognized by the vision pipeline (§6 configuration table).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Quality gate pass threshold.
    pub min_image_quality: f64,
    /// Pose-estimator confidence floor.
    pub min_detection_confidence: f64,
    /// Normalization constant for Laplacian-variance blur scoring.
    pub blur_threshold: f64,
    /// Synchronous-await bound, in seconds, for `await_result`.
    pub vision_processing_timeout_secs: u64,
    /// Number of worker tasks to run concurrently.
    pub worker_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_image_quality: vision::DEFAULT_MIN_IMAGE_QUALITY,
            min_detection_confidence: vision::DEFAULT_MIN_DETECTION_CONFIDENCE,
            blur_threshold: vision::DEFAULT_BLUR_THRESHOLD,
            vision_processing_timeout_secs: vision::DEFAULT_PROCESSING_TIMEOUT_SECS,
            worker_concurrency: 1,
        }
    }
}

impl PipelineConfig {
    /// Load from environment variables, falling back to spec defaults for
    /// anything unset or unparsable.
    ///
    /// # Errors
    ///
    /// Returns an error only if a set environment variable cannot be parsed
    /// as the expected numeric type.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            min_image_quality: parse_env_or("MIN_IMAGE_QUALITY", defaults.min_image_quality)?,
            min_detection_confidence: parse_env_or(
                "MIN_DETECTION_CONFIDENCE",
                defaults.min_detection_confidence,
            )?,
            blur_threshold: parse_env_or("BLUR_THRESHOLD", defaults.blur_threshold)?,
            vision_processing_timeout_secs: parse_env_or(
                "VISION_PROCESSING_TIMEOUT_SECS",
                defaults.vision_processing_timeout_secs,
            )?,
            worker_concurrency: parse_env_or("WORKER_CONCURRENCY", defaults.worker_concurrency)?,
        })
    }
}

/// Fixed limits enforced by the post-hoc safety audit (§4.7, §6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyLimitsConfig {
    /// Minimum daily kilocalories, male.
    pub min_calories_male_kcal: f64,
    /// Minimum daily kilocalories, female.
    pub min_calories_female_kcal: f64,
    /// Maximum allowed |deficit| as a fraction of TDEE.
    pub max_calorie_deficit_fraction: f64,
    /// Minimum protein per kilogram of body weight.
    pub min_protein_per_kg: f64,
}

impl Default for SafetyLimitsConfig {
    fn default() -> Self {
        Self {
            min_calories_male_kcal: safety::MIN_CALORIES_MALE_KCAL,
            min_calories_female_kcal: safety::MIN_CALORIES_FEMALE_KCAL,
            max_calorie_deficit_fraction: safety::MAX_CALORIE_DEFICIT_FRACTION,
            min_protein_per_kg: safety::MIN_PROTEIN_PER_KG,
        }
    }
}

impl SafetyLimitsConfig {
    /// Load from environment variables, falling back to spec defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if a set environment variable cannot be parsed
    /// as the expected numeric type.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            min_calories_male_kcal: parse_env_or(
                "MIN_CALORIES_MALE_KCAL",
                defaults.min_calories_male_kcal,
            )?,
            min_calories_female_kcal: parse_env_or(
                "MIN_CALORIES_FEMALE_KCAL",
                defaults.min_calories_female_kcal,
            )?,
            max_calorie_deficit_fraction: parse_env_or(
                "MAX_CALORIE_DEFICIT",
                defaults.max_calorie_deficit_fraction,
            )?,
            min_protein_per_kg: parse_env_or("MIN_PROTEIN_PER_KG", defaults.min_protein_per_kg)?,
        })
    }
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_defaults_match_spec_table() {
        let config = PipelineConfig::default();
        assert!((config.min_image_quality - 0.70).abs() < f64::EPSILON);
        assert!((config.min_detection_confidence - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.vision_processing_timeout_secs, 60);
    }

    #[test]
    fn safety_defaults_match_spec_table() {
        let config = SafetyLimitsConfig::default();
        assert!((config.min_calories_male_kcal - 1500.0).abs() < f64::EPSILON);
        assert!((config.min_calories_female_kcal - 1200.0).abs() < f64::EPSILON);
    }
}
