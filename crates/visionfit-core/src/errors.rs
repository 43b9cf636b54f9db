// ABOUTME: Centralized error taxonomy shared by the vision pipeline, validator, and plan synthesizer
// ABOUTME: Every error kind maps to a stable string code and a human sentence; no stack traces cross this boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Error Taxonomy
//!
//! Every error surfaced by this system belongs to one of the kinds below.
//! Kinds are not exception types to be caught ad hoc — each is a distinct,
//! documented contract with its own propagation rule:
//!
//! - [`ErrorKind::InvalidInput`] accumulates every offending field; callers
//!   see the whole list, never just the first failure.
//! - [`ErrorKind::LowQuality`] and [`ErrorKind::PoseDetectionFailed`] are
//!   terminal for a vision task. The caller should prompt a re-upload.
//! - [`ErrorKind::ProcessingFailed`] wraps any other pipeline exception; a
//!   fallback record with confidence `Low` always accompanies it.
//! - [`ErrorKind::TimedOut`] means the synchronous wait elapsed, not that
//!   the task failed — the worker may still complete it.
//! - [`ErrorKind::SafetyViolation`] means the post-hoc audit found an
//!   unfixable issue; no plan is emitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error kind, independent of any transport (HTTP, MCP, CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Shape or range of the data contract was violated.
    InvalidInput,
    /// Vision quality gate failed (`quality < min_image_quality`).
    LowQuality,
    /// The pose estimator produced no landmarks.
    PoseDetectionFailed,
    /// Any other pipeline-stage exception; a fallback record is attached.
    ProcessingFailed,
    /// A synchronous wait exceeded its configured bound.
    TimedOut,
    /// The post-hoc safety audit found an issue it could not repair.
    SafetyViolation,
}

impl ErrorKind {
    /// Stable string code, suitable for serialization on the wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::LowQuality => "low_quality",
            Self::PoseDetectionFailed => "pose_detection_failed",
            Self::ProcessingFailed => "processing_failed",
            Self::TimedOut => "timed_out",
            Self::SafetyViolation => "safety_violation",
        }
    }

    /// Human-readable sentence describing this error kind, used as the
    /// default message when the caller has no more specific text to offer.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidInput => "One or more submitted values were missing or out of range.",
            Self::LowQuality => "The photo quality was too low to analyze. Please retake it in better light.",
            Self::PoseDetectionFailed => {
                "We couldn't detect a full body in the photo. Please stand further back, fully in frame."
            }
            Self::ProcessingFailed => "Something went wrong while analyzing the photo.",
            Self::TimedOut => "The analysis is taking longer than expected. You can check back shortly.",
            Self::SafetyViolation => "The generated plan failed a safety check and was not produced.",
        }
    }
}

/// A single offending field, used to accumulate [`ErrorKind::InvalidInput`]
/// violations instead of short-circuiting on the first one (§4.5: "Errors
/// are accumulated, not short-circuited").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path to the offending field, e.g. `"wizard.heightCm"`.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldViolation {
    /// Construct a new field violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The application-wide error type. Carries a stable [`ErrorKind`], a
/// human-readable message, and — for [`ErrorKind::InvalidInput`] — the full
/// list of offending fields.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// Stable error kind.
    pub kind: ErrorKind,
    /// Human-readable message (never an internal stack trace or type name).
    pub message: String,
    /// Offending fields, populated only for [`ErrorKind::InvalidInput`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl AppError {
    /// Construct an error carrying only a kind's default message.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            violations: Vec::new(),
        }
    }

    /// Construct an error with a custom message.
    #[must_use]
    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Construct an [`ErrorKind::InvalidInput`] error from an accumulated
    /// list of field violations.
    ///
    /// # Panics
    ///
    /// Never panics; an empty `violations` list is accepted (callers are
    /// expected to only invoke this when at least one violation exists).
    #[must_use]
    pub fn invalid_input(violations: Vec<FieldViolation>) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: format!(
                "{} field(s) failed validation",
                violations.len()
            ),
            violations,
        }
    }

    /// The stable string code for this error's kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Convenience alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_codes_are_stable() {
        assert_eq!(ErrorKind::LowQuality.code(), "low_quality");
        assert_eq!(ErrorKind::PoseDetectionFailed.code(), "pose_detection_failed");
        assert_eq!(ErrorKind::SafetyViolation.code(), "safety_violation");
    }

    #[test]
    fn invalid_input_accumulates_all_violations() {
        let err = AppError::invalid_input(vec![
            FieldViolation::new("wizard.heightCm", "must be in [100, 230]"),
            FieldViolation::new("profile.trainingDaysPerWeek", "must be in [1, 7]"),
        ]);
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(err.violations.len(), 2);
    }
}
