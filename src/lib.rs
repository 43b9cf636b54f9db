// ABOUTME: Library entry point for visionfit_server
// ABOUTME: Wires the vision pipeline, work queue, contract validator, plan synthesizer, and safety audit together
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # VisionFit Server
//!
//! The compute core behind a photo-driven training and nutrition product.
//! An inbound request enqueues a [`queue::VisionTask`] onto the
//! [`queue::VisionQueue`]; a [`queue::VisionWorker`] drains it, runs the
//! [`vision`] pipeline, and publishes a [`visionfit_core::models::VisionRecord`].
//! The caller then passes `(profile, wizard, vision)` through
//! [`contract::validate`] into [`plan::PlanSynthesizer`], runs
//! [`safety::SafetyValidator`]'s post-hoc audit, and projects the result
//! through [`formatter::ResponseFormatter`].
//!
//! HTTP routing, authentication, persistence, and PDF rendering are
//! out of scope for this crate — see `collaborators` for the stated
//! interfaces a surrounding service is expected to implement.

/// Typed configuration for the pipeline and safety limits, loaded from
/// environment variables with defaults matching §6's configuration table.
pub mod config;
/// External collaborator interfaces this crate depends on but does not
/// implement: plan/vision persistence, image storage, auth passthrough.
pub mod collaborators;
/// Data contract validation: shape/range checks plus kid-safe routing.
pub mod contract;
/// Mechanical projection of an internal `Plan` into the external wire format.
pub mod formatter;
/// Structured logging setup built on `tracing`/`tracing-subscriber`.
pub mod logging;
/// The deterministic four-week plan synthesizer.
pub mod plan;
/// The in-process vision work queue decoupling requests from the pipeline.
pub mod queue;
/// Post-hoc safety audit over a generated plan.
pub mod safety;
/// The six-stage image-analysis vision pipeline.
pub mod vision;
