// ABOUTME: Library entry point for visionfit-core
// ABOUTME: Shared domain types, error taxonomy, measurement algebra, and exercise catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # VisionFit Core
//!
//! Foundation crate for the VisionFit plan engine: the domain model shared
//! between the vision pipeline and the plan synthesizer (`models`), the
//! error taxonomy (`errors`), numeric defaults (`constants`), the pure
//! [`measurement`] algebra (BMR/TDEE/body-fat/macros/progression), and the
//! static [`catalog`] of reference exercises.
//!
//! Nothing in this crate performs I/O or holds async state; it is the layer
//! both `visionfit_server`'s vision pipeline and plan synthesizer depend on.

/// Static exercise reference data and injury/equipment exclusion tables
pub mod catalog;
/// Numeric defaults referenced by the measurement algebra and safety limits
pub mod constants;
/// Centralized error taxonomy shared by every stage of the system
pub mod errors;
/// Pure numeric functions: BMR, TDEE, Navy body-fat, macro split, progression
pub mod measurement;
/// Domain model: profile, wizard inputs, vision record, data contract, plan
pub mod models;

pub use errors::{AppError, ErrorKind};
