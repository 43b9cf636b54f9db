// ABOUTME: Domain model module: profile, wizard inputs, vision record, data contract, plan
// ABOUTME: Every inter-component payload is a closed, validated struct — never a free-form map
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types shared across the vision pipeline, validator, and
//! plan synthesizer. Per the Design Notes, every inter-component payload is
//! a tagged record with ranges, not a loosely-typed dictionary — closed
//! enums for categorical fields, explicit structs for composite ones.

/// Long-lived user identity and preferences (§3 `StaticProfile`).
pub mod profile;
/// Per-plan-generation dynamic input (§3 `WizardInputs`).
pub mod wizard;
/// Output of the vision pipeline (§3 `VisionRecord`).
pub mod vision_record;

/// The validated triple consumed by synthesis (§3 `DataContract`).
pub mod contract;
/// The generated plan artifact (§3 `Plan`).
pub mod plan;
/// The alternate artifact for under-age profiles (§4.5, §8 scenario 6).
pub mod kid_safe;

pub use contract::DataContract;
pub use kid_safe::{KidSafePlan, PlayActivity};
pub use plan::Plan;
pub use profile::{ActivityLevel, DietaryRestriction, Experience, Goal, Sex, StaticProfile};
pub use vision_record::{Anthro, Confidence, PoseAlert, VisionRecord};
pub use wizard::{SmartScaleReadings, WizardInputs};
