// ABOUTME: Pure numeric functions: BMR, TDEE, Navy body-fat, macro split, progression, BMI
// ABOUTME: No I/O, no async, no shared state — same inputs always produce the same outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Measurement Algebra
//!
//! The numeric core of the system (§4.1). Every function here is a pure,
//! side-effect-free transform over scalar inputs, documented with its
//! scientific basis the way `nutrition_calculator`-style modules in the
//! wider fitness-intelligence ecosystem do — short citation, no essay.
//!
//! Everything below this module's boundary works in kilocalories; the
//! single kcal→kJ conversion happens at [`energy::kcal_to_kj`], which is
//! the boundary every caller above the measurement algebra crosses exactly
//! once (Design Notes §9: "kJ in every external surface").

/// BMR, TDEE, and energy unit conversion.
pub mod energy;
/// Macronutrient split and gram conversion.
pub mod macros;
/// Navy circumference body-fat formula.
pub mod navy_bodyfat;
/// Week-over-week progression rule.
pub mod progression;
/// Body-mass index and category classification.
pub mod bmi;

pub use energy::{bmr_kcal, goal_scaled_energy_kcal, kcal_to_kj, kj_to_kcal, tdee_kcal};
pub use macros::{macro_split, MacroGrams};
pub use navy_bodyfat::{navy_body_fat_pct, NavyBodyFatEstimate};
pub use progression::{rir_adjusted_reps, week_volume_multiplier};
pub use bmi::{bmi, bmi_category, BmiCategory};
