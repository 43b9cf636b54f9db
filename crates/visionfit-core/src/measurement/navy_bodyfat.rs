// ABOUTME: US Navy circumference body-fat formula, clamped with a typed fallback on domain error
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navy circumference-based body-fat estimate.
//!
//! # Scientific Reference
//!
//! Hodgdon, J.A., & Beckett, M.B. (1984). Prediction of percent body fat
//! for U.S. Navy men and women from body circumferences and height. Naval
//! Health Research Center, Report No. 84-29/84-11.

use crate::constants::navy_bodyfat as c;
use crate::models::Sex;

/// Outcome of a Navy body-fat computation: either the formula's direct
/// result, or a sex-specific fallback taken because the formula hit a
/// domain error (e.g. `waist <= neck`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavyBodyFatEstimate {
    /// Body-fat percentage, clamped to [3, 50].
    pub pct: f64,
    /// `true` if the sex-specific fallback was used instead of the formula.
    pub used_fallback: bool,
}

/// Navy body-fat estimate from circumferences and height (§4.1).
///
/// `male: 86.010*log10(waist-neck) - 70.041*log10(height) + 36.76`
/// `female: 163.205*log10(waist+hip-neck) - 97.684*log10(height) - 78.387`
///
/// On a domain error (the log argument is non-positive — e.g. `waist <=
/// neck` for a male, or `waist + hip <= neck` for a female), falls back to
/// a sex-specific default (male 15, female 23) and signals `used_fallback`
/// so the caller demotes confidence to `Low` per §4.3.
#[must_use]
pub fn navy_body_fat_pct(sex: Sex, waist_cm: f64, neck_cm: f64, height_cm: f64, hip_cm: f64) -> NavyBodyFatEstimate {
    let raw = match sex {
        Sex::Male => {
            let arg = waist_cm - neck_cm;
            if arg <= 0.0 {
                None
            } else {
                Some(c::MALE_WAIST_NECK_COEFF * arg.log10() - c::MALE_HEIGHT_COEFF * height_cm.log10() + c::MALE_CONST)
            }
        }
        Sex::Female | Sex::NonBinary => {
            let arg = waist_cm + hip_cm - neck_cm;
            if arg <= 0.0 {
                None
            } else {
                Some(
                    c::FEMALE_WAIST_HIP_NECK_COEFF * arg.log10() - c::FEMALE_HEIGHT_COEFF * height_cm.log10()
                        - c::FEMALE_CONST,
                )
            }
        }
    };

    match raw {
        Some(value) => NavyBodyFatEstimate {
            pct: value.clamp(c::MIN_PCT, c::MAX_PCT),
            used_fallback: false,
        },
        None => NavyBodyFatEstimate {
            pct: match sex {
                Sex::Male => c::MALE_FALLBACK_PCT,
                Sex::Female | Sex::NonBinary => c::FEMALE_FALLBACK_PCT,
            },
            used_fallback: true,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn waist_equal_neck_falls_back_male() {
        let estimate = navy_body_fat_pct(Sex::Male, 90.0, 90.0, 180.0, 0.0);
        assert!(estimate.used_fallback);
        assert!((estimate.pct - c::MALE_FALLBACK_PCT).abs() < f64::EPSILON);
    }

    #[test]
    fn waist_equal_neck_falls_back_female() {
        // female domain error requires waist + hip <= neck
        let estimate = navy_body_fat_pct(Sex::Female, 10.0, 100.0, 165.0, 10.0);
        assert!(estimate.used_fallback);
        assert!((estimate.pct - c::FEMALE_FALLBACK_PCT).abs() < f64::EPSILON);
    }

    #[test]
    fn result_is_always_clamped() {
        let estimate = navy_body_fat_pct(Sex::Male, 200.0, 30.0, 180.0, 0.0);
        assert!(estimate.pct <= c::MAX_PCT);
        let estimate_low = navy_body_fat_pct(Sex::Male, 80.5, 79.0, 220.0, 0.0);
        assert!(estimate_low.pct >= c::MIN_PCT);
    }

    #[test]
    fn typical_male_estimate_is_plausible() {
        let estimate = navy_body_fat_pct(Sex::Male, 85.0, 38.0, 180.0, 0.0);
        assert!(!estimate.used_fallback);
        assert!(estimate.pct > 5.0 && estimate.pct < 30.0, "pct = {}", estimate.pct);
    }
}
