// ABOUTME: Week-over-week training volume progression and RIR-adjusted rep targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progressive overload across the four-week mesocycle (§4.1, §4.6).

use crate::constants::progression as c;
use crate::models::Experience;

/// Volume multiplier for a given mesocycle week and experience tier (§4.1).
///
/// Week 1 is always baseline (`1.00`). Weeks 2-3 scale up `1.05`/`1.10`
/// regardless of experience. Week 4 deloads to `0.80` for intermediate and
/// advanced trainees, but repeats week 1 (`1.00`, no deload) for beginners,
/// who have not yet accumulated fatigue worth shedding.
#[must_use]
pub fn week_volume_multiplier(week: u32, experience: Experience) -> f64 {
    match week {
        1 => 1.0,
        2 => c::WEEK_2_MULTIPLIER,
        3 => c::WEEK_3_MULTIPLIER,
        4 => match experience {
            Experience::Beginner => c::WEEK_4_BEGINNER_MULTIPLIER,
            Experience::Intermediate | Experience::Advanced => c::WEEK_4_DELOAD_MULTIPLIER,
        },
        _ => 1.0,
    }
}

/// Adjust a baseline rep count upward when the user reported a low
/// Reps-in-Reserve (RIR) last session, signaling the prescribed load has
/// become too easy (§4.1).
///
/// At or below [`crate::constants::progression::RIR_INCREASE_THRESHOLD`],
/// reps increase by 5%, rounded to the nearest whole rep. Above the
/// threshold, the baseline is returned unchanged.
#[must_use]
pub fn rir_adjusted_reps(baseline_reps: u32, reported_rir: u8) -> u32 {
    if reported_rir <= c::RIR_INCREASE_THRESHOLD {
        let scaled = f64::from(baseline_reps) * (1.0 + c::RIR_REP_INCREASE_FRACTION);
        scaled.round() as u32
    } else {
        baseline_reps
    }
}
