// ABOUTME: Training split selection — 3/4/5/6 day templates keyed off trainDays (§4.6 step 3)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::catalog::MuscleGroup;
use MuscleGroup::{Arms, Back, Chest, Core, Legs, Shoulders};

/// One scheduled day's label and targeted muscle groups, before exercises
/// are selected against them.
#[derive(Debug, Clone)]
pub struct DayTemplate {
    /// Day label, e.g. `"Day 1 — Push"`.
    pub label: &'static str,
    /// Muscle groups targeted this day (two or three, per §4.6 step 3).
    pub groups: &'static [MuscleGroup],
}

/// Choose a weekly split template from `train_days` (§4.6 step 3: "3 days →
/// full-body rotation; 4 days → upper/lower; 5 days → body-part split;
/// 6 days → six-way split"). Any value outside `[3, 6]` clamps to the
/// nearest supported template — 1-2 days fall back to the 3-day rotation
/// (truncated to fit), 7 days fall back to the 6-way split plus a repeat.
#[must_use]
pub fn choose_split(train_days: u32) -> Vec<DayTemplate> {
    match train_days {
        0..=3 => THREE_DAY_FULL_BODY.to_vec(),
        4 => FOUR_DAY_UPPER_LOWER.to_vec(),
        5 => FIVE_DAY_BODY_PART.to_vec(),
        _ => SIX_DAY_SPLIT.to_vec(),
    }
}

static THREE_DAY_FULL_BODY: &[DayTemplate] = &[
    DayTemplate { label: "Day 1 — Full Body A", groups: &[Legs, Chest, Back] },
    DayTemplate { label: "Day 2 — Full Body B", groups: &[Shoulders, Arms, Core] },
    DayTemplate { label: "Day 3 — Full Body C", groups: &[Legs, Back, Chest] },
];

static FOUR_DAY_UPPER_LOWER: &[DayTemplate] = &[
    DayTemplate { label: "Day 1 — Upper A", groups: &[Chest, Back, Shoulders] },
    DayTemplate { label: "Day 2 — Lower A", groups: &[Legs, Core] },
    DayTemplate { label: "Day 3 — Upper B", groups: &[Back, Chest, Arms] },
    DayTemplate { label: "Day 4 — Lower B", groups: &[Legs, Core] },
];

static FIVE_DAY_BODY_PART: &[DayTemplate] = &[
    DayTemplate { label: "Day 1 — Chest", groups: &[Chest, Core] },
    DayTemplate { label: "Day 2 — Back", groups: &[Back, Core] },
    DayTemplate { label: "Day 3 — Shoulders", groups: &[Shoulders, Arms] },
    DayTemplate { label: "Day 4 — Legs", groups: &[Legs, Core] },
    DayTemplate { label: "Day 5 — Arms", groups: &[Arms, Chest] },
];

static SIX_DAY_SPLIT: &[DayTemplate] = &[
    DayTemplate { label: "Day 1 — Chest & Arms", groups: &[Chest, Arms] },
    DayTemplate { label: "Day 2 — Back & Arms", groups: &[Back, Arms] },
    DayTemplate { label: "Day 3 — Shoulders & Core", groups: &[Shoulders, Core] },
    DayTemplate { label: "Day 4 — Legs & Core", groups: &[Legs, Core] },
    DayTemplate { label: "Day 5 — Chest & Back", groups: &[Chest, Back] },
    DayTemplate { label: "Day 6 — Legs & Shoulders", groups: &[Legs, Shoulders] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_day_profile_yields_three_days() {
        assert_eq!(choose_split(3).len(), 3);
    }

    #[test]
    fn four_day_profile_yields_four_days() {
        assert_eq!(choose_split(4).len(), 4);
    }

    #[test]
    fn six_or_more_falls_back_to_six_way() {
        assert_eq!(choose_split(6).len(), 6);
        assert_eq!(choose_split(7).len(), 6);
    }

    #[test]
    fn every_day_targets_two_or_three_groups() {
        for days in [3, 4, 5, 6] {
            for day in choose_split(days) {
                assert!(
                    day.groups.len() >= 2 && day.groups.len() <= 3,
                    "{} targets {} groups",
                    day.label,
                    day.groups.len()
                );
            }
        }
    }
}
