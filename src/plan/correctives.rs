// ABOUTME: Corrective drill injection — one fixed drill per posture alert, exhaustively matched (§4.6 step 2)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::models::PoseAlert;

use crate::plan::exercises::{RepPrescription, SelectedExercise};

/// A corrective drill paired with the posture alert it addresses. Kept as a
/// distinct type from [`SelectedExercise`] so the exhaustive match below is
/// the single place that can go out of sync when a new [`PoseAlert`]
/// variant is added — the compiler enforces it.
#[derive(Clone, Copy)]
struct CorrectiveDrill {
    name: &'static str,
    equipment: &'static [&'static str],
    sets: u32,
    reps: RepPrescription,
    rest_seconds: u32,
    benefit_note: &'static str,
}

/// The fixed drill list for each closed [`PoseAlert`] variant (§4.6 step 2:
/// "prepend a fixed mobility drill list" per alert — e.g. rounded_shoulders
/// → {wall angels 3×15, doorway chest stretch 3×30s, face pulls 3×15}). The
/// `match` has no wildcard arm — adding a `PoseAlert` variant without
/// pairing it here fails to compile.
fn drills_for(alert: PoseAlert) -> &'static [CorrectiveDrill] {
    match alert {
        PoseAlert::RoundedShoulders => &[
            CorrectiveDrill {
                name: "Wall Angel",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::Range(15, 15),
                rest_seconds: 30,
                benefit_note: "drills scapular upward rotation to counter rounded shoulders",
            },
            CorrectiveDrill {
                name: "Doorway Chest Stretch",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::HoldSeconds(30),
                rest_seconds: 30,
                benefit_note: "opens the chest to counter rounded shoulders",
            },
            CorrectiveDrill {
                name: "Face Pull",
                equipment: &["resistance band"],
                sets: 3,
                reps: RepPrescription::Range(15, 15),
                rest_seconds: 30,
                benefit_note: "strengthens the upper back and rear delts to counter rounded shoulders",
            },
        ],
        PoseAlert::AnteriorPelvicTilt => &[
            CorrectiveDrill {
                name: "Hip Flexor Stretch",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::HoldSeconds(30),
                rest_seconds: 30,
                benefit_note: "lengthens shortened hip flexors contributing to anterior pelvic tilt",
            },
            CorrectiveDrill {
                name: "Dead Bug",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::Range(10, 12),
                rest_seconds: 45,
                benefit_note: "builds anterior-core control to reduce anterior pelvic tilt",
            },
            CorrectiveDrill {
                name: "Glute Bridge",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::Range(12, 15),
                rest_seconds: 45,
                benefit_note: "strengthens glutes to counter anterior pelvic tilt",
            },
        ],
        PoseAlert::ForwardHead => &[
            CorrectiveDrill {
                name: "Chin Tuck",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::HoldSeconds(10),
                rest_seconds: 30,
                benefit_note: "retrains neck alignment to reduce forward head posture",
            },
            CorrectiveDrill {
                name: "Upper Trap Stretch",
                equipment: &[],
                sets: 3,
                reps: RepPrescription::HoldSeconds(30),
                rest_seconds: 30,
                benefit_note: "releases upper trap tension that accompanies forward head posture",
            },
        ],
        PoseAlert::AsymmetricShoulders => &[CorrectiveDrill {
            name: "Single-Arm Dumbbell Row",
            equipment: &["dumbbells"],
            sets: 3,
            reps: RepPrescription::Range(10, 12),
            rest_seconds: 60,
            benefit_note: "trains each side independently to rebalance shoulder height asymmetry",
        }],
        PoseAlert::KneeValgus => &[CorrectiveDrill {
            name: "Banded Lateral Walk",
            equipment: &["resistance band"],
            sets: 3,
            reps: RepPrescription::Range(12, 15),
            rest_seconds: 45,
            benefit_note: "strengthens hip abductors to resist knees collapsing inward",
        }],
    }
}

/// Build the [`SelectedExercise`] entries for every detected alert, in
/// alert order (the set is already sorted — §4.3 `PoseAlert` ordering),
/// each alert expanding to its full drill list. These are appended to
/// every workout day of the weeks they apply to.
#[must_use]
pub fn corrective_exercises(alerts: &std::collections::BTreeSet<PoseAlert>) -> Vec<SelectedExercise> {
    alerts
        .iter()
        .flat_map(|&alert| {
            drills_for(alert).iter().map(move |drill| SelectedExercise {
                name: drill.name.to_string(),
                equipment: drill.equipment.iter().map(|e| (*e).to_string()).collect(),
                sets: drill.sets,
                reps: drill.reps,
                rest_seconds: drill.rest_seconds,
                corrective: true,
                rationale_note: Some(format!("{alert:?} detected — {}", drill.benefit_note)),
            })
        })
        .collect()
}

/// The flat mobility-drill name list surfaced separately on the plan
/// (`Plan.mobility_drills`, §6), derived from the same alert set.
#[must_use]
pub fn mobility_drill_names(alerts: &std::collections::BTreeSet<PoseAlert>) -> Vec<String> {
    alerts.iter().flat_map(|&alert| drills_for(alert).iter().map(|drill| drill.name.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pose_alert_variant_has_at_least_one_drill() {
        for alert in [
            PoseAlert::RoundedShoulders,
            PoseAlert::AnteriorPelvicTilt,
            PoseAlert::ForwardHead,
            PoseAlert::AsymmetricShoulders,
            PoseAlert::KneeValgus,
        ] {
            let drills = drills_for(alert);
            assert!(!drills.is_empty());
            assert!(drills.iter().all(|d| !d.name.is_empty()));
        }
    }

    #[test]
    fn rounded_shoulders_includes_a_face_pull() {
        let drills = drills_for(PoseAlert::RoundedShoulders);
        assert!(drills.iter().any(|d| d.name == "Face Pull"));
    }

    #[test]
    fn corrective_exercises_are_marked_corrective() {
        let mut alerts = std::collections::BTreeSet::new();
        alerts.insert(PoseAlert::RoundedShoulders);
        alerts.insert(PoseAlert::KneeValgus);
        let exercises = corrective_exercises(&alerts);
        assert_eq!(exercises.len(), drills_for(PoseAlert::RoundedShoulders).len() + drills_for(PoseAlert::KneeValgus).len());
        assert!(exercises.iter().all(|e| e.corrective));
        assert!(exercises.iter().any(|e| e.name == "Face Pull"));
    }

    #[test]
    fn empty_alert_set_yields_no_drills() {
        assert!(corrective_exercises(&std::collections::BTreeSet::new()).is_empty());
        assert!(mobility_drill_names(&std::collections::BTreeSet::new()).is_empty());
    }
}
