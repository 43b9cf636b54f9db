// ABOUTME: The actual static exercise table and injury-keyword -> blocked-exercise-name mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Difficulty, Exercise, MuscleGroup};

use MuscleGroup::{Arms, Back, Chest, Core, FullBody, Legs, Shoulders};

/// The complete static exercise reference table (§4.2). Ordered
/// deterministically; callers must not assume any particular ordering
/// beyond "stable across runs" (§8).
pub static EXERCISES: &[Exercise] = &[
    Exercise {
        name: "Barbell Back Squat",
        muscle_groups: &[Legs],
        equipment: &["barbell", "squat rack"],
        difficulty: Difficulty::Intermediate,
        is_barbell: true,
        substitutions: &["Goblet Squat", "Front Squat (Dumbbells)"],
        safety_notes: &["Keep knees tracking over toes; avoid valgus collapse."],
    },
    Exercise {
        name: "Goblet Squat",
        muscle_groups: &[Legs],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Bodyweight Squat"],
        safety_notes: &[],
    },
    Exercise {
        name: "Front Squat (Dumbbells)",
        muscle_groups: &[Legs],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Intermediate,
        is_barbell: false,
        substitutions: &["Goblet Squat"],
        safety_notes: &[],
    },
    Exercise {
        name: "Bodyweight Squat",
        muscle_groups: &[Legs],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Lunges",
        muscle_groups: &[Legs],
        equipment: &[],
        difficulty: Difficulty::Intermediate,
        is_barbell: false,
        substitutions: &["Step-Ups", "Bodyweight Squat"],
        safety_notes: &["Avoid with acute knee pain; front knee loads heavily."],
    },
    Exercise {
        name: "Step-Ups",
        muscle_groups: &[Legs],
        equipment: &["bench"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Bodyweight Squat"],
        safety_notes: &[],
    },
    Exercise {
        name: "Jump Squats",
        muscle_groups: &[Legs],
        equipment: &[],
        difficulty: Difficulty::Advanced,
        is_barbell: false,
        substitutions: &["Bodyweight Squat"],
        safety_notes: &["High knee-joint loading; avoid with acute knee pain."],
    },
    Exercise {
        name: "Plyometrics",
        muscle_groups: &[Legs, FullBody],
        equipment: &[],
        difficulty: Difficulty::Advanced,
        is_barbell: false,
        substitutions: &["Step-Ups"],
        safety_notes: &["High impact; avoid with acute knee pain."],
    },
    Exercise {
        name: "Romanian Deadlift (Dumbbells)",
        muscle_groups: &[Legs, Back],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Intermediate,
        is_barbell: false,
        substitutions: &["Glute Bridge"],
        safety_notes: &[],
    },
    Exercise {
        name: "Glute Bridge",
        muscle_groups: &[Legs, Core],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Deadlift",
        muscle_groups: &[Back, Legs],
        equipment: &["barbell"],
        difficulty: Difficulty::Advanced,
        is_barbell: true,
        substitutions: &["Romanian Deadlift (Dumbbells)", "Glute Bridge"],
        safety_notes: &["Avoid with acute low-back pain; requires neutral spine cueing."],
    },
    Exercise {
        name: "Bent-Over Row",
        muscle_groups: &[Back],
        equipment: &["barbell"],
        difficulty: Difficulty::Intermediate,
        is_barbell: true,
        substitutions: &["Dumbbell Row", "Seated Cable Row"],
        safety_notes: &["Avoid with acute low-back pain; hinges under spinal load."],
    },
    Exercise {
        name: "Dumbbell Row",
        muscle_groups: &[Back],
        equipment: &["dumbbell", "bench"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Seated Cable Row"],
        safety_notes: &[],
    },
    Exercise {
        name: "Seated Cable Row",
        muscle_groups: &[Back],
        equipment: &["cable machine"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Lat Pulldown",
        muscle_groups: &[Back],
        equipment: &["cable machine"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Assisted Pull-Up"],
        safety_notes: &[],
    },
    Exercise {
        name: "Pull-Ups",
        muscle_groups: &[Back, Arms],
        equipment: &["pull-up bar"],
        difficulty: Difficulty::Advanced,
        is_barbell: false,
        substitutions: &["Assisted Pull-Up", "Lat Pulldown"],
        safety_notes: &["Avoid with acute shoulder pain; full overhead range."],
    },
    Exercise {
        name: "Assisted Pull-Up",
        muscle_groups: &[Back, Arms],
        equipment: &["pull-up bar", "resistance band"],
        difficulty: Difficulty::Intermediate,
        is_barbell: false,
        substitutions: &["Lat Pulldown"],
        safety_notes: &[],
    },
    Exercise {
        name: "Barbell Bench Press",
        muscle_groups: &[Chest, Arms],
        equipment: &["barbell", "bench"],
        difficulty: Difficulty::Intermediate,
        is_barbell: true,
        substitutions: &["Dumbbell Bench Press", "Push-Ups"],
        safety_notes: &[],
    },
    Exercise {
        name: "Dumbbell Bench Press",
        muscle_groups: &[Chest, Arms],
        equipment: &["dumbbell", "bench"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Push-Ups"],
        safety_notes: &[],
    },
    Exercise {
        name: "Push-Ups",
        muscle_groups: &[Chest, Arms],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Chest Fly (Dumbbells)",
        muscle_groups: &[Chest],
        equipment: &["dumbbell", "bench"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Overhead Press (Barbell)",
        muscle_groups: &[Shoulders, Arms],
        equipment: &["barbell"],
        difficulty: Difficulty::Intermediate,
        is_barbell: true,
        substitutions: &["Dumbbell Shoulder Press", "Landmine Press"],
        safety_notes: &["Avoid with acute shoulder pain; full overhead range."],
    },
    Exercise {
        name: "Dumbbell Shoulder Press",
        muscle_groups: &[Shoulders, Arms],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Landmine Press"],
        safety_notes: &["Avoid with acute shoulder pain; full overhead range."],
    },
    Exercise {
        name: "Landmine Press",
        muscle_groups: &[Shoulders, Arms],
        equipment: &["barbell", "landmine attachment"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Lateral Raise"],
        safety_notes: &[],
    },
    Exercise {
        name: "Lateral Raise",
        muscle_groups: &[Shoulders],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Face Pull",
        muscle_groups: &[Shoulders, Back],
        equipment: &["cable machine", "resistance band"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Band Pull-Apart"],
        safety_notes: &["Standard corrective for rounded-shoulder posture."],
    },
    Exercise {
        name: "Band Pull-Apart",
        muscle_groups: &[Shoulders, Back],
        equipment: &["resistance band"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &["Standard corrective for rounded-shoulder posture."],
    },
    Exercise {
        name: "Barbell Curl",
        muscle_groups: &[Arms],
        equipment: &["barbell"],
        difficulty: Difficulty::Beginner,
        is_barbell: true,
        substitutions: &["Dumbbell Curl"],
        safety_notes: &[],
    },
    Exercise {
        name: "Dumbbell Curl",
        muscle_groups: &[Arms],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Triceps Pushdown",
        muscle_groups: &[Arms],
        equipment: &["cable machine"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &["Overhead Triceps Extension (Dumbbell)"],
        safety_notes: &[],
    },
    Exercise {
        name: "Overhead Triceps Extension (Dumbbell)",
        muscle_groups: &[Arms],
        equipment: &["dumbbell"],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Plank",
        muscle_groups: &[Core],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &[],
    },
    Exercise {
        name: "Dead Bug",
        muscle_groups: &[Core],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &["Standard corrective for anterior pelvic tilt."],
    },
    Exercise {
        name: "Bird Dog",
        muscle_groups: &[Core],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &["Standard corrective for anterior pelvic tilt and asymmetric shoulders."],
    },
    Exercise {
        name: "Hanging Leg Raise",
        muscle_groups: &[Core],
        equipment: &["pull-up bar"],
        difficulty: Difficulty::Advanced,
        is_barbell: false,
        substitutions: &["Dead Bug"],
        safety_notes: &[],
    },
    Exercise {
        name: "Chin Tucks",
        muscle_groups: &[Core],
        equipment: &[],
        difficulty: Difficulty::Beginner,
        is_barbell: false,
        substitutions: &[],
        safety_notes: &["Standard corrective for forward-head posture."],
    },
];

/// Injury-keyword to blocked-exercise-name mapping (§4.6 step 1). Keys are
/// matched against free-text injury tokens with
/// [`crate::models::WizardInputs::mentions_injury`] (substring,
/// case-insensitive); values are exact catalog names.
pub static INJURY_EXCLUSIONS: &[(&str, &[&str])] = &[
    ("knee", &["Lunges", "Jump Squats", "Plyometrics"]),
    (
        "shoulder",
        &["Overhead Press (Barbell)", "Dumbbell Shoulder Press", "Pull-Ups"],
    ),
    ("back", &["Deadlift", "Bent-Over Row"]),
];

/// Union of all blocked exercise names whose injury keyword matches any
/// token in `injuries` (substring, case-insensitive).
#[must_use]
pub fn blocked_exercises_for_injury(injuries: &[String]) -> Vec<String> {
    let mut blocked = Vec::new();
    for (keyword, names) in INJURY_EXCLUSIONS {
        let mentioned = injuries
            .iter()
            .any(|token| token.to_ascii_lowercase().contains(keyword));
        if mentioned {
            for name in *names {
                if !blocked.iter().any(|b: &String| b == name) {
                    blocked.push((*name).to_string());
                }
            }
        }
    }
    blocked
}
