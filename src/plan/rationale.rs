// ABOUTME: Rationale-bullet assembly — up to 5 bullets, each tied to a specific input (§4.6 step 9)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use visionfit_core::models::{Goal, PoseAlert, StaticProfile};

/// Maximum rationale bullets surfaced on a plan (§3 `Plan.rationale`, "1-5
/// entries").
const MAX_RATIONALE_BULLETS: usize = 5;

/// Build the ordered rationale bullets for a synthesized plan (§4.6 step 9).
/// Always includes the goal bullet; adds posture, substitution, body-fat,
/// and training-frequency bullets in that priority order, truncating at
/// [`MAX_RATIONALE_BULLETS`].
#[must_use]
pub fn build_rationale(
    profile: &StaticProfile,
    pose_alerts: &BTreeSet<PoseAlert>,
    substitution_notes: &[String],
    bf_estimate: f64,
) -> Vec<String> {
    let mut bullets = Vec::new();

    bullets.push(goal_bullet(profile.primary_goal));

    if !pose_alerts.is_empty() {
        bullets.push(posture_bullet(pose_alerts));
    }

    if let Some(note) = substitution_notes.first() {
        bullets.push(format!("Equipment substitution applied: {note}"));
    }

    bullets.push(body_fat_bullet(bf_estimate));
    bullets.push(training_frequency_bullet(profile.training_days_per_week));

    bullets.truncate(MAX_RATIONALE_BULLETS);
    bullets
}

fn goal_bullet(goal: Goal) -> String {
    match goal {
        Goal::MuscleGain => "Energy target set above maintenance to support muscle gain.".to_string(),
        Goal::FatLoss => "Energy target set below maintenance to support fat loss.".to_string(),
        Goal::Recomp => "Energy target held at maintenance to support body recomposition.".to_string(),
        Goal::Maintenance => "Energy target held at maintenance.".to_string(),
    }
}

fn posture_bullet(pose_alerts: &BTreeSet<PoseAlert>) -> String {
    let names: Vec<&str> = pose_alerts.iter().map(|a| pose_alert_label(*a)).collect();
    format!("Corrective drills added for detected posture cues: {}.", names.join(", "))
}

fn pose_alert_label(alert: PoseAlert) -> &'static str {
    match alert {
        PoseAlert::RoundedShoulders => "rounded shoulders",
        PoseAlert::AnteriorPelvicTilt => "anterior pelvic tilt",
        PoseAlert::ForwardHead => "forward head posture",
        PoseAlert::AsymmetricShoulders => "shoulder asymmetry",
        PoseAlert::KneeValgus => "knee valgus",
    }
}

fn body_fat_bullet(bf_estimate: f64) -> String {
    format!("Macro split tuned to an estimated body-fat of {bf_estimate:.1}%.")
}

fn training_frequency_bullet(training_days_per_week: u32) -> String {
    format!("Split chosen for {training_days_per_week} training days per week.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use visionfit_core::models::{ActivityLevel, Experience, Sex};

    fn profile() -> StaticProfile {
        StaticProfile {
            user_id: uuid::Uuid::nil(),
            full_name: "Test".to_string(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1996, 1, 1).unwrap_or_default(),
            sex: Sex::Male,
            primary_goal: Goal::FatLoss,
            training_days_per_week: 4,
            activity_level: ActivityLevel::Moderate,
            experience: Experience::Intermediate,
            dietary_restrictions: vec![],
        }
    }

    #[test]
    fn never_exceeds_five_bullets() {
        let mut alerts = BTreeSet::new();
        alerts.insert(PoseAlert::RoundedShoulders);
        let bullets = build_rationale(&profile(), &alerts, &["Goblet Squat substituted for Barbell Back Squat".to_string()], 18.0);
        assert!(bullets.len() <= MAX_RATIONALE_BULLETS);
        assert!(!bullets.is_empty());
    }

    #[test]
    fn no_alerts_skips_the_posture_bullet() {
        let bullets = build_rationale(&profile(), &BTreeSet::new(), &[], 18.0);
        assert!(!bullets.iter().any(|b| b.contains("posture cues")));
    }
}
