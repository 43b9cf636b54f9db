// ABOUTME: Recognized injury/equipment token vocabulary; unknown tokens are kept, not rejected, but flagged
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::models::WizardInputs;

/// Injury keywords the safety pre-check and catalog exclusion tables know
/// how to act on. Matched as a case-insensitive substring of a free-text
/// injury token (§4.5: "injury and equipment tokens present in a
/// recognized vocabulary").
pub static RECOGNIZED_INJURY_KEYWORDS: &[&str] = &["knee", "shoulder", "back"];

/// Equipment-limitation tokens the exercise selector knows how to act on.
/// Matched case-insensitively against the whole token.
pub static RECOGNIZED_EQUIPMENT_TOKENS: &[&str] = &["no barbell"];

/// Every declared injury/equipment token that matches none of the
/// recognized vocabularies — kept in the contract, not rejected, so the
/// caller can surface a non-blocking warning (§4.5).
#[must_use]
pub fn unrecognized_tokens(wizard: &WizardInputs) -> Vec<String> {
    let mut unrecognized = Vec::new();

    for injury in &wizard.injuries {
        let lower = injury.to_ascii_lowercase();
        if !RECOGNIZED_INJURY_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            unrecognized.push(injury.clone());
        }
    }

    for token in &wizard.equipment_limits {
        if !RECOGNIZED_EQUIPMENT_TOKENS
            .iter()
            .any(|recognized| token.eq_ignore_ascii_case(recognized))
        {
            unrecognized.push(token.clone());
        }
    }

    unrecognized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_injury_token_is_flagged_not_rejected() {
        let wizard = WizardInputs {
            photo_reference: "p".to_string(),
            height_cm: 180.0,
            weight_kg: 78.0,
            smart_scale: visionfit_core::models::SmartScaleReadings::default(),
            injuries: vec!["funny bone ache".to_string()],
            equipment_limits: vec![],
            user_comment: String::new(),
            reported_rir: None,
        };
        let unrecognized = unrecognized_tokens(&wizard);
        assert_eq!(unrecognized, vec!["funny bone ache".to_string()]);
    }

    #[test]
    fn recognized_tokens_are_not_flagged() {
        let wizard = WizardInputs {
            photo_reference: "p".to_string(),
            height_cm: 180.0,
            weight_kg: 78.0,
            smart_scale: visionfit_core::models::SmartScaleReadings::default(),
            injuries: vec!["left knee pain".to_string()],
            equipment_limits: vec!["no barbell".to_string()],
            user_comment: String::new(),
            reported_rir: None,
        };
        assert!(unrecognized_tokens(&wizard).is_empty());
    }
}
