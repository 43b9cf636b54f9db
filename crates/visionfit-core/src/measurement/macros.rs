// ABOUTME: Vision-aware macronutrient split: percentages of energy, converted to grams
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Macronutrient distribution, adjusted by the vision pipeline's body-fat
//! estimate (§4.1).
//!
//! # Scientific Reference
//!
//! Phillips, S.M., & Van Loon, L.J. (2011). Dietary protein for athletes.
//! *Journal of Sports Sciences*, 29(sup1), S29-S38.

use crate::constants::energy::{
    DEFAULT_MACRO_SPLIT, HIGH_BF_MACRO_SPLIT, HIGH_BF_THRESHOLD_PCT, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN_CARB, LOW_BF_MACRO_SPLIT, LOW_BF_THRESHOLD_PCT,
};

/// A macronutrient prescription in grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroGrams {
    /// Protein, in grams.
    pub protein_g: f64,
    /// Carbohydrates, in grams.
    pub carbs_g: f64,
    /// Fat, in grams.
    pub fat_g: f64,
}

/// Compute a macronutrient split in grams from a daily energy target and
/// the vision pipeline's body-fat estimate (§4.1).
///
/// Default split is 30/45/25 (protein/carbs/fat) of energy. If
/// `bf_estimate_pct >= 25`, shifts to 35/40/25 (more protein, satiety during
/// a deficit); if `bf_estimate_pct < 12`, shifts to 25/50/25 (more carbs to
/// support training volume at low body-fat). The boundary is inclusive on
/// the high side: 25.0 itself takes the high-bf split, 24.9 takes the
/// default split (§8 boundary behavior).
#[must_use]
pub fn macro_split(energy_kcal: f64, bf_estimate_pct: f64) -> MacroGrams {
    let (protein_pct, carbs_pct, fat_pct) = if bf_estimate_pct >= HIGH_BF_THRESHOLD_PCT {
        HIGH_BF_MACRO_SPLIT
    } else if bf_estimate_pct < LOW_BF_THRESHOLD_PCT {
        LOW_BF_MACRO_SPLIT
    } else {
        DEFAULT_MACRO_SPLIT
    };

    MacroGrams {
        protein_g: (energy_kcal * protein_pct) / KCAL_PER_G_PROTEIN_CARB,
        carbs_g: (energy_kcal * carbs_pct) / KCAL_PER_G_PROTEIN_CARB,
        fat_g: (energy_kcal * fat_pct) / KCAL_PER_G_FAT,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bf_25_exactly_takes_high_split_24_9_does_not() {
        // §8 boundary behavior: bfEstimate = 25.0 takes the high-bf split;
        // 24.9 takes the default split.
        let at_threshold = macro_split(2000.0, 25.0);
        let below_threshold = macro_split(2000.0, 24.9);
        assert!((at_threshold.protein_g - below_threshold.protein_g).abs() > 1.0);

        let high_split_default = macro_split(2000.0, 20.0);
        assert!((at_threshold.protein_g - high_split_default.protein_g).abs() > 1.0);
    }

    #[test]
    fn default_split_sums_to_total_energy() {
        let grams = macro_split(2000.0, 18.0);
        let reconstructed_kcal =
            grams.protein_g * KCAL_PER_G_PROTEIN_CARB + grams.carbs_g * KCAL_PER_G_PROTEIN_CARB + grams.fat_g * KCAL_PER_G_FAT;
        assert!((reconstructed_kcal - 2000.0).abs() < 1e-6);
    }
}
