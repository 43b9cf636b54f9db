// ABOUTME: Numeric defaults for the measurement algebra, vision pipeline, and safety validator
// ABOUTME: Centralizes magic numbers named directly in the engineering spec so they are defined once
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named constants pulled out of the measurement algebra, vision pipeline,
//! and safety validator so a single changed number cannot silently diverge
//! between call sites. Grouped by domain rather than dumped into one flat
//! list, matching the organization the wider engine uses for its own
//! constants tables.

/// BMR / TDEE / macro-energy constants (§4.1).
pub mod energy {
    /// Activity-level multiplier applied to BMR to obtain TDEE.
    pub mod activity_multiplier {
        /// Sedentary: little to no exercise.
        pub const SEDENTARY: f64 = 1.20;
        /// Light activity: 1-3 light sessions per week.
        pub const LIGHT: f64 = 1.375;
        /// Moderate activity: 3-5 sessions per week.
        pub const MODERATE: f64 = 1.55;
        /// High activity: hard training most days.
        pub const HIGH: f64 = 1.725;
    }

    /// Goal-based scaling applied to TDEE to obtain a target energy intake.
    pub mod goal_scale {
        /// Fat-loss: moderate deficit.
        pub const FAT_LOSS: f64 = 0.85;
        /// Muscle-gain: moderate surplus.
        pub const MUSCLE_GAIN: f64 = 1.10;
        /// Recomposition: at maintenance.
        pub const RECOMP: f64 = 1.00;
        /// Maintenance: at maintenance.
        pub const MAINTENANCE: f64 = 1.00;
    }

    /// Kilocalories to kilojoules. This is the single unit-conversion
    /// boundary in the system — everything above the measurement algebra
    /// operates in kJ (Design Notes §9).
    pub const KCAL_TO_KJ: f64 = 4.184;

    /// kcal per gram of protein and carbohydrate.
    pub const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
    /// kcal per gram of fat.
    pub const KCAL_PER_G_FAT: f64 = 9.0;

    /// Default macro split (protein, carbs, fat) as a fraction of energy.
    pub const DEFAULT_MACRO_SPLIT: (f64, f64, f64) = (0.30, 0.45, 0.25);
    /// Macro split used when `bfEstimate >= 25`: higher protein for satiety
    /// and lean-mass retention during a deficit.
    pub const HIGH_BF_MACRO_SPLIT: (f64, f64, f64) = (0.35, 0.40, 0.25);
    /// Macro split used when `bfEstimate < 12`: higher carbs to support
    /// training volume at low body-fat levels.
    pub const LOW_BF_MACRO_SPLIT: (f64, f64, f64) = (0.25, 0.50, 0.25);

    /// Threshold at or above which the high-body-fat macro split applies.
    pub const HIGH_BF_THRESHOLD_PCT: f64 = 25.0;
    /// Threshold below which the low-body-fat macro split applies.
    pub const LOW_BF_THRESHOLD_PCT: f64 = 12.0;
}

/// Navy circumference body-fat formula constants (§4.1).
pub mod navy_bodyfat {
    /// Male formula: `86.010 * log10(waist - neck) - 70.041 * log10(height) + 36.76`.
    pub const MALE_WAIST_NECK_COEFF: f64 = 86.010;
    /// Male formula height coefficient.
    pub const MALE_HEIGHT_COEFF: f64 = 70.041;
    /// Male formula constant term.
    pub const MALE_CONST: f64 = 36.76;

    /// Female formula: `163.205 * log10(waist + hip - neck) - 97.684 * log10(height) - 78.387`.
    pub const FEMALE_WAIST_HIP_NECK_COEFF: f64 = 163.205;
    /// Female formula height coefficient.
    pub const FEMALE_HEIGHT_COEFF: f64 = 97.684;
    /// Female formula constant term.
    pub const FEMALE_CONST: f64 = 78.387;

    /// Lower clamp bound for any Navy body-fat estimate.
    pub const MIN_PCT: f64 = 3.0;
    /// Upper clamp bound for any Navy body-fat estimate.
    pub const MAX_PCT: f64 = 50.0;

    /// Fallback body-fat percentage used when the formula hits a domain
    /// error (e.g. `waist <= neck`) for a male subject.
    pub const MALE_FALLBACK_PCT: f64 = 15.0;
    /// Fallback body-fat percentage used on domain error for a female
    /// subject.
    pub const FEMALE_FALLBACK_PCT: f64 = 23.0;
}

/// Body-composition confidence-tier thresholds (§4.3 Stage 5).
pub mod confidence {
    /// Below this maximum pairwise deviation (percentage points) between
    /// the three body-fat estimators, confidence is `High`.
    pub const HIGH_MAX_DEVIATION_PP: f64 = 3.0;
    /// Below this maximum pairwise deviation, confidence is `Medium`;
    /// otherwise `Low`.
    pub const MEDIUM_MAX_DEVIATION_PP: f64 = 6.0;
}

/// Progression-rule constants (§4.1, §4.6).
pub mod progression {
    /// Week 2 volume multiplier.
    pub const WEEK_2_MULTIPLIER: f64 = 1.05;
    /// Week 3 volume multiplier.
    pub const WEEK_3_MULTIPLIER: f64 = 1.10;
    /// Week 4 deload multiplier for intermediate/advanced trainees.
    pub const WEEK_4_DELOAD_MULTIPLIER: f64 = 0.80;
    /// Week 4 multiplier for beginners (no deload, repeat week 1).
    pub const WEEK_4_BEGINNER_MULTIPLIER: f64 = 1.00;
    /// Reported RIR at or below which reps increase 5% for the same sets.
    pub const RIR_INCREASE_THRESHOLD: u8 = 2;
    /// Rep increase fraction applied when the RIR threshold is met.
    pub const RIR_REP_INCREASE_FRACTION: f64 = 0.05;
}

/// Vision pipeline numeric defaults (§4.3, §6 configuration table).
pub mod vision {
    /// Stage 1 quality gate pass threshold.
    pub const DEFAULT_MIN_IMAGE_QUALITY: f64 = 0.70;
    /// Stage 3 pose-estimator minimum per-landmark visibility/confidence.
    pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f64 = 0.5;
    /// Normalization constant for variance-of-Laplacian blur scoring.
    pub const DEFAULT_BLUR_THRESHOLD: f64 = 500.0;
    /// Longest edge, in pixels, an input image is downscaled to.
    pub const MAX_DIMENSION_PX: u32 = 1024;

    /// Stage 1 weighted-quality component weights.
    pub mod quality_weights {
        /// Weight of the blur component.
        pub const BLUR: f64 = 0.40;
        /// Weight of the brightness component.
        pub const BRIGHTNESS: f64 = 0.30;
        /// Weight of the contrast component.
        pub const CONTRAST: f64 = 0.30;
    }

    /// Mean-luminance bounds outside which the quality score is halved.
    pub const LUMINANCE_PENALTY_LOW: f64 = 30.0;
    /// See [`LUMINANCE_PENALTY_LOW`].
    pub const LUMINANCE_PENALTY_HIGH: f64 = 220.0;
    /// Multiplier applied to the quality score outside the luminance band.
    pub const LUMINANCE_PENALTY_FACTOR: f64 = 0.5;
    /// Normalization point for brightness distance from mid-gray (128).
    pub const MID_LUMINANCE: f64 = 128.0;
    /// Normalization constant for contrast (standard deviation of luminance).
    pub const CONTRAST_NORMALIZATION: f64 = 64.0;

    /// Default anthropometric ratio-of-shoulder/hip constants (§4.3, §6).
    pub mod anthro_ratios {
        /// waist = shoulder width * this ratio.
        pub const WAIST_OF_SHOULDER: f64 = 0.75;
        /// hip = shoulder width * this ratio (operator-tunable per §6; the
        /// Stage 4 prose additionally emits hip directly from landmarks
        /// when available — this ratio is the fallback/tuning knob).
        pub const HIP_OF_SHOULDER: f64 = 0.95;
        /// neck = shoulder width * this ratio.
        pub const NECK_OF_SHOULDER: f64 = 0.35;
        /// chest = shoulder width * this ratio (fixed, not operator-tunable).
        pub const CHEST_OF_SHOULDER: f64 = 0.85;
        /// thigh = hip width * this ratio (fixed, not operator-tunable).
        pub const THIGH_OF_HIP: f64 = 0.40;
        /// arm = shoulder width * this ratio (fixed, not operator-tunable).
        pub const ARM_OF_SHOULDER: f64 = 0.30;
    }

    /// Body-composition estimator blend weights (Navy, silhouette, ratio).
    pub mod bf_blend_weights {
        /// Weight of the Navy-formula estimate.
        pub const NAVY: f64 = 0.5;
        /// Weight of the silhouette edge-density estimate.
        pub const SILHOUETTE: f64 = 0.3;
        /// Weight of the waist/hip ratio-bucket estimate.
        pub const RATIO: f64 = 0.2;
    }

    /// Silhouette estimator sex-specific baseline body-fat percentage.
    pub mod silhouette_baseline {
        /// Male baseline.
        pub const MALE_PCT: f64 = 18.0;
        /// Female baseline.
        pub const FEMALE_PCT: f64 = 25.0;
        /// Edge density, in [0, 1], the baseline itself was calibrated
        /// against. Edge density above this lowers the estimate (more
        /// visible muscular definition); below it raises the estimate.
        pub const REFERENCE_EDGE_DENSITY: f64 = 0.12;
        /// Percentage points of body-fat shift per unit of edge-density
        /// deviation from [`REFERENCE_EDGE_DENSITY`].
        pub const EDGE_DENSITY_SENSITIVITY: f64 = 60.0;
    }

    /// Waist/hip-ratio bucket table for the third body-composition
    /// estimator, sex-specific (§4.3 Stage 5 "(iii)").
    pub mod ratio_bucket {
        /// Male buckets: `(upper_bound_whr, body_fat_pct)`, checked in
        /// order; the last entry is the catch-all for any higher ratio.
        pub const MALE_BUCKETS: &[(f64, f64)] = &[(0.85, 12.0), (0.90, 17.0), (0.95, 22.0), (1.00, 27.0)];
        /// Male catch-all body-fat percentage for `whr >= 1.00`.
        pub const MALE_CATCHALL_PCT: f64 = 32.0;
        /// Female buckets: `(upper_bound_whr, body_fat_pct)`.
        pub const FEMALE_BUCKETS: &[(f64, f64)] = &[(0.75, 18.0), (0.80, 23.0), (0.85, 28.0), (0.90, 33.0)];
        /// Female catch-all body-fat percentage for `whr >= 0.90`.
        pub const FEMALE_CATCHALL_PCT: f64 = 38.0;
    }

    /// Valid range for the blended body-fat estimate emitted in a
    /// `VisionRecord` (§3).
    pub const BF_ESTIMATE_RANGE: (f64, f64) = (3.0, 60.0);

    /// Posture-detection thresholds (normalized landmark coordinates).
    pub mod posture {
        /// `rounded_shoulders`: mean shoulder y below mean ear y by more than this.
        pub const ROUNDED_SHOULDERS_Y_DELTA: f64 = 0.02;
        /// `asymmetric_shoulders`: left/right shoulder y difference exceeds this.
        pub const ASYMMETRIC_SHOULDERS_Y_DELTA: f64 = 0.03;
        /// `forward_head`: nose x ahead of mean shoulder x by more than this.
        pub const FORWARD_HEAD_X_DELTA: f64 = 0.05;
        /// `anterior_pelvic_tilt`: mean hip y below mean shoulder y by more than this.
        pub const ANTERIOR_PELVIC_TILT_Y_DELTA: f64 = 0.40;
        /// `knee_valgus`: ankle separation exceeds knee separation by more
        /// than this (knees caving inward relative to ankle stance). Added
        /// so every `PoseAlert` variant has a corresponding detector.
        pub const KNEE_VALGUS_X_DELTA: f64 = 0.02;
    }

    /// Default synchronous-wait bound, in seconds, for `await_result`.
    pub const DEFAULT_PROCESSING_TIMEOUT_SECS: u64 = 60;
    /// Backoff applied by a worker after a processing error before retrying.
    pub const WORKER_ERROR_BACKOFF_MS: u64 = 1000;
    /// Time-to-live, from enqueue, for the uploaded image before best-effort
    /// cleanup (§5, "Shared resources").
    pub const IMAGE_RETENTION_SECS: u64 = 3600;
}

/// Safety validator limits (§4.7, §6 configuration table).
pub mod safety {
    /// Minimum daily kilocalories for a male before the floor is enforced.
    pub const MIN_CALORIES_MALE_KCAL: f64 = 1500.0;
    /// Minimum daily kilocalories for a female before the floor is enforced.
    pub const MIN_CALORIES_FEMALE_KCAL: f64 = 1200.0;
    /// Maximum allowed |deficit| as a fraction of TDEE.
    pub const MAX_CALORIE_DEFICIT_FRACTION: f64 = 0.25;
    /// Minimum protein per kilogram of body weight.
    pub const MIN_PROTEIN_PER_KG: f64 = 0.8;

    /// Maximum safe training sessions per week, by experience tier.
    pub mod max_weekly_sessions {
        /// Beginner ceiling.
        pub const BEGINNER: u8 = 4;
        /// Intermediate ceiling.
        pub const INTERMEDIATE: u8 = 5;
        /// Advanced ceiling.
        pub const ADVANCED: u8 = 6;
    }

    /// Maximum safe week-over-week volume increase, by experience tier.
    pub mod max_progression_fraction {
        /// Beginner ceiling.
        pub const BEGINNER: f64 = 0.05;
        /// Intermediate ceiling.
        pub const INTERMEDIATE: f64 = 0.10;
        /// Advanced ceiling.
        pub const ADVANCED: f64 = 0.15;
    }

    /// Progression increase above which the audit raises a hard,
    /// unrecoverable [`crate::errors::ErrorKind::SafetyViolation`] rather
    /// than a warning.
    pub const CATASTROPHIC_PROGRESSION_FRACTION: f64 = 0.50;
}

/// Data-contract validation bounds (§3, §4.5).
pub mod contract {
    /// Minimum age, in years, accepted by the adult synthesis path.
    pub const MIN_ADULT_AGE_YEARS: u32 = 13;
    /// Training days per week, inclusive bounds.
    pub const TRAINING_DAYS_RANGE: (u32, u32) = (1, 7);
    /// Height, in centimeters, inclusive bounds.
    pub const HEIGHT_CM_RANGE: (f64, f64) = (100.0, 230.0);
    /// Weight, in kilograms, inclusive bounds.
    pub const WEIGHT_KG_RANGE: (f64, f64) = (30.0, 300.0);
    /// Smart-scale body-fat percentage, inclusive bounds.
    pub const BODY_FAT_PCT_RANGE: (f64, f64) = (3.0, 60.0);
    /// Smart-scale muscle percentage, inclusive bounds.
    pub const MUSCLE_PCT_RANGE: (f64, f64) = (20.0, 70.0);
    /// Smart-scale visceral-fat score, inclusive bounds.
    pub const VISCERAL_FAT_SCORE_RANGE: (f64, f64) = (1.0, 30.0);
    /// Free-text user comment maximum length, in characters.
    pub const MAX_COMMENT_CHARS: usize = 500;
    /// Vision quality floor required for a `DataContract` to be valid.
    pub const MIN_VISION_QUALITY: f64 = 0.70;
}

/// Plan-structure constants (§3, §4.6).
pub mod plan {
    /// Mesocycle length in weeks.
    pub const MESOCYCLE_WEEKS: u32 = 4;
    /// Target number of main exercises per non-corrective workout day.
    pub const TARGET_MAIN_EXERCISES_PER_DAY: usize = 5;
    /// Meal-idea shares of daily energy: breakfast, lunch, dinner, snack.
    pub const MEAL_ENERGY_SHARES: (f64, f64, f64, f64) = (0.25, 0.35, 0.30, 0.10);
    /// Hip circumference, in centimeters, above which goblet/front squats
    /// are preferred over back squats (§4.6 step 4).
    pub const LONG_FEMUR_HIP_CM_THRESHOLD: f64 = 95.0;
}
