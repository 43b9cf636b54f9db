// ABOUTME: StaticProfile — identity and long-lived preferences, created once per user
// ABOUTME: Mutable via profile edit; consumed read-only by synthesis
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological sex as declared by the user, used by the measurement algebra
/// (Mifflin-St Jeor and Navy formulas branch on male/female; non-binary
/// averages the two per §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Non-binary — formulas average the male and female results.
    NonBinary,
}

/// Primary training goal, drives calorie scaling and macro split emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    /// Muscle gain: caloric surplus.
    MuscleGain,
    /// Fat loss: caloric deficit.
    FatLoss,
    /// Recomposition: at maintenance, emphasis on training split.
    Recomp,
    /// Maintenance: at maintenance.
    Maintenance,
}

/// Self-reported habitual activity level, feeds the TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little to no exercise.
    Sedentary,
    /// Light exercise 1-3 days per week.
    Light,
    /// Moderate exercise 3-5 days per week.
    Moderate,
    /// Hard exercise most days.
    High,
}

/// Training experience tier, used by exercise-difficulty filtering and the
/// week-4 deload rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    /// New to structured training.
    Beginner,
    /// Consistent training history, comfortable with most movements.
    Intermediate,
    /// Years of structured training, comfortable with high volume.
    Advanced,
}

/// A declared dietary restriction, used by meal-idea template filtering
/// (§4.6 step 8, "Honor dietary restrictions declared in the profile").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryRestriction {
    /// No meat or fish.
    Vegetarian,
    /// No animal products.
    Vegan,
    /// No wheat, barley, or rye.
    GlutenFree,
    /// No dairy products.
    DairyFree,
    /// Avoids lactose specifically (distinct from a full dairy exclusion).
    LactoseIntolerant,
    /// Avoids tree nuts and peanuts.
    NutAllergy,
    /// Vegetarian plus fish and other seafood.
    Pescatarian,
}

/// Long-lived user identity and preferences. Created once per user, mutable
/// via profile edit, consumed read-only by synthesis (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticProfile {
    /// Stable user identifier.
    pub user_id: Uuid,
    /// Full name.
    pub full_name: String,
    /// Date of birth; age is derived from this and must be >= 13.
    pub date_of_birth: NaiveDate,
    /// Biological sex.
    pub sex: Sex,
    /// Primary training goal.
    pub primary_goal: Goal,
    /// Training days per week, in [1, 7].
    pub training_days_per_week: u32,
    /// Habitual activity level.
    pub activity_level: ActivityLevel,
    /// Training experience tier (not in the wire payload verbatim in §3,
    /// but required by exercise-difficulty filtering in §4.6 — derived
    /// from profile defaults at synthesis time, see
    /// [`StaticProfile::experience`]).
    pub experience: Experience,
    /// Declared dietary restrictions, filtering meal-idea templates
    /// (§4.6 step 8 supplement).
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

impl StaticProfile {
    /// Age in whole years as of today, derived from [`Self::date_of_birth`].
    #[must_use]
    pub fn age_years(&self) -> i64 {
        let today = Utc::now().date_naive();
        let mut age = i64::from(today.year() - self.date_of_birth.year());
        let had_birthday_this_year = (today.month(), today.day())
            >= (self.date_of_birth.month(), self.date_of_birth.day());
        if !had_birthday_this_year {
            age -= 1;
        }
        age
    }

    /// Training experience tier used by exercise selection and progression.
    #[must_use]
    pub const fn experience(&self) -> Experience {
        self.experience
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile_with_dob(dob: NaiveDate) -> StaticProfile {
        StaticProfile {
            user_id: Uuid::nil(),
            full_name: "Test User".to_string(),
            date_of_birth: dob,
            sex: Sex::Male,
            primary_goal: Goal::MuscleGain,
            training_days_per_week: 4,
            activity_level: ActivityLevel::Moderate,
            experience: Experience::Intermediate,
            dietary_restrictions: Vec::new(),
        }
    }

    #[test]
    fn age_exactly_13_today_is_13() {
        let today = Utc::now().date_naive();
        let dob = NaiveDate::from_ymd_opt(today.year() - 13, today.month(), today.day())
            .unwrap_or(today);
        assert_eq!(profile_with_dob(dob).age_years(), 13);
    }
}
