// ABOUTME: Meal-idea templates — four slots at fixed energy shares, filtered by dietary restriction (§4.6 step 8)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use visionfit_core::constants::plan::MEAL_ENERGY_SHARES;
use visionfit_core::models::plan::MealIdea;
use visionfit_core::models::DietaryRestriction;

/// A meal template before it is scaled to a specific day's energy target.
/// `restrictions` lists every [`DietaryRestriction`] this template
/// violates; a template with an empty list suits everyone.
struct MealTemplate {
    slot: &'static str,
    name: &'static str,
    ingredients: &'static [&'static str],
    protein_share: f64,
    carbs_share: f64,
    fat_share: f64,
    violates: &'static [DietaryRestriction],
}

const BREAKFAST_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        slot: "Breakfast",
        name: "Greek Yogurt Parfait",
        ingredients: &["250 g Greek yogurt", "40 g granola", "100 g mixed berries"],
        protein_share: 0.30,
        carbs_share: 0.45,
        fat_share: 0.25,
        violates: &[DietaryRestriction::Vegan, DietaryRestriction::DairyFree, DietaryRestriction::LactoseIntolerant],
    },
    MealTemplate {
        slot: "Breakfast",
        name: "Tofu Scramble with Oats",
        ingredients: &["200 g firm tofu", "60 g rolled oats", "1 tbsp olive oil"],
        protein_share: 0.28,
        carbs_share: 0.47,
        fat_share: 0.25,
        violates: &[],
    },
];

const LUNCH_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        slot: "Lunch",
        name: "Grilled Chicken Rice Bowl",
        ingredients: &["180 g grilled chicken breast", "150 g steamed rice", "100 g mixed vegetables"],
        protein_share: 0.35,
        carbs_share: 0.45,
        fat_share: 0.20,
        violates: &[DietaryRestriction::Vegetarian, DietaryRestriction::Vegan, DietaryRestriction::Pescatarian],
    },
    MealTemplate {
        slot: "Lunch",
        name: "Lentil and Quinoa Bowl",
        ingredients: &["150 g cooked lentils", "120 g cooked quinoa", "80 g roasted vegetables"],
        protein_share: 0.25,
        carbs_share: 0.50,
        fat_share: 0.25,
        violates: &[],
    },
];

const DINNER_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        slot: "Dinner",
        name: "Baked Salmon with Sweet Potato",
        ingredients: &["180 g baked salmon", "200 g roasted sweet potato", "100 g steamed greens"],
        protein_share: 0.32,
        carbs_share: 0.40,
        fat_share: 0.28,
        violates: &[DietaryRestriction::Vegetarian, DietaryRestriction::Vegan],
    },
    MealTemplate {
        slot: "Dinner",
        name: "Chickpea and Vegetable Curry",
        ingredients: &["200 g chickpeas", "150 g mixed vegetables", "120 g basmati rice"],
        protein_share: 0.22,
        carbs_share: 0.53,
        fat_share: 0.25,
        violates: &[],
    },
];

const SNACK_TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        slot: "Snack",
        name: "Protein Shake with Almonds",
        ingredients: &["1 scoop whey protein", "250 ml milk", "20 g almonds"],
        protein_share: 0.40,
        carbs_share: 0.30,
        fat_share: 0.30,
        violates: &[
            DietaryRestriction::Vegan,
            DietaryRestriction::DairyFree,
            DietaryRestriction::LactoseIntolerant,
            DietaryRestriction::NutAllergy,
        ],
    },
    MealTemplate {
        slot: "Snack",
        name: "Apple with Sunflower Seed Butter",
        ingredients: &["1 medium apple", "2 tbsp sunflower seed butter"],
        protein_share: 0.15,
        carbs_share: 0.55,
        fat_share: 0.30,
        violates: &[],
    },
];

/// Picks the first template that violates none of `restrictions`, falling
/// back to `templates[0]` if every template is restricted. Each const
/// template table above is non-empty by construction and always carries
/// at least one unrestricted entry, so the index is infallible — no
/// `Option`-unwrapping needed.
fn pick<'a>(templates: &'a [MealTemplate], restrictions: &[DietaryRestriction]) -> &'a MealTemplate {
    templates
        .iter()
        .find(|t| t.violates.iter().all(|v| !restrictions.contains(v)))
        .unwrap_or(&templates[0])
}

/// Build the four meal ideas for one day's energy target, honoring declared
/// dietary restrictions by falling back to the allergen-free alternative in
/// each slot (§4.6 step 8 supplement).
#[must_use]
pub fn meal_ideas_for_day(day_kj: i64, restrictions: &[DietaryRestriction]) -> Vec<MealIdea> {
    let (breakfast_share, lunch_share, dinner_share, snack_share) = MEAL_ENERGY_SHARES;
    vec![
        build_meal(pick(BREAKFAST_TEMPLATES, restrictions), day_kj, breakfast_share),
        build_meal(pick(LUNCH_TEMPLATES, restrictions), day_kj, lunch_share),
        build_meal(pick(DINNER_TEMPLATES, restrictions), day_kj, dinner_share),
        build_meal(pick(SNACK_TEMPLATES, restrictions), day_kj, snack_share),
    ]
}

fn build_meal(template: &MealTemplate, day_kj: i64, energy_share: f64) -> MealIdea {
    #[allow(clippy::cast_precision_loss)]
    let day_kj_f = day_kj as f64;
    let meal_kj = day_kj_f * energy_share;
    #[allow(clippy::cast_possible_truncation)]
    let meal_kj_rounded = meal_kj.round() as i64;

    let protein_kcal = visionfit_core::measurement::kj_to_kcal(meal_kj) * template.protein_share;
    let carbs_kcal = visionfit_core::measurement::kj_to_kcal(meal_kj) * template.carbs_share;
    let fat_kcal = visionfit_core::measurement::kj_to_kcal(meal_kj) * template.fat_share;

    MealIdea {
        slot: template.slot.to_string(),
        name: template.name.to_string(),
        kj: meal_kj_rounded,
        protein_g: round_1dp(protein_kcal / 4.0),
        carbs_g: round_1dp(carbs_kcal / 4.0),
        fat_g: round_1dp(fat_kcal / 9.0),
        ingredients: template.ingredients.iter().map(|i| (*i).to_string()).collect(),
    }
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vegan_day_never_surfaces_a_dairy_or_meat_template() {
        let restrictions = vec![DietaryRestriction::Vegan];
        let meals = meal_ideas_for_day(10_000, &restrictions);
        assert_eq!(meals.len(), 4);
        for meal in &meals {
            assert!(
                !["Greek Yogurt Parfait", "Grilled Chicken Rice Bowl", "Baked Salmon with Sweet Potato", "Protein Shake with Almonds"]
                    .contains(&meal.name.as_str()),
                "{} is not vegan-safe",
                meal.name
            );
        }
    }

    #[test]
    fn no_restrictions_uses_the_first_template_per_slot() {
        let meals = meal_ideas_for_day(10_000, &[]);
        assert_eq!(meals[0].name, "Greek Yogurt Parfait");
        assert_eq!(meals[1].name, "Grilled Chicken Rice Bowl");
    }

    #[test]
    fn meal_energy_sums_close_to_the_daily_target() {
        let meals = meal_ideas_for_day(10_000, &[]);
        let total: i64 = meals.iter().map(|m| m.kj).sum();
        assert!((total - 10_000).abs() <= 5);
    }
}
