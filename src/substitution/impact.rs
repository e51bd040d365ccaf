use crate::models::{ImpactLevel, MealSlot, RecipeRecord, SubstitutionImpact};
use crate::substitution::config::ImpactThresholds;

/// Classify the severity of a calorie change relative to the original slot.
///
/// A zero-calorie original has no meaningful baseline: any nonzero change is
/// significant, no change is minimal.
pub fn classify_impact(
    calories_delta: f64,
    original_calories: f64,
    thresholds: &ImpactThresholds,
) -> ImpactLevel {
    if original_calories <= 0.0 {
        return if calories_delta.abs() < f64::EPSILON {
            ImpactLevel::Minimal
        } else {
            ImpactLevel::Significant
        };
    }

    let magnitude = calories_delta.abs() / original_calories;
    if magnitude < thresholds.minimal_below {
        ImpactLevel::Minimal
    } else if magnitude < thresholds.moderate_below {
        ImpactLevel::Moderate
    } else {
        ImpactLevel::Significant
    }
}

/// Compute the signed nutrient and cost deltas of replacing a slot's recipe
/// with a candidate, scaled to the slot's serving count.
///
/// Pure preview: no plan state is touched, and identical inputs always
/// produce identical output.
pub fn analyze_impact(
    slot: &MealSlot,
    candidate: &RecipeRecord,
    thresholds: &ImpactThresholds,
) -> SubstitutionImpact {
    let servings = slot.servings as f64;
    let candidate_nutrition = candidate.nutrition_per_serving.scaled(servings);
    let delta = candidate_nutrition.delta_from(&slot.nutrition);
    let cost_delta = candidate.cost_per_serving * servings - slot.estimated_cost;

    SubstitutionImpact {
        calories_delta: delta.calories,
        protein_delta: delta.protein_g,
        carbs_delta: delta.carbs_g,
        fat_delta: delta.fat_g,
        cost_delta,
        impact_level: classify_impact(delta.calories, slot.nutrition.calories, thresholds),
    }
}
