use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{MealSlot, RecipeRecord, ScoreGrade, SubstitutionCandidate};
use crate::substitution::config::{ImpactThresholds, ScoringConfig};
use crate::substitution::constants::{
    DIST_WEIGHT_CALORIES, DIST_WEIGHT_CARBS, DIST_WEIGHT_FAT, DIST_WEIGHT_PROTEIN,
};
use crate::substitution::impact::analyze_impact;

/// Relative difference capped at 1, so one wildly-off nutrient cannot push the
/// weighted distance past the unit range.
fn capped_relative_diff(candidate: f64, original: f64) -> f64 {
    if original <= 0.0 {
        return if candidate <= 0.0 { 0.0 } else { 1.0 };
    }
    ((candidate - original).abs() / original).min(1.0)
}

/// Nutritional similarity in [0,1]: 1 minus the weighted relative distance
/// across calories, protein, carbs, and fat. Closer nutrition scores higher.
pub fn nutritional_similarity(slot: &MealSlot, recipe: &RecipeRecord) -> f64 {
    let scaled = recipe.nutrition_per_serving.scaled(slot.servings as f64);
    let original = &slot.nutrition;

    let distance = DIST_WEIGHT_CALORIES * capped_relative_diff(scaled.calories, original.calories)
        + DIST_WEIGHT_PROTEIN * capped_relative_diff(scaled.protein_g, original.protein_g)
        + DIST_WEIGHT_CARBS * capped_relative_diff(scaled.carbs_g, original.carbs_g)
        + DIST_WEIGHT_FAT * capped_relative_diff(scaled.fat_g, original.fat_g);

    (1.0 - distance).clamp(0.0, 1.0)
}

/// Cost efficiency in [0,1]: at or below the original cost scores 1; above it,
/// the score falls with the relative cost increase.
pub fn cost_efficiency(slot: &MealSlot, recipe: &RecipeRecord) -> f64 {
    let candidate_cost = recipe.cost_per_serving * slot.servings as f64;
    if candidate_cost <= slot.estimated_cost {
        return 1.0;
    }
    if slot.estimated_cost <= 0.0 {
        return 0.0;
    }
    let increase = (candidate_cost - slot.estimated_cost) / slot.estimated_cost;
    (1.0 - increase).clamp(0.0, 1.0)
}

/// Score a single candidate against the slot it would replace.
///
/// `preference` is the external user-preference signal in [0,1] (callers pass
/// the neutral midpoint when no signal exists).
pub fn score_candidate(
    slot: &MealSlot,
    recipe: &RecipeRecord,
    preference: f64,
    config: &ScoringConfig,
    thresholds: &ImpactThresholds,
) -> Result<SubstitutionCandidate> {
    config.validate()?;
    thresholds.validate()?;

    let similarity = nutritional_similarity(slot, recipe);
    let preference = preference.clamp(0.0, 1.0);
    let efficiency = cost_efficiency(slot, recipe);

    let total_score = config.nutrition_weight * similarity
        + config.preference_weight * preference
        + config.cost_weight * efficiency;

    let servings = slot.servings as f64;
    let impact = analyze_impact(slot, recipe, thresholds);

    Ok(SubstitutionCandidate {
        recipe_id: recipe.id.clone(),
        recipe_name: recipe.name.clone(),
        cuisine: recipe.cuisine.clone(),
        difficulty: recipe.difficulty,
        nutrition: recipe.nutrition_per_serving.scaled(servings),
        estimated_cost: recipe.cost_per_serving * servings,
        nutritional_similarity: similarity,
        user_preference: preference,
        cost_efficiency: efficiency,
        total_score,
        score_grade: ScoreGrade::from_score(total_score),
        impact,
    })
}

/// Rank candidates: total score descending, ties broken by lower cost, then
/// by recipe id for determinism. Truncates to `max_alternatives`.
pub fn rank_candidates(
    mut candidates: Vec<SubstitutionCandidate>,
    max_alternatives: usize,
) -> Vec<SubstitutionCandidate> {
    candidates.sort_by(|a, b| {
        match b.total_score.partial_cmp(&a.total_score) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        match a.estimated_cost.partial_cmp(&b.estimated_cost) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        a.recipe_id.cmp(&b.recipe_id)
    });
    candidates.truncate(max_alternatives);
    candidates
}
