use crate::catalog::RecipeCatalog;
use crate::error::{Result, SwapError};
use crate::models::{MealPlan, RecipeRecord};
use crate::substitution::config::SubstitutionLimits;
use crate::substitution::constants::HARD_BOUND_FACTOR;

/// Produce the eligible replacement recipes for one slot.
///
/// Filters the catalog to the slot's meal type and the plan's dietary
/// restrictions, drops the currently assigned recipe, and excludes recipes
/// whose calories (scaled to the slot's servings) deviate from the original
/// by more than twice the nutritional tolerance. Inside that bound the
/// deviation only lowers the similarity sub-score.
///
/// Returns an empty list, not an error, when nothing survives filtering.
pub fn generate_candidates(
    catalog: &dyn RecipeCatalog,
    plan: &MealPlan,
    slot_index: usize,
    limits: &SubstitutionLimits,
) -> Result<Vec<RecipeRecord>> {
    limits.validate()?;

    let slot = plan.slot(slot_index).ok_or_else(|| SwapError::SlotNotFound {
        plan_id: plan.id.clone(),
        slot_index,
        slot_count: plan.slots.len(),
    })?;

    let pool = catalog.list_by_meal_type(slot.meal_type, &plan.dietary_restrictions)?;

    let hard_bound = limits.nutritional_tolerance * HARD_BOUND_FACTOR;
    let servings = slot.servings as f64;
    let original_calories = slot.nutrition.calories;

    let candidates = pool
        .into_iter()
        .filter(|recipe| !recipe.id.eq_ignore_ascii_case(&slot.recipe_id))
        .filter(|recipe| {
            if original_calories <= 0.0 {
                // No baseline to deviate from; leave it to the scorer.
                return true;
            }
            let candidate_calories = recipe.nutrition_per_serving.calories * servings;
            let deviation = (candidate_calories - original_calories).abs() / original_calories;
            deviation <= hard_bound
        })
        .collect();

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::{Difficulty, MealSlot, MealType, NutritionFacts};

    fn recipe(id: &str, meal_type: MealType, calories: f64, tags: &[&str]) -> RecipeRecord {
        RecipeRecord {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            meal_type,
            cuisine: "generic".to_string(),
            difficulty: Difficulty::Easy,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            nutrition_per_serving: NutritionFacts::new(calories, 20.0, 50.0, 15.0),
            cost_per_serving: 3.0,
        }
    }

    fn plan_with_dinner_slot(calories: f64) -> MealPlan {
        let mut plan = MealPlan {
            id: "mp1".to_string(),
            user_id: None,
            dietary_restrictions: vec![],
            slots: vec![MealSlot {
                day: 0,
                meal_type: MealType::Dinner,
                recipe_id: "r10".to_string(),
                recipe_name: "Current".to_string(),
                servings: 1,
                score: None,
                estimated_cost: 3.0,
                nutrition: NutritionFacts::new(calories, 20.0, 50.0, 15.0),
            }],
            total_nutrition: NutritionFacts::default(),
            total_cost: 0.0,
            budget_target: None,
            revision: 0,
        };
        plan.recompute_aggregates();
        plan
    }

    #[test]
    fn test_excludes_current_recipe_and_other_meal_types() {
        let catalog = InMemoryCatalog::new(vec![
            recipe("r10", MealType::Dinner, 500.0, &[]),
            recipe("r11", MealType::Dinner, 520.0, &[]),
            recipe("r12", MealType::Breakfast, 500.0, &[]),
        ]);
        let plan = plan_with_dinner_slot(500.0);

        let candidates =
            generate_candidates(&catalog, &plan, 0, &SubstitutionLimits::default()).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["r11"]);
    }

    #[test]
    fn test_hard_calorie_bound() {
        // Tolerance 0.15 -> hard bound 0.30: 650 kcal vs 500 is inside (0.30),
        // 700 is outside (0.40).
        let catalog = InMemoryCatalog::new(vec![
            recipe("near", MealType::Dinner, 650.0, &[]),
            recipe("far", MealType::Dinner, 700.0, &[]),
        ]);
        let plan = plan_with_dinner_slot(500.0);

        let candidates =
            generate_candidates(&catalog, &plan, 0, &SubstitutionLimits::default()).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["near"]);
    }

    #[test]
    fn test_dietary_restrictions_filter() {
        let catalog = InMemoryCatalog::new(vec![
            recipe("veg", MealType::Dinner, 500.0, &["vegetarian"]),
            recipe("meat", MealType::Dinner, 500.0, &[]),
        ]);
        let mut plan = plan_with_dinner_slot(500.0);
        plan.dietary_restrictions = vec!["vegetarian".to_string()];

        let candidates =
            generate_candidates(&catalog, &plan, 0, &SubstitutionLimits::default()).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["veg"]);
    }

    #[test]
    fn test_invalid_slot_index() {
        let catalog = InMemoryCatalog::new(vec![]);
        let plan = plan_with_dinner_slot(500.0);

        let err =
            generate_candidates(&catalog, &plan, 7, &SubstitutionLimits::default()).unwrap_err();
        assert!(matches!(err, SwapError::SlotNotFound { slot_index: 7, .. }));
    }

    #[test]
    fn test_empty_pool_is_not_an_error() {
        let catalog = InMemoryCatalog::new(vec![recipe("r10", MealType::Dinner, 500.0, &[])]);
        let plan = plan_with_dinner_slot(500.0);

        let candidates =
            generate_candidates(&catalog, &plan, 0, &SubstitutionLimits::default()).unwrap();
        assert!(candidates.is_empty());
    }
}
