use serde::{Deserialize, Serialize};

use crate::models::{MealType, NutritionFacts, RecipeRecord};

/// One (day, meal type) position in a plan, holding a single recipe assignment.
///
/// `nutrition` and `estimated_cost` are snapshots already scaled to `servings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSlot {
    pub day: u32,
    pub meal_type: MealType,
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Suitability score the planner assigned when the slot was filled.
    #[serde(default)]
    pub score: Option<f64>,
    pub estimated_cost: f64,
    pub nutrition: NutritionFacts,
}

fn default_servings() -> u32 {
    1
}

impl MealSlot {
    /// Replace the slot's recipe with a catalog record, scaled to the slot's servings.
    pub fn assign(&mut self, recipe: &RecipeRecord, score: Option<f64>) {
        let factor = self.servings as f64;
        self.recipe_id = recipe.id.clone();
        self.recipe_name = recipe.name.clone();
        self.nutrition = recipe.nutrition_per_serving.scaled(factor);
        self.estimated_cost = recipe.cost_per_serving * factor;
        self.score = score;
    }
}

/// A multi-day meal plan.
///
/// `total_nutrition` and `total_cost` are derived sums over all slots; they are
/// recomputed after every slot mutation and never edited independently.
/// `revision` increments on every committed mutation and serves as the
/// optimistic-concurrency token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub slots: Vec<MealSlot>,
    #[serde(default)]
    pub total_nutrition: NutritionFacts,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub budget_target: Option<f64>,
    #[serde(default)]
    pub revision: u64,
}

impl MealPlan {
    /// Get a slot by index.
    pub fn slot(&self, index: usize) -> Option<&MealSlot> {
        self.slots.get(index)
    }

    /// Recompute aggregate nutrition and cost from all slot snapshots.
    pub fn recompute_aggregates(&mut self) {
        let mut nutrition = NutritionFacts::default();
        let mut cost = 0.0;
        for slot in &self.slots {
            nutrition.add(&slot.nutrition);
            cost += slot.estimated_cost;
        }
        self.total_nutrition = nutrition;
        self.total_cost = cost;
    }

    /// Whether stored aggregates match a fresh recomputation.
    pub fn aggregates_consistent(&self, tol: f64) -> bool {
        let mut check = self.clone();
        check.recompute_aggregates();
        self.total_nutrition.approx_eq(&check.total_nutrition, tol)
            && (self.total_cost - check.total_cost).abs() < tol
    }
}
