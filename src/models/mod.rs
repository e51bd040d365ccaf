mod nutrition;
mod plan;
mod recipe;
mod substitution;

pub use nutrition::NutritionFacts;
pub use plan::{MealPlan, MealSlot};
pub use recipe::{Difficulty, MealType, RecipeRecord};
pub use substitution::{
    ImpactLevel, ScoreGrade, SlotSnapshot, SubstitutionCandidate, SubstitutionHistory,
    SubstitutionHistoryEntry, SubstitutionImpact,
};
