use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SwapError;
use crate::models::NutritionFacts;

/// Which slot of the day a recipe is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MealType {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(SwapError::InvalidInput(format!(
                "Unknown meal type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Difficulty {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(SwapError::InvalidInput(format!(
                "Unknown difficulty: {}",
                other
            ))),
        }
    }
}

/// A catalog recipe with per-serving nutrition and cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    pub cuisine: String,
    pub difficulty: Difficulty,
    /// Dietary tags the recipe satisfies (e.g. "vegetarian", "gluten-free").
    #[serde(default)]
    pub tags: Vec<String>,
    pub nutrition_per_serving: NutritionFacts,
    pub cost_per_serving: f64,
}

impl RecipeRecord {
    /// Canonical key for lookups (lowercase id).
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }

    /// Whether the recipe carries every required dietary tag.
    pub fn satisfies_restrictions(&self, restrictions: &[String]) -> bool {
        restrictions.iter().all(|r| {
            self.tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case(r.trim()))
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && !self.name.is_empty()
            && self.cost_per_serving >= 0.0
            && self.nutrition_per_serving.is_valid()
    }
}
