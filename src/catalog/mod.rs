mod import;

pub use import::{import_catalog_csv, load_catalog, save_catalog};

use std::collections::HashMap;

use crate::error::{Result, SwapError};
use crate::models::{MealType, RecipeRecord};

/// Recipe lookup, consumed from an external catalog service.
///
/// Lookups are boundable upstream calls; implementations may fail with
/// `SwapError::UpstreamTimeout`, which callers treat as retryable.
pub trait RecipeCatalog {
    fn get_recipe(&self, id: &str) -> Result<RecipeRecord>;

    /// Recipes of the given meal type satisfying every dietary restriction.
    fn list_by_meal_type(
        &self,
        meal_type: MealType,
        dietary_restrictions: &[String],
    ) -> Result<Vec<RecipeRecord>>;
}

/// External user-preference signal in [0,1]; `None` means no signal exists
/// and the scorer falls back to the neutral midpoint.
pub trait PreferenceSource {
    fn preference(&self, user_id: Option<&str>, cuisine: &str) -> Result<Option<f64>>;
}

/// Catalog backed by an in-memory map, keyed by lowercase recipe id.
pub struct InMemoryCatalog {
    recipes: HashMap<String, RecipeRecord>,
}

impl InMemoryCatalog {
    /// Build from a list of recipes, deduplicating by lowercase id
    /// (last occurrence wins).
    pub fn new(recipes: Vec<RecipeRecord>) -> Self {
        let mut map = HashMap::new();
        for recipe in recipes {
            map.insert(recipe.key(), recipe);
        }
        Self { recipes: map }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn all_recipes(&self) -> Vec<&RecipeRecord> {
        let mut all: Vec<&RecipeRecord> = self.recipes.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

impl RecipeCatalog for InMemoryCatalog {
    fn get_recipe(&self, id: &str) -> Result<RecipeRecord> {
        self.recipes
            .get(&id.to_lowercase())
            .cloned()
            .ok_or_else(|| SwapError::RecipeNotFound(id.to_string()))
    }

    fn list_by_meal_type(
        &self,
        meal_type: MealType,
        dietary_restrictions: &[String],
    ) -> Result<Vec<RecipeRecord>> {
        let mut matches: Vec<RecipeRecord> = self
            .recipes
            .values()
            .filter(|r| r.meal_type == meal_type)
            .filter(|r| r.satisfies_restrictions(dietary_restrictions))
            .cloned()
            .collect();
        // Stable output regardless of map iteration order
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches)
    }
}

/// Preference source with no data: every lookup is a neutral miss.
pub struct NeutralPreference;

impl PreferenceSource for NeutralPreference {
    fn preference(&self, _user_id: Option<&str>, _cuisine: &str) -> Result<Option<f64>> {
        Ok(None)
    }
}

/// Fixed per-cuisine preferences, keyed case-insensitively.
pub struct StaticPreferences {
    by_cuisine: HashMap<String, f64>,
}

impl StaticPreferences {
    pub fn new(prefs: impl IntoIterator<Item = (String, f64)>) -> Self {
        let by_cuisine = prefs
            .into_iter()
            .map(|(cuisine, score)| (cuisine.to_lowercase(), score.clamp(0.0, 1.0)))
            .collect();
        Self { by_cuisine }
    }
}

impl PreferenceSource for StaticPreferences {
    fn preference(&self, _user_id: Option<&str>, cuisine: &str) -> Result<Option<f64>> {
        Ok(self.by_cuisine.get(&cuisine.to_lowercase()).copied())
    }
}
