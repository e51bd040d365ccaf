use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SwapError};
use crate::models::{NutritionFacts, RecipeRecord};

/// Load a recipe catalog from a JSON file.
///
/// Deduplicates by lowercase id (last occurrence wins) and rejects records
/// that fail basic validation.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<RecipeRecord>> {
    let content = fs::read_to_string(path)?;
    let recipes: Vec<RecipeRecord> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, RecipeRecord> = HashMap::new();
    for recipe in recipes {
        if !recipe.is_valid() {
            return Err(SwapError::InvalidInput(format!(
                "Invalid recipe record: {}",
                recipe.id
            )));
        }
        seen.insert(recipe.key(), recipe);
    }

    let mut deduped: Vec<RecipeRecord> = seen.into_values().collect();
    deduped.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(deduped)
}

/// Save a recipe catalog to a JSON file, deduplicated by lowercase id.
pub fn save_catalog<P: AsRef<Path>>(path: P, recipes: &[RecipeRecord]) -> Result<()> {
    let mut seen: HashMap<String, &RecipeRecord> = HashMap::new();
    for recipe in recipes {
        seen.insert(recipe.key(), recipe);
    }

    let mut deduped: Vec<&RecipeRecord> = seen.into_values().collect();
    deduped.sort_by(|a, b| a.id.cmp(&b.id));
    let json = serde_json::to_string_pretty(&deduped)?;
    fs::write(path, json)?;
    Ok(())
}

/// Raw CSV row; enums and tags arrive as plain strings.
#[derive(Debug, Deserialize)]
struct CsvRecipeRow {
    id: String,
    name: String,
    meal_type: String,
    cuisine: String,
    difficulty: String,
    /// Semicolon-separated dietary tags.
    #[serde(default)]
    tags: String,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    cost_per_serving: f64,
}

/// Import recipes from a CSV file with headers
/// `id,name,meal_type,cuisine,difficulty,tags,calories,protein_g,carbs_g,fat_g,cost_per_serving`.
pub fn import_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RecipeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut recipes = Vec::new();

    for row in reader.deserialize() {
        let row: CsvRecipeRow = row?;
        let recipe = RecipeRecord {
            meal_type: row.meal_type.parse()?,
            difficulty: row.difficulty.parse()?,
            tags: row
                .tags
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            nutrition_per_serving: NutritionFacts::new(
                row.calories,
                row.protein_g,
                row.carbs_g,
                row.fat_g,
            ),
            id: row.id,
            name: row.name,
            cuisine: row.cuisine,
            cost_per_serving: row.cost_per_serving,
        };

        if !recipe.is_valid() {
            return Err(SwapError::InvalidInput(format!(
                "Invalid recipe row: {}",
                recipe.id
            )));
        }
        recipes.push(recipe);
    }

    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, MealType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_catalog_json_round_trip() {
        let json = r#"[
            {
                "id": "r10",
                "name": "Lentil Curry",
                "meal_type": "dinner",
                "cuisine": "indian",
                "difficulty": "easy",
                "tags": ["vegetarian"],
                "nutrition_per_serving": {"calories": 500, "protein_g": 18, "carbs_g": 70, "fat_g": 12},
                "cost_per_serving": 3.0
            }
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let recipes = load_catalog(file.path()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].meal_type, MealType::Dinner);

        let out = NamedTempFile::new().unwrap();
        save_catalog(out.path(), &recipes).unwrap();
        let reloaded = load_catalog(out.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "Lentil Curry");
    }

    #[test]
    fn test_csv_import() {
        let csv_data = "\
id,name,meal_type,cuisine,difficulty,tags,calories,protein_g,carbs_g,fat_g,cost_per_serving
r42,Pad Thai,dinner,thai,medium,gluten-free; quick,650,22,80,20,4.50
r43,Oatmeal,breakfast,american,easy,,350,12,60,6,1.20
";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv_data.as_bytes()).unwrap();

        let recipes = import_catalog_csv(file.path()).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].difficulty, Difficulty::Medium);
        assert_eq!(
            recipes[0].tags,
            vec!["gluten-free".to_string(), "quick".to_string()]
        );
        assert!(recipes[1].tags.is_empty());
        assert!((recipes[0].cost_per_serving - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_csv_rejects_unknown_meal_type() {
        let csv_data = "\
id,name,meal_type,cuisine,difficulty,tags,calories,protein_g,carbs_g,fat_g,cost_per_serving
r1,Mystery,brunch,fusion,easy,,400,10,40,10,2.00
";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv_data.as_bytes()).unwrap();

        assert!(import_catalog_csv(file.path()).is_err());
    }
}
