use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::error::{Result, SwapError};
use crate::models::{RecipeRecord, SubstitutionCandidate};

/// Minimum fuzzy-match similarity before we suggest a recipe by name.
const FUZZY_MATCH_THRESHOLD: f64 = 0.80;

/// Resolve user input to a recipe id: exact id, then exact name, then fuzzy
/// name match (confirmed interactively).
pub fn resolve_recipe(recipes: &[&RecipeRecord], input: &str) -> Result<String> {
    let input = input.trim();

    if let Some(recipe) = recipes.iter().find(|r| r.id.eq_ignore_ascii_case(input)) {
        return Ok(recipe.id.clone());
    }

    if let Some(recipe) = recipes.iter().find(|r| r.name.eq_ignore_ascii_case(input)) {
        return Ok(recipe.id.clone());
    }

    // Fuzzy fallback: best jaro-winkler match over names
    let mut best: Option<(&&RecipeRecord, f64)> = None;
    for recipe in recipes {
        let score = jaro_winkler(&recipe.name.to_lowercase(), &input.to_lowercase());
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((recipe, score));
        }
    }

    if let Some((recipe, score)) = best {
        if score >= FUZZY_MATCH_THRESHOLD {
            let accept = Confirm::new()
                .with_prompt(format!("Did you mean \"{}\" ({})?", recipe.name, recipe.id))
                .default(true)
                .interact()?;
            if accept {
                return Ok(recipe.id.clone());
            }
        }
    }

    Err(SwapError::RecipeNotFound(input.to_string()))
}

/// Let the user pick one of the ranked candidates; `None` means they bailed.
pub fn pick_candidate(candidates: &[SubstitutionCandidate]) -> Result<Option<usize>> {
    let mut items: Vec<String> = candidates
        .iter()
        .map(|c| {
            format!(
                "{} [{}] {:.2} | {:.0} kcal | ${:.2}",
                c.recipe_name, c.score_grade, c.total_score, c.nutrition.calories, c.estimated_cost
            )
        })
        .collect();
    items.push("Cancel".to_string());

    let selection = Select::new()
        .with_prompt("Choose a substitute")
        .items(&items)
        .default(0)
        .interact()?;

    if selection == candidates.len() {
        Ok(None)
    } else {
        Ok(Some(selection))
    }
}

/// Yes/no confirmation with a default.
pub fn prompt_yes_no(message: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?)
}
