use clap::{Parser, Subcommand};

use crate::substitution::constants::{DEFAULT_MAX_ALTERNATIVES, DEFAULT_NUTRITIONAL_TOLERANCE};

/// MealSwap — scored meal substitutions with impact preview and undo.
#[derive(Parser, Debug)]
#[command(name = "meal_swap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the plan state JSON file (plans + substitution history).
    #[arg(short, long, default_value = "plan_state.json")]
    pub plans: String,

    /// Path to the recipe catalog JSON file.
    #[arg(short, long, default_value = "catalog.json")]
    pub catalog: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List scored substitution candidates for a meal slot.
    Substitutes {
        /// Meal plan id.
        plan: String,

        /// Slot index within the plan.
        slot: usize,

        /// Maximum number of alternatives to return.
        #[arg(long, default_value_t = DEFAULT_MAX_ALTERNATIVES)]
        max: usize,

        /// Fractional calorie tolerance for similarity scoring.
        #[arg(long, default_value_t = DEFAULT_NUTRITIONAL_TOLERANCE)]
        tolerance: f64,
    },

    /// Preview the nutrient/cost impact of a substitution without applying it.
    Preview {
        plan: String,
        slot: usize,

        /// Recipe id or name (fuzzy-matched).
        recipe: String,
    },

    /// Apply a substitution. Without a recipe argument, picks interactively
    /// from the ranked candidates.
    Apply {
        plan: String,
        slot: usize,

        /// Recipe id or name (fuzzy-matched); omit to choose interactively.
        recipe: Option<String>,

        /// Expected plan revision; fails if the plan changed since observed.
        #[arg(long)]
        revision: Option<u64>,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Undo the most recent substitution on a plan.
    Undo { plan: String },

    /// Show a plan's substitution history.
    History { plan: String },

    /// Import recipes from a CSV file into the catalog JSON.
    ImportCatalog {
        /// CSV file with id,name,meal_type,cuisine,difficulty,tags,calories,
        /// protein_g,carbs_g,fat_g,cost_per_serving columns.
        csv: String,
    },
}
