pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod service;
pub mod state;
pub mod substitution;

pub use error::{Result, SwapError};
pub use models::{MealPlan, MealSlot, RecipeRecord, SubstitutionCandidate, SubstitutionImpact};
pub use service::SubstitutionService;
