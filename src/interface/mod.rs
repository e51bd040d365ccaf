mod prompts;
mod render;

pub use prompts::{pick_candidate, prompt_yes_no, resolve_recipe};
pub use render::{display_candidates, display_history, display_impact, display_plan};
