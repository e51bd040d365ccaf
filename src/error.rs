use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Meal plan not found: {0}")]
    PlanNotFound(String),

    #[error("Slot {slot_index} not found in plan {plan_id} ({slot_count} slots)")]
    SlotNotFound {
        plan_id: String,
        slot_index: usize,
        slot_count: usize,
    },

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("No substitution to undo for plan {0}")]
    NoHistoryToUndo(String),

    #[error("Plan {plan_id} changed (revision {actual}, expected {expected}); refresh and retry")]
    ConcurrentModification {
        plan_id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Upstream lookup timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl SwapError {
    /// Whether the caller can expect a retry (after a refresh or backoff) to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SwapError::ConcurrentModification { .. } | SwapError::UpstreamTimeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SwapError>;
