mod manager;
mod store;

pub use manager::{PlanLocks, TransactionManager};
pub use store::{JsonPlanStore, MemoryPlanStore, PlanStore};
