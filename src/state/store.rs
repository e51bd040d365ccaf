use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};
use crate::models::{MealPlan, SubstitutionHistory};

/// Persistence seam for plans and their substitution history.
///
/// `commit` must persist the plan and its history together; the transaction
/// manager relies on this to keep aggregates and the undo log consistent.
pub trait PlanStore {
    fn load_plan(&self, plan_id: &str) -> Result<MealPlan>;

    /// History for a plan; a plan with no recorded substitutions yields an
    /// empty history, not an error.
    fn load_history(&self, plan_id: &str) -> Result<SubstitutionHistory>;

    /// Atomically persist a plan and its history.
    fn commit(&self, plan: &MealPlan, history: &SubstitutionHistory) -> Result<()>;
}

fn lock_recovering<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory store, used by tests and as the default for embedded callers.
#[derive(Default)]
pub struct MemoryPlanStore {
    plans: Mutex<HashMap<String, MealPlan>>,
    history: Mutex<HashMap<String, SubstitutionHistory>>,
}

impl MemoryPlanStore {
    pub fn new(plans: Vec<MealPlan>) -> Self {
        let store = Self::default();
        {
            let mut map = lock_recovering(&store.plans);
            for plan in plans {
                map.insert(plan.id.clone(), plan);
            }
        }
        store
    }

    pub fn insert_plan(&self, plan: MealPlan) {
        lock_recovering(&self.plans).insert(plan.id.clone(), plan);
    }
}

impl PlanStore for MemoryPlanStore {
    fn load_plan(&self, plan_id: &str) -> Result<MealPlan> {
        lock_recovering(&self.plans)
            .get(plan_id)
            .cloned()
            .ok_or_else(|| SwapError::PlanNotFound(plan_id.to_string()))
    }

    fn load_history(&self, plan_id: &str) -> Result<SubstitutionHistory> {
        Ok(lock_recovering(&self.history)
            .get(plan_id)
            .cloned()
            .unwrap_or_default())
    }

    fn commit(&self, plan: &MealPlan, history: &SubstitutionHistory) -> Result<()> {
        // Hold both guards so no reader sees a half-applied commit
        let mut plans = lock_recovering(&self.plans);
        let mut histories = lock_recovering(&self.history);
        plans.insert(plan.id.clone(), plan.clone());
        histories.insert(plan.id.clone(), history.clone());
        Ok(())
    }
}

/// On-disk state: plans and histories keyed by plan id.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    plans: HashMap<String, MealPlan>,
    #[serde(default)]
    history: HashMap<String, SubstitutionHistory>,
}

/// Whole-file JSON store. Each commit rewrites the file in one write, so a
/// plan and its history can never be persisted out of step.
pub struct JsonPlanStore {
    path: PathBuf,
    /// Serializes file access within the process.
    file_lock: Mutex<()>,
}

impl JsonPlanStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file_lock: Mutex::new(()),
        }
    }

    fn read_state(&self) -> Result<StateFile> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_state(&self, state: &StateFile) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Add or replace a plan outside the substitution flow (seeding, import).
    pub fn put_plan(&self, plan: &MealPlan) -> Result<()> {
        let _guard = lock_recovering(&self.file_lock);
        let mut state = self.read_state()?;
        state.plans.insert(plan.id.clone(), plan.clone());
        self.write_state(&state)
    }

    pub fn plan_ids(&self) -> Result<Vec<String>> {
        let _guard = lock_recovering(&self.file_lock);
        let state = self.read_state()?;
        let mut ids: Vec<String> = state.plans.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

impl PlanStore for JsonPlanStore {
    fn load_plan(&self, plan_id: &str) -> Result<MealPlan> {
        let _guard = lock_recovering(&self.file_lock);
        let state = self.read_state()?;
        state
            .plans
            .get(plan_id)
            .cloned()
            .ok_or_else(|| SwapError::PlanNotFound(plan_id.to_string()))
    }

    fn load_history(&self, plan_id: &str) -> Result<SubstitutionHistory> {
        let _guard = lock_recovering(&self.file_lock);
        let state = self.read_state()?;
        Ok(state.history.get(plan_id).cloned().unwrap_or_default())
    }

    fn commit(&self, plan: &MealPlan, history: &SubstitutionHistory) -> Result<()> {
        let _guard = lock_recovering(&self.file_lock);
        let mut state = self.read_state()?;
        state.plans.insert(plan.id.clone(), plan.clone());
        state.history.insert(plan.id.clone(), history.clone());
        self.write_state(&state)
    }
}
