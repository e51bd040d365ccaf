use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::catalog::RecipeCatalog;
use crate::error::{Result, SwapError};
use crate::models::{MealPlan, SlotSnapshot, SubstitutionHistoryEntry};
use crate::state::store::PlanStore;

/// Per-plan mutual exclusion. Apply and undo on the same plan are serialized;
/// different plans proceed in parallel. Reads never take these locks and rely
/// on the plan revision counter instead.
#[derive(Default)]
pub struct PlanLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PlanLocks {
    pub fn handle(&self, plan_id: &str) -> Arc<Mutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(plan_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Transactional apply/undo over a plan's meal slots.
///
/// All mutation happens on clones of the loaded state; a single `commit`
/// persists the plan and its history together, so a failure at any earlier
/// step leaves the stored plan untouched.
pub struct TransactionManager<'a> {
    pub catalog: &'a dyn RecipeCatalog,
    pub store: &'a dyn PlanStore,
    pub locks: &'a PlanLocks,
}

impl TransactionManager<'_> {
    /// Replace one slot's recipe and record a reversible history entry.
    ///
    /// `expected_revision` is the optimistic-concurrency token: pass the
    /// revision observed at candidate generation or preview time, and the
    /// apply fails with `ConcurrentModification` if the plan has moved on.
    /// `None` skips the check.
    pub fn apply(
        &self,
        plan_id: &str,
        slot_index: usize,
        new_recipe_id: &str,
        expected_revision: Option<u64>,
    ) -> Result<MealPlan> {
        let lock = self.locks.handle(plan_id);
        let _guard = lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut plan = self.store.load_plan(plan_id)?;

        if let Some(expected) = expected_revision {
            if plan.revision != expected {
                return Err(SwapError::ConcurrentModification {
                    plan_id: plan_id.to_string(),
                    expected,
                    actual: plan.revision,
                });
            }
        }

        let recipe = self.catalog.get_recipe(new_recipe_id)?;

        let slot_count = plan.slots.len();
        let slot = plan
            .slots
            .get_mut(slot_index)
            .ok_or_else(|| SwapError::SlotNotFound {
                plan_id: plan_id.to_string(),
                slot_index,
                slot_count,
            })?;

        let previous = SlotSnapshot {
            recipe_id: slot.recipe_id.clone(),
            recipe_name: slot.recipe_name.clone(),
            nutrition: slot.nutrition,
            estimated_cost: slot.estimated_cost,
            score: slot.score,
        };

        slot.assign(&recipe, None);

        let replacement = SlotSnapshot {
            recipe_id: slot.recipe_id.clone(),
            recipe_name: slot.recipe_name.clone(),
            nutrition: slot.nutrition,
            estimated_cost: slot.estimated_cost,
            score: slot.score,
        };

        plan.recompute_aggregates();
        plan.revision += 1;

        let mut history = self.store.load_history(plan_id)?;
        history.push(SubstitutionHistoryEntry {
            applied_at: Utc::now(),
            plan_id: plan_id.to_string(),
            slot_index,
            previous,
            replacement,
        });

        self.store.commit(&plan, &history)?;
        Ok(plan)
    }

    /// Revert the most recently applied substitution.
    pub fn undo(&self, plan_id: &str) -> Result<MealPlan> {
        let lock = self.locks.handle(plan_id);
        let _guard = lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut plan = self.store.load_plan(plan_id)?;
        let mut history = self.store.load_history(plan_id)?;

        let entry = history
            .pop()
            .ok_or_else(|| SwapError::NoHistoryToUndo(plan_id.to_string()))?;

        let slot_count = plan.slots.len();
        let slot = plan
            .slots
            .get_mut(entry.slot_index)
            .ok_or_else(|| SwapError::SlotNotFound {
                plan_id: plan_id.to_string(),
                slot_index: entry.slot_index,
                slot_count,
            })?;

        slot.recipe_id = entry.previous.recipe_id.clone();
        slot.recipe_name = entry.previous.recipe_name.clone();
        slot.nutrition = entry.previous.nutrition;
        slot.estimated_cost = entry.previous.estimated_cost;
        slot.score = entry.previous.score;

        plan.recompute_aggregates();
        plan.revision += 1;

        self.store.commit(&plan, &history)?;
        Ok(plan)
    }
}
