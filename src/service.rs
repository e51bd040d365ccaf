use serde::Serialize;

use crate::catalog::{PreferenceSource, RecipeCatalog};
use crate::error::{Result, SwapError};
use crate::models::{MealPlan, SubstitutionCandidate, SubstitutionHistoryEntry, SubstitutionImpact};
use crate::state::{PlanLocks, PlanStore, TransactionManager};
use crate::substitution::constants::NEUTRAL_PREFERENCE;
use crate::substitution::{
    analyze_impact, generate_candidates, rank_candidates, score_candidate, ImpactThresholds,
    ScoringConfig, SubstitutionLimits,
};

/// Ranked alternatives for one slot, plus the plan revision they were
/// computed against (the token to pass back when applying).
#[derive(Debug, Serialize)]
pub struct SubstitutesResponse {
    pub plan_revision: u64,
    pub alternatives: Vec<SubstitutionCandidate>,
}

/// Pure preview of one substitution; nothing is mutated.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub plan_revision: u64,
    pub impact: SubstitutionImpact,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<SubstitutionHistoryEntry>,
    pub can_undo: bool,
}

/// The substitution subsystem's request/response surface: candidate listing,
/// impact preview, transactional apply, undo, and history.
pub struct SubstitutionService<C, P, S> {
    catalog: C,
    preferences: P,
    store: S,
    scoring: ScoringConfig,
    thresholds: ImpactThresholds,
    locks: PlanLocks,
}

impl<C, P, S> SubstitutionService<C, P, S>
where
    C: RecipeCatalog,
    P: PreferenceSource,
    S: PlanStore,
{
    pub fn new(catalog: C, preferences: P, store: S) -> Self {
        Self::with_config(
            catalog,
            preferences,
            store,
            ScoringConfig::default(),
            ImpactThresholds::default(),
        )
    }

    pub fn with_config(
        catalog: C,
        preferences: P,
        store: S,
        scoring: ScoringConfig,
        thresholds: ImpactThresholds,
    ) -> Self {
        Self {
            catalog,
            preferences,
            store,
            scoring,
            thresholds,
            locks: PlanLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    fn manager(&self) -> TransactionManager<'_> {
        TransactionManager {
            catalog: &self.catalog,
            store: &self.store,
            locks: &self.locks,
        }
    }

    /// Generate, score, and rank replacement candidates for one slot.
    ///
    /// Read-only; an empty list means no eligible alternatives, not a failure.
    pub fn get_substitutes(
        &self,
        plan_id: &str,
        slot_index: usize,
        limits: &SubstitutionLimits,
    ) -> Result<SubstitutesResponse> {
        let plan = self.store.load_plan(plan_id)?;
        let pool = generate_candidates(&self.catalog, &plan, slot_index, limits)?;

        // Slot presence was validated by the generator
        let slot = &plan.slots[slot_index];
        let user_id = plan.user_id.as_deref();

        let mut scored = Vec::with_capacity(pool.len());
        for recipe in &pool {
            let preference = self
                .preferences
                .preference(user_id, &recipe.cuisine)?
                .unwrap_or(NEUTRAL_PREFERENCE);
            scored.push(score_candidate(
                slot,
                recipe,
                preference,
                &self.scoring,
                &self.thresholds,
            )?);
        }

        Ok(SubstitutesResponse {
            plan_revision: plan.revision,
            alternatives: rank_candidates(scored, limits.max_alternatives),
        })
    }

    /// Preview the impact of a substitution without touching plan state.
    pub fn preview_substitution(
        &self,
        plan_id: &str,
        slot_index: usize,
        new_recipe_id: &str,
    ) -> Result<PreviewResponse> {
        let plan = self.store.load_plan(plan_id)?;
        let slot = plan.slot(slot_index).ok_or_else(|| SwapError::SlotNotFound {
            plan_id: plan_id.to_string(),
            slot_index,
            slot_count: plan.slots.len(),
        })?;
        let recipe = self.catalog.get_recipe(new_recipe_id)?;

        Ok(PreviewResponse {
            plan_revision: plan.revision,
            impact: analyze_impact(slot, &recipe, &self.thresholds),
        })
    }

    /// Apply a substitution transactionally. Pass the revision observed at
    /// generation/preview time to detect concurrent mutations; `None` skips
    /// the check.
    pub fn apply_substitution(
        &self,
        plan_id: &str,
        slot_index: usize,
        new_recipe_id: &str,
        expected_revision: Option<u64>,
    ) -> Result<MealPlan> {
        self.manager()
            .apply(plan_id, slot_index, new_recipe_id, expected_revision)
    }

    /// Undo the most recent substitution on a plan.
    pub fn undo_substitution(&self, plan_id: &str) -> Result<MealPlan> {
        self.manager().undo(plan_id)
    }

    /// Chronological substitution log for a plan.
    pub fn substitution_history(&self, plan_id: &str) -> Result<HistoryResponse> {
        // Surface PlanNotFound rather than an empty log for unknown plans
        self.store.load_plan(plan_id)?;
        let history = self.store.load_history(plan_id)?;
        Ok(HistoryResponse {
            can_undo: history.can_undo(),
            entries: history.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, NeutralPreference, StaticPreferences};
    use crate::models::{Difficulty, MealSlot, MealType, NutritionFacts, RecipeRecord};
    use crate::state::MemoryPlanStore;

    fn recipe(id: &str, calories: f64, cost: f64, cuisine: &str) -> RecipeRecord {
        RecipeRecord {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            meal_type: MealType::Dinner,
            cuisine: cuisine.to_string(),
            difficulty: Difficulty::Easy,
            tags: vec![],
            nutrition_per_serving: NutritionFacts::new(calories, 20.0, 50.0, 15.0),
            cost_per_serving: cost,
        }
    }

    fn sample_plan() -> MealPlan {
        let mut plan = MealPlan {
            id: "mp1".to_string(),
            user_id: Some("u1".to_string()),
            dietary_restrictions: vec![],
            slots: vec![MealSlot {
                day: 0,
                meal_type: MealType::Dinner,
                recipe_id: "r10".to_string(),
                recipe_name: "Recipe r10".to_string(),
                servings: 1,
                score: None,
                estimated_cost: 3.0,
                nutrition: NutritionFacts::new(500.0, 20.0, 50.0, 15.0),
            }],
            total_nutrition: NutritionFacts::default(),
            total_cost: 0.0,
            budget_target: None,
            revision: 0,
        };
        plan.recompute_aggregates();
        plan
    }

    fn service() -> SubstitutionService<InMemoryCatalog, NeutralPreference, MemoryPlanStore> {
        let catalog = InMemoryCatalog::new(vec![
            recipe("r10", 500.0, 3.0, "indian"),
            recipe("r42", 650.0, 4.5, "thai"),
            recipe("r50", 480.0, 2.8, "italian"),
            recipe("r60", 520.0, 3.2, "mexican"),
        ]);
        let store = MemoryPlanStore::new(vec![sample_plan()]);
        SubstitutionService::new(catalog, NeutralPreference, store)
    }

    #[test]
    fn test_get_substitutes_ranked_and_capped() {
        let svc = service();
        let limits = SubstitutionLimits {
            max_alternatives: 2,
            ..Default::default()
        };
        let response = svc.get_substitutes("mp1", 0, &limits).unwrap();

        assert_eq!(response.plan_revision, 0);
        assert!(response.alternatives.len() <= 2);
        for window in response.alternatives.windows(2) {
            assert!(window[0].total_score >= window[1].total_score);
        }
        // The current recipe never proposes itself
        assert!(response.alternatives.iter().all(|c| c.recipe_id != "r10"));
    }

    #[test]
    fn test_preference_signal_feeds_scores() {
        let catalog = InMemoryCatalog::new(vec![
            recipe("r10", 500.0, 3.0, "indian"),
            recipe("r42", 500.0, 3.0, "thai"),
        ]);
        let prefs = StaticPreferences::new([("thai".to_string(), 0.9)]);
        let store = MemoryPlanStore::new(vec![sample_plan()]);
        let svc = SubstitutionService::new(catalog, prefs, store);

        let response = svc
            .get_substitutes("mp1", 0, &SubstitutionLimits::default())
            .unwrap();
        let thai = response
            .alternatives
            .iter()
            .find(|c| c.recipe_id == "r42")
            .unwrap();
        assert!((thai.user_preference - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let svc = service();
        let first = svc.preview_substitution("mp1", 0, "r42").unwrap();
        let second = svc.preview_substitution("mp1", 0, "r42").unwrap();

        assert_eq!(first.plan_revision, second.plan_revision);
        assert_eq!(first.impact, second.impact);
        assert_eq!(svc.store().load_plan("mp1").unwrap().revision, 0);
    }

    #[test]
    fn test_apply_then_undo_scenario() {
        // Slot 0 holds r10 (500 kcal, $3.00); r42 is 650 kcal, $4.50.
        let svc = service();
        let before = svc.store().load_plan("mp1").unwrap();

        let plan = svc.apply_substitution("mp1", 0, "r42", Some(0)).unwrap();
        assert_eq!(plan.slots[0].recipe_id, "r42");
        assert!((plan.total_nutrition.calories - before.total_nutrition.calories - 150.0).abs() < 1e-9);
        assert!((plan.total_cost - before.total_cost - 1.5).abs() < 1e-9);

        let history = svc.substitution_history("mp1").unwrap();
        assert_eq!(history.entries.len(), 1);
        assert!(history.can_undo);

        let restored = svc.undo_substitution("mp1").unwrap();
        assert_eq!(restored.slots[0].recipe_id, "r10");
        assert!(restored
            .total_nutrition
            .approx_eq(&before.total_nutrition, 1e-9));
        assert!(!svc.substitution_history("mp1").unwrap().can_undo);
    }

    struct TimingOutCatalog;

    impl RecipeCatalog for TimingOutCatalog {
        fn get_recipe(&self, id: &str) -> Result<RecipeRecord> {
            Err(SwapError::UpstreamTimeout(format!("get_recipe {}", id)))
        }

        fn list_by_meal_type(
            &self,
            _meal_type: MealType,
            _dietary_restrictions: &[String],
        ) -> Result<Vec<RecipeRecord>> {
            Err(SwapError::UpstreamTimeout("list_by_meal_type".to_string()))
        }
    }

    #[test]
    fn test_upstream_timeout_surfaces_as_retryable() {
        let store = MemoryPlanStore::new(vec![sample_plan()]);
        let svc = SubstitutionService::new(TimingOutCatalog, NeutralPreference, store);

        let err = svc
            .get_substitutes("mp1", 0, &SubstitutionLimits::default())
            .unwrap_err();
        assert!(matches!(err, SwapError::UpstreamTimeout(_)));
        assert!(err.is_retryable());

        // A timed-out apply leaves the plan untouched
        let err = svc.apply_substitution("mp1", 0, "r42", None).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(svc.store().load_plan("mp1").unwrap().revision, 0);
    }

    #[test]
    fn test_history_for_unknown_plan() {
        let svc = service();
        assert!(matches!(
            svc.substitution_history("mp9").unwrap_err(),
            SwapError::PlanNotFound(_)
        ));
    }
}
