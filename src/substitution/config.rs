use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};
use crate::substitution::constants::{
    DEFAULT_MAX_ALTERNATIVES, DEFAULT_NUTRITIONAL_TOLERANCE, IMPACT_MINIMAL_BELOW,
    IMPACT_MODERATE_BELOW, WEIGHT_COST, WEIGHT_NUTRITION, WEIGHT_PREFERENCE, WEIGHT_SUM_TOLERANCE,
};

/// Runtime-configurable scoring weights.
///
/// The defaults are starting points, not ground truth; deployments are
/// expected to tune them against real acceptance data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub nutrition_weight: f64,
    pub preference_weight: f64,
    pub cost_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            nutrition_weight: WEIGHT_NUTRITION,
            preference_weight: WEIGHT_PREFERENCE,
            cost_weight: WEIGHT_COST,
        }
    }
}

impl ScoringConfig {
    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        if self.nutrition_weight < 0.0 || self.preference_weight < 0.0 || self.cost_weight < 0.0 {
            return Err(SwapError::InvalidInput(
                "Scoring weights must be non-negative".to_string(),
            ));
        }
        let sum = self.nutrition_weight + self.preference_weight + self.cost_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SwapError::InvalidInput(format!(
                "Scoring weights must sum to 1 (got {:.6})",
                sum
            )));
        }
        Ok(())
    }
}

/// Cutoffs for classifying a substitution's calorie impact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactThresholds {
    /// Relative calorie change below this is minimal.
    pub minimal_below: f64,
    /// Relative calorie change below this is moderate; above is significant.
    pub moderate_below: f64,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            minimal_below: IMPACT_MINIMAL_BELOW,
            moderate_below: IMPACT_MODERATE_BELOW,
        }
    }
}

impl ImpactThresholds {
    pub fn validate(&self) -> Result<()> {
        if self.minimal_below <= 0.0 || self.moderate_below <= self.minimal_below {
            return Err(SwapError::InvalidInput(format!(
                "Impact thresholds must satisfy 0 < minimal ({}) < moderate ({})",
                self.minimal_below, self.moderate_below
            )));
        }
        Ok(())
    }
}

/// Caller-supplied bounds for candidate generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionLimits {
    pub max_alternatives: usize,
    /// Fractional calorie deviation tolerated before similarity starts to
    /// penalize; 2x this is the hard exclusion bound.
    pub nutritional_tolerance: f64,
}

impl Default for SubstitutionLimits {
    fn default() -> Self {
        Self {
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            nutritional_tolerance: DEFAULT_NUTRITIONAL_TOLERANCE,
        }
    }
}

impl SubstitutionLimits {
    pub fn validate(&self) -> Result<()> {
        if self.max_alternatives < 1 {
            return Err(SwapError::InvalidInput(
                "max_alternatives must be at least 1".to_string(),
            ));
        }
        if self.nutritional_tolerance <= 0.0 || self.nutritional_tolerance > 1.0 {
            return Err(SwapError::InvalidInput(format!(
                "nutritional_tolerance must be in (0, 1], got {}",
                self.nutritional_tolerance
            )));
        }
        Ok(())
    }
}
