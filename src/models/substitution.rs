use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, NutritionFacts};
use crate::substitution::constants::{GRADE_A_CUTOFF, GRADE_B_CUTOFF, GRADE_C_CUTOFF};

/// Coarse A-D bucketing of a candidate's total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreGrade {
    A,
    B,
    C,
    D,
}

impl ScoreGrade {
    /// Grade is a pure function of the total score.
    pub fn from_score(total_score: f64) -> Self {
        if total_score >= GRADE_A_CUTOFF {
            ScoreGrade::A
        } else if total_score >= GRADE_B_CUTOFF {
            ScoreGrade::B
        } else if total_score >= GRADE_C_CUTOFF {
            ScoreGrade::C
        } else {
            ScoreGrade::D
        }
    }
}

impl fmt::Display for ScoreGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreGrade::A => "A",
            ScoreGrade::B => "B",
            ScoreGrade::C => "C",
            ScoreGrade::D => "D",
        };
        write!(f, "{}", s)
    }
}

/// Severity of a substitution's nutritional change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Minimal,
    Moderate,
    Significant,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImpactLevel::Minimal => "minimal",
            ImpactLevel::Moderate => "moderate",
            ImpactLevel::Significant => "significant",
        };
        write!(f, "{}", s)
    }
}

/// Signed nutrient and cost change of a substitution (candidate − original),
/// scaled to the slot's serving count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionImpact {
    pub calories_delta: f64,
    pub protein_delta: f64,
    pub carbs_delta: f64,
    pub fat_delta: f64,
    pub cost_delta: f64,
    pub impact_level: ImpactLevel,
}

/// A scored replacement proposal for one meal slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionCandidate {
    pub recipe_id: String,
    pub recipe_name: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    /// Candidate nutrition scaled to the slot's servings.
    pub nutrition: NutritionFacts,
    /// Candidate cost scaled to the slot's servings.
    pub estimated_cost: f64,
    pub nutritional_similarity: f64,
    pub user_preference: f64,
    pub cost_efficiency: f64,
    pub total_score: f64,
    pub score_grade: ScoreGrade,
    pub impact: SubstitutionImpact,
}

/// Frozen slot state, captured for reversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub recipe_id: String,
    pub recipe_name: String,
    pub nutrition: NutritionFacts,
    pub estimated_cost: f64,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One applied substitution. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionHistoryEntry {
    pub applied_at: DateTime<Utc>,
    pub plan_id: String,
    pub slot_index: usize,
    pub previous: SlotSnapshot,
    pub replacement: SlotSnapshot,
}

/// Per-plan chronological log of substitutions; last entry is the undo target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubstitutionHistory {
    pub entries: Vec<SubstitutionHistoryEntry>,
}

impl SubstitutionHistory {
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn most_recent(&self) -> Option<&SubstitutionHistoryEntry> {
        self.entries.last()
    }

    pub fn push(&mut self, entry: SubstitutionHistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<SubstitutionHistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(ScoreGrade::from_score(0.95), ScoreGrade::A);
        assert_eq!(ScoreGrade::from_score(0.8), ScoreGrade::A);
        assert_eq!(ScoreGrade::from_score(0.79), ScoreGrade::B);
        assert_eq!(ScoreGrade::from_score(0.6), ScoreGrade::B);
        assert_eq!(ScoreGrade::from_score(0.45), ScoreGrade::C);
        assert_eq!(ScoreGrade::from_score(0.4), ScoreGrade::C);
        assert_eq!(ScoreGrade::from_score(0.1), ScoreGrade::D);
    }

    #[test]
    fn test_grade_monotonic() {
        let mut prev = ScoreGrade::from_score(0.0);
        for i in 1..=100 {
            let grade = ScoreGrade::from_score(i as f64 / 100.0);
            // Higher score never yields a worse grade (A < D in derived Ord)
            assert!(grade <= prev);
            prev = grade;
        }
    }

    #[test]
    fn test_history_lifo() {
        let mut history = SubstitutionHistory::default();
        assert!(!history.can_undo());
        assert!(history.most_recent().is_none());

        let entry = |idx: usize| SubstitutionHistoryEntry {
            applied_at: Utc::now(),
            plan_id: "mp1".to_string(),
            slot_index: idx,
            previous: SlotSnapshot {
                recipe_id: "old".to_string(),
                recipe_name: "Old".to_string(),
                nutrition: NutritionFacts::default(),
                estimated_cost: 0.0,
                score: None,
            },
            replacement: SlotSnapshot {
                recipe_id: "new".to_string(),
                recipe_name: "New".to_string(),
                nutrition: NutritionFacts::default(),
                estimated_cost: 0.0,
                score: None,
            },
        };

        history.push(entry(0));
        history.push(entry(3));
        assert!(history.can_undo());
        assert_eq!(history.most_recent().unwrap().slot_index, 3);
        assert_eq!(history.pop().unwrap().slot_index, 3);
        assert_eq!(history.pop().unwrap().slot_index, 0);
        assert!(!history.can_undo());
    }
}
