pub mod config;
pub mod constants;
pub mod generator;
pub mod impact;
pub mod scorer;

pub use config::{ImpactThresholds, ScoringConfig, SubstitutionLimits};
pub use generator::generate_candidates;
pub use impact::{analyze_impact, classify_impact};
pub use scorer::{cost_efficiency, nutritional_similarity, rank_candidates, score_candidate};
