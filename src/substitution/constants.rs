/// Scoring weight for nutritional similarity (primary substitution constraint).
pub const WEIGHT_NUTRITION: f64 = 0.5;

/// Scoring weight for the user preference signal.
pub const WEIGHT_PREFERENCE: f64 = 0.3;

/// Scoring weight for cost efficiency.
pub const WEIGHT_COST: f64 = 0.2;

/// Allowed drift when checking that scoring weights sum to 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Preference score used when no signal exists for a cuisine.
pub const NEUTRAL_PREFERENCE: f64 = 0.5;

// ─────────────────────────────────────────────────────────────────────────────
// Nutritional distance weights (calories dominate, macros split the rest)
// ─────────────────────────────────────────────────────────────────────────────

pub const DIST_WEIGHT_CALORIES: f64 = 0.4;
pub const DIST_WEIGHT_PROTEIN: f64 = 0.2;
pub const DIST_WEIGHT_CARBS: f64 = 0.2;
pub const DIST_WEIGHT_FAT: f64 = 0.2;

// ─────────────────────────────────────────────────────────────────────────────
// Grade cutoffs
// ─────────────────────────────────────────────────────────────────────────────

/// Total score at or above which a candidate grades A.
pub const GRADE_A_CUTOFF: f64 = 0.8;

/// Total score at or above which a candidate grades B.
pub const GRADE_B_CUTOFF: f64 = 0.6;

/// Total score at or above which a candidate grades C; below is D.
pub const GRADE_C_CUTOFF: f64 = 0.4;

// ─────────────────────────────────────────────────────────────────────────────
// Impact classification (fractions of the original slot's calories)
// ─────────────────────────────────────────────────────────────────────────────

/// |Δcalories| / original below this is a minimal impact.
pub const IMPACT_MINIMAL_BELOW: f64 = 0.10;

/// |Δcalories| / original below this (and at least minimal) is moderate.
pub const IMPACT_MODERATE_BELOW: f64 = 0.25;

// ─────────────────────────────────────────────────────────────────────────────
// Candidate generation defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default cap on returned alternatives.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 5;

/// Default fractional calorie tolerance for similarity scoring.
pub const DEFAULT_NUTRITIONAL_TOLERANCE: f64 = 0.15;

/// Candidates beyond this multiple of the tolerance are excluded outright;
/// inside it they are scored on a sliding scale, not binary-filtered.
pub const HARD_BOUND_FACTOR: f64 = 2.0;
