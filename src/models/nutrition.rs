use serde::{Deserialize, Serialize};

/// Nutrition snapshot: calories plus the three macros, in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl NutritionFacts {
    pub fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Scale every field by a factor (serving-count scaling).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    pub fn add(&mut self, other: &NutritionFacts) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
    }

    /// Signed per-field difference: self − other.
    pub fn delta_from(&self, other: &NutritionFacts) -> NutritionFacts {
        Self {
            calories: self.calories - other.calories,
            protein_g: self.protein_g - other.protein_g,
            carbs_g: self.carbs_g - other.carbs_g,
            fat_g: self.fat_g - other.fat_g,
        }
    }

    /// Basic validation: all fields non-negative.
    pub fn is_valid(&self) -> bool {
        self.calories >= 0.0 && self.protein_g >= 0.0 && self.carbs_g >= 0.0 && self.fat_g >= 0.0
    }

    /// Approximate equality across all fields, for aggregate checks.
    pub fn approx_eq(&self, other: &NutritionFacts, tol: f64) -> bool {
        (self.calories - other.calories).abs() < tol
            && (self.protein_g - other.protein_g).abs() < tol
            && (self.carbs_g - other.carbs_g).abs() < tol
            && (self.fat_g - other.fat_g).abs() < tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        let n = NutritionFacts::new(500.0, 20.0, 60.0, 15.0);
        let doubled = n.scaled(2.0);
        assert!((doubled.calories - 1000.0).abs() < 0.001);
        assert!((doubled.protein_g - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_delta_is_signed() {
        let a = NutritionFacts::new(650.0, 25.0, 50.0, 20.0);
        let b = NutritionFacts::new(500.0, 30.0, 60.0, 15.0);
        let d = a.delta_from(&b);
        assert!((d.calories - 150.0).abs() < 0.001);
        assert!((d.protein_g - (-5.0)).abs() < 0.001);
    }

    #[test]
    fn test_is_valid() {
        assert!(NutritionFacts::new(100.0, 1.0, 2.0, 3.0).is_valid());
        assert!(!NutritionFacts::new(-1.0, 1.0, 2.0, 3.0).is_valid());
    }
}
