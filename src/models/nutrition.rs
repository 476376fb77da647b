//! Macronutrient calorie breakdown

use serde::{Deserialize, Serialize};

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Calories contributed by each macronutrient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_kcal: f64,
    pub fat_kcal: f64,
    pub carbs_kcal: f64,
}

impl MacroBreakdown {
    /// Convert gram amounts to calories
    pub fn from_grams(protein_g: f64, fat_g: f64, carbs_g: f64) -> Self {
        Self {
            protein_kcal: protein_g * KCAL_PER_G_PROTEIN,
            fat_kcal: fat_g * KCAL_PER_G_FAT,
            carbs_kcal: carbs_g * KCAL_PER_G_CARBS,
        }
    }

    pub fn total(&self) -> f64 {
        self.protein_kcal + self.fat_kcal + self.carbs_kcal
    }

    /// Labelled slices in display order: Protein, Fat, Carbs
    pub fn slices(&self) -> [(&'static str, f64); 3] {
        [
            ("Protein", self.protein_kcal),
            ("Fat", self.fat_kcal),
            ("Carbs", self.carbs_kcal),
        ]
    }

    /// Share of total calories per slice, in percent. None when there are no calories.
    pub fn percentages(&self) -> Option<[f64; 3]> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        Some([
            self.protein_kcal / total * 100.0,
            self.fat_kcal / total * 100.0,
            self.carbs_kcal / total * 100.0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grams() {
        let macros = MacroBreakdown::from_grams(100.0, 50.0, 200.0);
        assert_eq!(macros.protein_kcal, 400.0);
        assert_eq!(macros.fat_kcal, 450.0);
        assert_eq!(macros.carbs_kcal, 800.0);
        assert_eq!(macros.total(), 1650.0);
    }

    #[test]
    fn test_percentages() {
        let pct = MacroBreakdown::from_grams(25.0, 0.0, 75.0).percentages().unwrap();
        assert!((pct[0] - 25.0).abs() < 1e-9);
        assert_eq!(pct[1], 0.0);
        assert!((pct[2] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_of_nothing() {
        assert_eq!(MacroBreakdown::default().percentages(), None);
    }
}
