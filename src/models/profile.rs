//! Profile model
//!
//! The user's static inputs for one session, and the fixed option sets the
//! input forms offer.

use serde::{Deserialize, Serialize};

/// Weight goal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    WeightGain,
}

impl Goal {
    pub const ALL: [Goal; 2] = [Goal::WeightLoss, Goal::WeightGain];

    pub fn display_name(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::WeightGain => "Weight Gain",
        }
    }

    /// What a day's balance is called for this goal
    pub fn balance_label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Deficit",
            Goal::WeightGain => "Surplus",
        }
    }
}

/// Selects the BMR formula branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn display_name(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// Activity level, resolved to a maintenance multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Moderate => 1.5,
            ActivityLevel::Active => 1.725,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (1.2)",
            ActivityLevel::Moderate => "Moderate (1.5)",
            ActivityLevel::Active => "Active (1.725)",
        }
    }
}

/// Exercise intensity, resolved to kcal burned per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseIntensity {
    Light,
    Moderate,
    High,
}

impl ExerciseIntensity {
    pub const ALL: [ExerciseIntensity; 3] = [
        ExerciseIntensity::Light,
        ExerciseIntensity::Moderate,
        ExerciseIntensity::High,
    ];

    pub fn kcal_per_minute(&self) -> f64 {
        match self {
            ExerciseIntensity::Light => 4.0,
            ExerciseIntensity::Moderate => 6.0,
            ExerciseIntensity::High => 8.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseIntensity::Light => "light",
            ExerciseIntensity::Moderate => "moderate",
            ExerciseIntensity::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(ExerciseIntensity::Light),
            "moderate" => Some(ExerciseIntensity::Moderate),
            "high" => Some(ExerciseIntensity::High),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseIntensity::Light => "Light (4)",
            ExerciseIntensity::Moderate => "Moderate (6)",
            ExerciseIntensity::High => "High (8)",
        }
    }
}

/// User profile for one session.
///
/// Numeric fields are validated by the input forms; nothing downstream
/// re-checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub goal: Goal,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: Sex,
    pub activity: ActivityLevel,
    pub target_weight_kg: f64,
}

impl Profile {
    pub fn activity_factor(&self) -> f64 {
        self.activity.factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_factors() {
        let factors: Vec<f64> = ActivityLevel::ALL.iter().map(|a| a.factor()).collect();
        assert_eq!(factors, vec![1.2, 1.5, 1.725]);
    }

    #[test]
    fn test_intensity_round_trip_through_store_name() {
        for intensity in ExerciseIntensity::ALL {
            assert_eq!(ExerciseIntensity::from_str(intensity.as_str()), Some(intensity));
        }
        assert_eq!(ExerciseIntensity::from_str("HIGH"), Some(ExerciseIntensity::High));
        assert_eq!(ExerciseIntensity::from_str("extreme"), None);
    }

    #[test]
    fn test_balance_labels() {
        assert_eq!(Goal::WeightLoss.balance_label(), "Deficit");
        assert_eq!(Goal::WeightGain.balance_label(), "Surplus");
    }

    #[test]
    fn test_goal_serializes_snake_case() {
        let json = serde_json::to_string(&Goal::WeightLoss).unwrap();
        assert_eq!(json, "\"weight_loss\"");
    }
}
