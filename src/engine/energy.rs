//! Daily energy figures
//!
//! BMR uses the Mifflin-St Jeor equation (1990):
//! `10 x weight_kg + 6.25 x height_cm - 5 x age + s`, where `s` is +5 for
//! men and -161 for women.

use serde::{Deserialize, Serialize};

use crate::models::{Goal, LogEntry, Profile, Sex};

const BMR_WEIGHT_COEF: f64 = 10.0;
const BMR_HEIGHT_COEF: f64 = 6.25;
const BMR_AGE_COEF: f64 = 5.0;
const BMR_MALE_OFFSET: f64 = 5.0;
const BMR_FEMALE_OFFSET: f64 = -161.0;

/// Daily kcal offset from maintenance, roughly 1 lb per week
pub const GOAL_CALORIE_OFFSET: f64 = 500.0;

/// A log entry with its derived calorie figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedEntry {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub exercise_burn: f64,
    pub net_calories: f64,
    /// Net calories minus maintenance; negative is a deficit
    pub balance: f64,
}

/// Basal metabolic rate in kcal/day
pub fn compute_bmr(profile: &Profile) -> f64 {
    let offset = match profile.sex {
        Sex::Male => BMR_MALE_OFFSET,
        Sex::Female => BMR_FEMALE_OFFSET,
    };

    BMR_WEIGHT_COEF * profile.weight_kg + BMR_HEIGHT_COEF * profile.height_cm
        - BMR_AGE_COEF * f64::from(profile.age_years)
        + offset
}

/// Maintenance calories: BMR scaled by the activity factor
pub fn compute_maintenance(bmr: f64, activity_factor: f64) -> f64 {
    bmr * activity_factor
}

/// Daily calorie target for the goal
pub fn compute_target_calories(maintenance: f64, goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => maintenance - GOAL_CALORIE_OFFSET,
        Goal::WeightGain => maintenance + GOAL_CALORIE_OFFSET,
    }
}

/// Calories burned by exercise; `intensity_factor` is kcal per minute
pub fn compute_exercise_burn(minutes: f64, intensity_factor: f64) -> f64 {
    minutes * intensity_factor
}

/// Derive burn, net calories and balance for one entry
pub fn annotate_entry(entry: &LogEntry, maintenance: f64) -> AnnotatedEntry {
    let exercise_burn = compute_exercise_burn(
        entry.exercise_minutes,
        entry.exercise_intensity.kcal_per_minute(),
    );
    let net_calories = entry.calories_in - exercise_burn;

    AnnotatedEntry {
        entry: entry.clone(),
        exercise_burn,
        net_calories,
        balance: net_calories - maintenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, ExerciseIntensity};
    use chrono::NaiveDate;

    fn profile(sex: Sex, goal: Goal) -> Profile {
        Profile {
            goal,
            weight_kg: 80.0,
            height_cm: 175.0,
            age_years: 25,
            sex,
            activity: ActivityLevel::Moderate,
            target_weight_kg: 75.0,
        }
    }

    #[test]
    fn test_bmr_male() {
        let bmr = compute_bmr(&profile(Sex::Male, Goal::WeightLoss));
        assert!((bmr - 1773.75).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_sex_difference_is_166() {
        let mut p = profile(Sex::Male, Goal::WeightLoss);
        p.weight_kg = 70.0;
        p.height_cm = 170.0;
        p.age_years = 30;
        let male = compute_bmr(&p);
        p.sex = Sex::Female;
        let female = compute_bmr(&p);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_offset_follows_goal() {
        for level in ActivityLevel::ALL {
            for goal in Goal::ALL {
                let mut p = profile(Sex::Female, goal);
                p.activity = level;
                let maintenance = compute_maintenance(compute_bmr(&p), p.activity_factor());
                let target = compute_target_calories(maintenance, goal);
                let expected = match goal {
                    Goal::WeightLoss => -500.0,
                    Goal::WeightGain => 500.0,
                };
                assert!((target - maintenance - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_exercise_burn() {
        assert_eq!(compute_exercise_burn(30.0, 6.0), 180.0);
        assert_eq!(compute_exercise_burn(0.0, 8.0), 0.0);
    }

    #[test]
    fn test_annotate_entry() {
        let entry = LogEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
            calories_in: 2000.0,
            protein_g: 0.0,
            fat_g: 0.0,
            carbs_g: 0.0,
            exercise_minutes: 30.0,
            exercise_intensity: ExerciseIntensity::Moderate,
            weight_kg: None,
        };

        let annotated = annotate_entry(&entry, 2660.625);
        assert_eq!(annotated.exercise_burn, 180.0);
        assert_eq!(annotated.net_calories, 1820.0);
        assert!((annotated.balance - -840.625).abs() < 1e-9);
        assert_eq!(annotated.entry, entry);
    }
}
