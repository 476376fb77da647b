//! Log aggregation

use serde::{Deserialize, Serialize};

use super::AnnotatedEntry;
use crate::models::{Goal, MacroBreakdown, Profile};

/// Approximate kcal in one pound of body weight
pub const KCAL_PER_LB: f64 = 3500.0;

/// Summary over the whole log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub entry_count: usize,
    pub maintenance_calories: f64,
    pub mean_balance: f64,
    pub total_balance: f64,
    pub estimated_weight_change_lbs: f64,
    /// Distance to target in kg, positive when the target lies in the goal's direction
    pub weight_goal_delta: f64,
    /// Fraction of the goal reached, in [0, 1]
    pub progress_fraction: f64,
    /// Macros of the most recently appended entry
    pub latest_macros: MacroBreakdown,
}

/// Target distance signed by goal direction
pub fn weight_goal_delta(profile: &Profile) -> f64 {
    match profile.goal {
        Goal::WeightLoss => profile.weight_kg - profile.target_weight_kg,
        Goal::WeightGain => profile.target_weight_kg - profile.weight_kg,
    }
}

/// `|change / delta|` clamped to [0, 1]; 0 when there is no distance to cover
pub fn progress_fraction(estimated_weight_change_lbs: f64, weight_goal_delta: f64) -> f64 {
    if weight_goal_delta == 0.0 {
        return 0.0;
    }
    (estimated_weight_change_lbs / weight_goal_delta).abs().clamp(0.0, 1.0)
}

/// Aggregate annotated entries. Returns None for an empty log.
pub fn aggregate(
    entries: &[AnnotatedEntry],
    maintenance: f64,
    profile: &Profile,
) -> Option<Statistics> {
    let latest = entries.last()?;

    let total_balance: f64 = entries.iter().map(|e| e.balance).sum();
    let mean_balance = total_balance / entries.len() as f64;
    let estimated_weight_change_lbs = total_balance / KCAL_PER_LB;
    let delta = weight_goal_delta(profile);

    let stats = Statistics {
        entry_count: entries.len(),
        maintenance_calories: maintenance,
        mean_balance,
        total_balance,
        estimated_weight_change_lbs,
        weight_goal_delta: delta,
        progress_fraction: progress_fraction(estimated_weight_change_lbs, delta),
        latest_macros: MacroBreakdown::from_grams(
            latest.entry.protein_g,
            latest.entry.fat_g,
            latest.entry.carbs_g,
        ),
    };

    tracing::debug!(
        entries = stats.entry_count,
        total_balance = stats.total_balance,
        progress = stats.progress_fraction,
        "Aggregated log statistics"
    );

    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{annotate_entry, compute_bmr, compute_maintenance, compute_target_calories};
    use crate::models::{ActivityLevel, ExerciseIntensity, LogEntry, Sex};
    use chrono::NaiveDate;

    fn example_profile() -> Profile {
        Profile {
            goal: Goal::WeightLoss,
            weight_kg: 80.0,
            height_cm: 175.0,
            age_years: 25,
            sex: Sex::Male,
            activity: ActivityLevel::Moderate,
            target_weight_kg: 75.0,
        }
    }

    fn entry(id: i64, day: u32, calories_in: f64, protein_g: f64) -> LogEntry {
        LogEntry {
            id,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            calories_in,
            protein_g,
            fat_g: 70.0,
            carbs_g: 250.0,
            exercise_minutes: 30.0,
            exercise_intensity: ExerciseIntensity::Moderate,
            weight_kg: None,
        }
    }

    #[test]
    fn test_empty_log_has_no_statistics() {
        assert_eq!(aggregate(&[], 2500.0, &example_profile()), None);
    }

    #[test]
    fn test_end_to_end_example() {
        let profile = example_profile();
        let bmr = compute_bmr(&profile);
        let maintenance = compute_maintenance(bmr, profile.activity_factor());
        assert!((maintenance - 2660.625).abs() < 1e-9);
        assert!((compute_target_calories(maintenance, profile.goal) - 2160.625).abs() < 1e-9);

        let annotated = vec![annotate_entry(&entry(1, 9, 2000.0, 100.0), maintenance)];
        let stats = aggregate(&annotated, maintenance, &profile).unwrap();

        assert_eq!(stats.entry_count, 1);
        assert!((stats.total_balance - -840.625).abs() < 1e-9);
        assert!((stats.mean_balance - -840.625).abs() < 1e-9);
        assert!((stats.estimated_weight_change_lbs - -0.2402).abs() < 1e-4);
        assert_eq!(stats.weight_goal_delta, 5.0);
        assert!((stats.progress_fraction - 0.0480).abs() < 1e-4);
    }

    #[test]
    fn test_total_is_sum_of_entry_balances() {
        let profile = example_profile();
        let maintenance = 2400.0;
        let annotated: Vec<AnnotatedEntry> = [1800.0, 2600.0, 2100.0, 3000.0]
            .iter()
            .enumerate()
            .map(|(i, kcal)| {
                let logged = entry(i as i64 + 1, i as u32 + 1, *kcal, 90.0);
                annotate_entry(&logged, maintenance)
            })
            .collect();

        let stats = aggregate(&annotated, maintenance, &profile).unwrap();
        let expected: f64 = annotated.iter().map(|e| e.balance).sum();
        assert!((stats.total_balance - expected).abs() < 1e-9);
        assert!((stats.mean_balance - expected / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_latest_macros_use_insertion_order() {
        let profile = example_profile();
        // Appended last but dated earliest
        let annotated = vec![
            annotate_entry(&entry(1, 20, 2000.0, 100.0), 2500.0),
            annotate_entry(&entry(2, 5, 2000.0, 150.0), 2500.0),
        ];
        let stats = aggregate(&annotated, 2500.0, &profile).unwrap();
        assert_eq!(stats.latest_macros.protein_kcal, 600.0);
        assert_eq!(stats.latest_macros.fat_kcal, 630.0);
        assert_eq!(stats.latest_macros.carbs_kcal, 1000.0);
    }

    #[test]
    fn test_weight_goal_delta_signed_by_goal() {
        let mut profile = example_profile();
        assert_eq!(weight_goal_delta(&profile), 5.0);
        profile.goal = Goal::WeightGain;
        assert_eq!(weight_goal_delta(&profile), -5.0);
    }

    #[test]
    fn test_progress_fraction_bounds() {
        assert_eq!(progress_fraction(3.0, 0.0), 0.0);
        assert_eq!(progress_fraction(-50.0, 5.0), 1.0);
        assert_eq!(progress_fraction(50.0, -5.0), 1.0);
        for change in [-20.0, -1.5, 0.0, 0.3, 7.0, 1e6] {
            for delta in [-10.0, -0.5, 0.5, 2.0, 40.0] {
                let p = progress_fraction(change, delta);
                assert!((0.0..=1.0).contains(&p), "{} / {} -> {}", change, delta, p);
            }
        }
    }

    #[test]
    fn test_zero_delta_profile_reports_zero_progress() {
        let mut profile = example_profile();
        profile.target_weight_kg = profile.weight_kg;
        let annotated = vec![annotate_entry(&entry(1, 1, 1000.0, 50.0), 2500.0)];
        let stats = aggregate(&annotated, 2500.0, &profile).unwrap();
        assert_eq!(stats.progress_fraction, 0.0);
        assert!(stats.progress_fraction.is_finite());
    }
}
