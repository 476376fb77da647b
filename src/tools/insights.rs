//! Insights view
//!
//! The statistics the dashboard shows once the log has entries, with the
//! display strings already formatted.

use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::engine::Statistics;
use crate::models::Goal;
use crate::session::Session;

use super::ToolResult;

/// Insights for the current session
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub goal: Goal,
    pub balance_label: &'static str,
    pub maintenance_calories: f64,
    pub target_calories: f64,
    pub statistics: Statistics,
    pub lines: InsightLines,
    pub build: BuildInfo,
}

/// Pre-formatted lines, rounded the way the dashboard prints them
#[derive(Debug, Clone, Serialize)]
pub struct InsightLines {
    pub average_balance: String,
    pub weight_change: String,
    pub progress: String,
    pub progress_bar: String,
    pub macro_breakdown: String,
}

const PROGRESS_BAR_WIDTH: usize = 30;

impl Insights {
    /// Build insights, or None while the log is empty
    pub fn from_session(session: &Session) -> ToolResult<Option<Self>> {
        let Some(statistics) = session.statistics()? else {
            return Ok(None);
        };

        let goal = session.profile().goal;
        let balance_label = goal.balance_label();
        let lines = InsightLines::new(balance_label, &statistics);

        Ok(Some(Self {
            goal,
            balance_label,
            maintenance_calories: session.maintenance(),
            target_calories: session.target_calories(),
            statistics,
            lines,
            build: BuildInfo::current(),
        }))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl InsightLines {
    fn new(balance_label: &str, stats: &Statistics) -> Self {
        let macros = stats.latest_macros;
        let macro_breakdown = match macros.percentages() {
            Some(pct) => macros
                .slices()
                .iter()
                .zip(pct)
                .map(|((name, kcal), share)| format!("{}: {:.0} kcal ({:.1}%)", name, kcal, share))
                .collect::<Vec<_>>()
                .join(" | "),
            None => "No macronutrients logged".to_string(),
        };

        Self {
            average_balance: format!(
                "Average Daily {}: {:.0} calories",
                balance_label, stats.mean_balance
            ),
            weight_change: format!(
                "Estimated Weight Change: {:.2} lbs",
                stats.estimated_weight_change_lbs
            ),
            progress: format!(
                "Progress to {:.1} kg Goal: {:.1}%",
                stats.weight_goal_delta,
                stats.progress_fraction * 100.0
            ),
            progress_bar: progress_bar(stats.progress_fraction, PROGRESS_BAR_WIDTH),
            macro_breakdown,
        }
    }
}

/// Text progress bar, e.g. `[#####-----]`
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, ExerciseIntensity, LogEntryCreate, Profile, Sex};
    use chrono::NaiveDate;

    fn session() -> Session {
        Session::new(Profile {
            goal: Goal::WeightLoss,
            weight_kg: 80.0,
            height_cm: 175.0,
            age_years: 25,
            sex: Sex::Male,
            activity: ActivityLevel::Moderate,
            target_weight_kg: 75.0,
        })
        .unwrap()
    }

    #[test]
    fn test_no_insights_for_empty_log() {
        assert!(Insights::from_session(&session()).unwrap().is_none());
    }

    #[test]
    fn test_insight_lines() {
        let session = session();
        session
            .add_entry(&LogEntryCreate {
                date: NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
                calories_in: 2000.0,
                protein_g: 100.0,
                fat_g: 0.0,
                carbs_g: 100.0,
                exercise_minutes: 30.0,
                exercise_intensity: ExerciseIntensity::Moderate,
                weight_kg: None,
            })
            .unwrap();

        let insights = Insights::from_session(&session).unwrap().unwrap();
        assert_eq!(insights.balance_label, "Deficit");
        assert_eq!(insights.lines.average_balance, "Average Daily Deficit: -841 calories");
        assert_eq!(insights.lines.weight_change, "Estimated Weight Change: -0.24 lbs");
        assert_eq!(insights.lines.progress, "Progress to 5.0 kg Goal: 4.8%");
        assert_eq!(
            insights.lines.macro_breakdown,
            "Protein: 400 kcal (50.0%) | Fat: 0 kcal (0.0%) | Carbs: 400 kcal (50.0%)"
        );

        let json = insights.to_json().unwrap();
        assert!(json.contains("\"goal\": \"weight_loss\""));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["build"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(3.0, 4), "[####]");
    }
}
