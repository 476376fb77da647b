//! Terminal dashboard
//!
//! The Weight Goal Calorie Analyzer as a line-oriented form: a profile form,
//! a daily log form and a handful of commands to inspect, chart and export
//! the session. Reads from any `BufRead` and writes to any `Write`.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::build_info::BuildInfo;
use crate::config::AnalyzerConfig;
use crate::db::DbError;
use crate::models::{ActivityLevel, ExerciseIntensity, Goal, LogEntryCreate, Profile, Sex};
use crate::session::Session;
use crate::tools::dataset::Dataset;
use crate::tools::insights::Insights;
use crate::tools::{charts, export, tips, ToolError};

const MIN_WEIGHT_KG: f64 = 30.0;
const MIN_HEIGHT_CM: f64 = 100.0;
const MIN_AGE_YEARS: u32 = 10;

const HELP: &str = "Commands:
  add       log a day
  table     show the log
  insights  show progress statistics
  charts    write chart images to the output directory
  json      print insights as JSON
  tip       show a tip for your goal
  profile   edit your profile
  export    write weight_data.csv to the output directory
  version   show build information
  help      show this list
  quit      end the session";

/// Dashboard error types
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input ended")]
    EndOfInput,
}

pub type DashboardResult<T> = Result<T, DashboardError>;

pub struct Dashboard<R, W> {
    input: R,
    output: W,
    config: AnalyzerConfig,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Dashboard<R, W> {
    pub fn new(input: R, output: W, config: AnalyzerConfig) -> Self {
        Self {
            input,
            output,
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Use a fixed date as the log form default
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> DashboardResult<()> {
        match self.run_session() {
            Err(DashboardError::EndOfInput) => {
                tracing::info!("Input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn run_session(&mut self) -> DashboardResult<()> {
        writeln!(self.output, "Weight Goal Calorie Analyzer")?;
        writeln!(self.output, "\nYour Profile")?;
        let profile = self.read_profile()?;
        let mut session = Session::new(profile)?;
        self.print_calorie_targets(&session)?;
        writeln!(self.output, "\n{}", HELP)?;

        loop {
            let command = self.prompt("\n>")?;
            match command.to_lowercase().as_str() {
                "" => continue,
                "add" => self.add_entry(&session)?,
                "table" => self.print_table(&session)?,
                "insights" => self.print_insights(&session)?,
                "charts" => self.write_charts(&session)?,
                "json" => self.print_json(&session)?,
                "tip" => {
                    let tip = tips::random_tip(session.profile().goal);
                    writeln!(self.output, "Tip: {}", tip)?;
                }
                "profile" => {
                    let profile = self.read_profile()?;
                    session.set_profile(profile);
                    self.print_calorie_targets(&session)?;
                }
                "export" => {
                    let path = export::export_to_dir(&session.entries()?, &self.config.output_dir)?;
                    writeln!(self.output, "Saved {}", path.display())?;
                }
                "version" => writeln!(self.output, "{}", BuildInfo::current())?,
                "help" => writeln!(self.output, "{}", HELP)?,
                "quit" | "exit" => return Ok(()),
                other => writeln!(self.output, "Unknown command '{}'. Type 'help'.", other)?,
            }
        }
    }

    // ========================================================================
    // Forms
    // ========================================================================

    fn read_profile(&mut self) -> DashboardResult<Profile> {
        let goal = self.prompt_choice("Goal", &Goal::ALL, Goal::display_name)?;
        let weight_kg = self.prompt_number("Current Weight (kg)", MIN_WEIGHT_KG, MIN_WEIGHT_KG)?;
        let height_cm = self.prompt_number("Height (cm)", MIN_HEIGHT_CM, MIN_HEIGHT_CM)?;
        let age_years = self.prompt_integer("Age", MIN_AGE_YEARS)?;
        let sex = self.prompt_choice("Gender", &Sex::ALL, Sex::display_name)?;
        let activity =
            self.prompt_choice("Activity Level", &ActivityLevel::ALL, ActivityLevel::display_name)?;
        let target_label = format!("Target Weight (kg) for {}", goal.display_name());
        let target_weight_kg = self.prompt_number(&target_label, MIN_WEIGHT_KG, MIN_WEIGHT_KG)?;

        Ok(Profile {
            goal,
            weight_kg,
            height_cm,
            age_years,
            sex,
            activity,
            target_weight_kg,
        })
    }

    fn read_entry(&mut self) -> DashboardResult<LogEntryCreate> {
        let date = self.prompt_date("Date")?;
        let calories_in = self.prompt_number("Total Daily Calories", 0.0, 0.0)?;
        let protein_g = self.prompt_number("Protein (g)", 0.0, 0.0)?;
        let fat_g = self.prompt_number("Fat (g)", 0.0, 0.0)?;
        let carbs_g = self.prompt_number("Carbs (g)", 0.0, 0.0)?;
        let exercise_minutes = self.prompt_number("Exercise Minutes", 0.0, 0.0)?;
        let exercise_intensity = self.prompt_choice(
            "Exercise Intensity",
            &ExerciseIntensity::ALL,
            ExerciseIntensity::display_name,
        )?;
        let weight = self.prompt_number("Weight Today (kg, optional)", 0.0, 0.0)?;

        Ok(LogEntryCreate {
            date,
            calories_in,
            protein_g,
            fat_g,
            carbs_g,
            exercise_minutes,
            exercise_intensity,
            weight_kg: (weight > 0.0).then_some(weight),
        })
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn print_calorie_targets(&mut self, session: &Session) -> DashboardResult<()> {
        writeln!(
            self.output,
            "Maintenance Calories: {:.0} | Target Calories: {:.0}",
            session.maintenance(),
            session.target_calories()
        )?;
        Ok(())
    }

    fn add_entry(&mut self, session: &Session) -> DashboardResult<()> {
        writeln!(self.output, "\nLog Your Day")?;
        let entry = self.read_entry()?;
        session.add_entry(&entry)?;
        writeln!(self.output, "Entry added!")?;
        Ok(())
    }

    fn print_table(&mut self, session: &Session) -> DashboardResult<()> {
        if session.is_empty()? {
            writeln!(self.output, "No entries yet. Use 'add' to log a day.")?;
            return Ok(());
        }

        let csv = export::to_csv_string(&session.entries()?)?;
        let table = Dataset::from_reader(csv.as_bytes())?.render_table(usize::MAX);
        writeln!(self.output, "\nYour Progress\n{}", table.trim_end())?;
        Ok(())
    }

    fn print_insights(&mut self, session: &Session) -> DashboardResult<()> {
        let Some(insights) = Insights::from_session(session)? else {
            writeln!(self.output, "No entries yet. Use 'add' to log a day.")?;
            return Ok(());
        };

        let lines = &insights.lines;
        writeln!(self.output, "\nInsights")?;
        writeln!(self.output, "{}", lines.average_balance)?;
        writeln!(self.output, "{}", lines.weight_change)?;
        writeln!(self.output, "{}", lines.progress_bar)?;
        writeln!(self.output, "{}", lines.progress)?;
        writeln!(self.output, "\nMacronutrient Breakdown (Latest Entry)")?;
        writeln!(self.output, "{}", lines.macro_breakdown)?;
        Ok(())
    }

    fn print_json(&mut self, session: &Session) -> DashboardResult<()> {
        match Insights::from_session(session)? {
            Some(insights) => writeln!(self.output, "{}", insights.to_json()?)?,
            None => writeln!(self.output, "null")?,
        }
        Ok(())
    }

    fn write_charts(&mut self, session: &Session) -> DashboardResult<()> {
        match charts::write_session_charts(session, &self.config) {
            Ok(paths) if paths.is_empty() => {
                writeln!(self.output, "No entries yet. Use 'add' to log a day.")?;
            }
            Ok(paths) => {
                for path in paths {
                    writeln!(self.output, "Saved {}", path.display())?;
                }
            }
            Err(e) => {
                tracing::warn!("Chart rendering failed: {}", e);
                writeln!(self.output, "Charts unavailable: {}", e)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Prompts
    // ========================================================================

    fn prompt(&mut self, label: &str) -> DashboardResult<String> {
        write!(self.output, "{} ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DashboardError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Number at or above `min`; an empty answer takes `default`
    fn prompt_number(&mut self, label: &str, min: f64, default: f64) -> DashboardResult<f64> {
        loop {
            let answer = self.prompt(&format!("{} [{}]:", label, default))?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= min => return Ok(v),
                _ => writeln!(self.output, "Enter a number of at least {}.", min)?,
            }
        }
    }

    fn prompt_integer(&mut self, label: &str, min: u32) -> DashboardResult<u32> {
        loop {
            let answer = self.prompt(&format!("{} [{}]:", label, min))?;
            if answer.is_empty() {
                return Ok(min);
            }
            match answer.parse::<u32>() {
                Ok(v) if v >= min => return Ok(v),
                _ => writeln!(self.output, "Enter a whole number of at least {}.", min)?,
            }
        }
    }

    fn prompt_date(&mut self, label: &str) -> DashboardResult<NaiveDate> {
        loop {
            let answer = self.prompt(&format!("{} [{}]:", label, self.today))?;
            if answer.is_empty() {
                return Ok(self.today);
            }
            match NaiveDate::parse_from_str(&answer, "%Y-%m-%d") {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.output, "Enter a date as YYYY-MM-DD.")?,
            }
        }
    }

    /// Pick by number or by label; an empty answer takes the first option
    fn prompt_choice<T: Copy>(
        &mut self,
        label: &str,
        options: &[T],
        name: fn(&T) -> &'static str,
    ) -> DashboardResult<T> {
        let listing = options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}) {}", i + 1, name(o)))
            .collect::<Vec<_>>()
            .join("  ");

        loop {
            let answer = self.prompt(&format!("{} ({}):", label, listing))?;
            if answer.is_empty() {
                if let Some(first) = options.first() {
                    return Ok(*first);
                }
            }
            let by_number = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i));
            let by_name = options.iter().find(|o| {
                let full = name(*o).to_lowercase();
                let short = full.split(" (").next().unwrap_or(&full).to_string();
                answer.to_lowercase() == full || answer.to_lowercase() == short
            });

            match by_number.or(by_name) {
                Some(choice) => return Ok(*choice),
                None => writeln!(self.output, "Choose one of: {}", listing)?,
            }
        }
    }
}
