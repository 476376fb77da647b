//! CSV export of the session log

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::engine::compute_exercise_burn;
use crate::models::LogEntry;

use super::ToolResult;

/// File name offered for download
pub const EXPORT_FILE_NAME: &str = "weight_data.csv";

/// Column order of the export
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Date",
    "Calories",
    "Protein",
    "Fat",
    "Carbs",
    "Exercise_Burn",
    "Weight",
];

/// Write the log as CSV. A missing weight is an empty field.
pub fn write_csv<W: Write>(entries: &[LogEntry], writer: W) -> ToolResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_COLUMNS)?;

    for entry in entries {
        let burn = compute_exercise_burn(
            entry.exercise_minutes,
            entry.exercise_intensity.kcal_per_minute(),
        );
        wtr.write_record([
            entry.date.format("%Y-%m-%d").to_string(),
            entry.calories_in.to_string(),
            entry.protein_g.to_string(),
            entry.fat_g.to_string(),
            entry.carbs_g.to_string(),
            burn.to_string(),
            entry.weight_kg.map(|w| w.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the log as CSV text
pub fn to_csv_string(entries: &[LogEntry]) -> ToolResult<String> {
    let mut buf = Vec::new();
    write_csv(entries, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `weight_data.csv` into `dir`, creating it if needed
pub fn export_to_dir(entries: &[LogEntry], dir: &Path) -> ToolResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    let file = fs::File::create(&path)?;
    write_csv(entries, file)?;

    tracing::info!(path = %path.display(), rows = entries.len(), "Exported log");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseIntensity;
    use chrono::NaiveDate;

    fn entry(weight_kg: Option<f64>) -> LogEntry {
        LogEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
            calories_in: 2000.0,
            protein_g: 120.0,
            fat_g: 65.5,
            carbs_g: 210.0,
            exercise_minutes: 45.0,
            exercise_intensity: ExerciseIntensity::High,
            weight_kg,
        }
    }

    #[test]
    fn test_header_only_for_empty_log() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv, "Date,Calories,Protein,Fat,Carbs,Exercise_Burn,Weight\n");
    }

    #[test]
    fn test_rows() {
        let csv = to_csv_string(&[entry(Some(79.4)), entry(None)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2025-01-09,2000,120,65.5,210,360,79.4");
        assert_eq!(lines[2], "2025-01-09,2000,120,65.5,210,360,");
    }

    #[test]
    fn test_export_to_dir() {
        let dir = std::env::temp_dir().join(format!("weight-goal-export-{}", std::process::id()));
        let path = export_to_dir(&[entry(None)], &dir).unwrap();
        assert!(path.ends_with(EXPORT_FILE_NAME));

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Date,Calories"));
        fs::remove_dir_all(&dir).ok();
    }
}
