//! Data models
//!
//! Profile inputs, stored log entries and macronutrient breakdowns.

mod log_entry;
mod nutrition;
mod profile;

pub use log_entry::{LogEntry, LogEntryCreate};
pub use nutrition::{MacroBreakdown, KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
pub use profile::{ActivityLevel, ExerciseIntensity, Goal, Profile, Sex};
