//! Energy-balance engine
//!
//! Pure functions from a profile and a log to derived calorie figures. The
//! engine holds no state and performs no I/O; callers pass the current
//! profile and the full log on every call.

pub mod energy;
pub mod stats;

pub use energy::{
    annotate_entry, compute_bmr, compute_exercise_burn, compute_maintenance,
    compute_target_calories, AnnotatedEntry, GOAL_CALORIE_OFFSET,
};
pub use stats::{
    aggregate, progress_fraction, weight_goal_delta, Statistics, KCAL_PER_LB,
};
