//! Runtime configuration
//!
//! Resolved from the environment once at startup.

use std::path::PathBuf;

/// Environment variable overriding where exports and charts are written
pub const OUTPUT_DIR_VAR: &str = "WEIGHT_GOAL_OUTPUT_DIR";
pub const CHART_WIDTH_VAR: &str = "WEIGHT_GOAL_CHART_WIDTH";
pub const CHART_HEIGHT_VAR: &str = "WEIGHT_GOAL_CHART_HEIGHT";

pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 500;
/// Largest accepted chart width or height, in pixels
pub const MAX_CHART_DIMENSION: u32 = 10_000;

/// Settings shared by both dashboards
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub output_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl AnalyzerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_dir = lookup(OUTPUT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_output_dir);

        Self {
            output_dir,
            chart_width: parse_dimension(lookup(CHART_WIDTH_VAR), DEFAULT_CHART_WIDTH),
            chart_height: parse_dimension(lookup(CHART_HEIGHT_VAR), DEFAULT_CHART_HEIGHT),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

fn parse_dimension(value: Option<String>, default: u32) -> u32 {
    match value.map(|v| v.trim().parse::<u32>()) {
        Some(Ok(n)) if (1..=MAX_CHART_DIMENSION).contains(&n) => n,
        Some(_) => {
            tracing::warn!("Ignoring invalid chart dimension, using {}", default);
            default
        }
        None => default,
    }
}

/// `data/` under the project root, or beside the executable when not run from target/
fn default_output_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_overrides() {
        let config = AnalyzerConfig::from_lookup(|key| match key {
            OUTPUT_DIR_VAR => Some("/tmp/wg-out".to_string()),
            CHART_WIDTH_VAR => Some("1024".to_string()),
            _ => None,
        });
        assert_eq!(config.output_dir, PathBuf::from("/tmp/wg-out"));
        assert_eq!(config.chart_width, 1024);
        assert_eq!(config.chart_height, DEFAULT_CHART_HEIGHT);
    }

    #[test]
    fn test_invalid_dimension_falls_back() {
        let config = AnalyzerConfig::from_lookup(|key| match key {
            CHART_WIDTH_VAR => Some("wide".to_string()),
            CHART_HEIGHT_VAR => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.chart_width, DEFAULT_CHART_WIDTH);
        assert_eq!(config.chart_height, DEFAULT_CHART_HEIGHT);
    }

    #[test]
    fn test_oversized_dimension_falls_back() {
        let config = AnalyzerConfig::from_lookup(|key| match key {
            CHART_WIDTH_VAR => Some("40000".to_string()),
            CHART_HEIGHT_VAR => Some(MAX_CHART_DIMENSION.to_string()),
            _ => None,
        });
        assert_eq!(config.chart_width, DEFAULT_CHART_WIDTH);
        assert_eq!(config.chart_height, MAX_CHART_DIMENSION);
    }

    #[test]
    fn test_default_output_dir_ends_in_data() {
        let config = AnalyzerConfig::from_lookup(|_| None);
        assert!(config.output_dir.ends_with("data"));
    }
}
