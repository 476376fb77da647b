//! Build metadata
//!
//! Build number and timestamp are injected by build.rs; both fall back to
//! placeholders when the crate is built without it.

use std::fmt;

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("WEIGHT_GOAL_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("WEIGHT_GOAL_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// `str::parse` is not const
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Which build produced a report; embedded in the insights JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (build {}, compiled {})",
            NAME, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner(title: &str) {
    eprintln!("===============================================");
    eprintln!("  {}", title);
    eprintln!("  {}", BuildInfo::current());
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("12a"), None);
    }

    #[test]
    fn test_display_names_package_and_build() {
        let info = BuildInfo {
            version: "1.2.3",
            build_number: 7,
            build_timestamp: "2025-01-09T12:00:00Z",
        };
        assert_eq!(
            info.to_string(),
            "weight-goal 1.2.3 (build 7, compiled 2025-01-09T12:00:00Z)"
        );
    }

    #[test]
    fn test_current_uses_package_version() {
        assert_eq!(BuildInfo::current().version, env!("CARGO_PKG_VERSION"));
    }
}
