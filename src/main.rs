//! Weight Goal Calorie Analyzer
//!
//! Interactive terminal dashboard: profile, daily log, insights and export.

use std::io::{stdin, stdout};

use tracing_subscriber::EnvFilter;
use weight_goal::build_info;
use weight_goal::config::AnalyzerConfig;
use weight_goal::dashboard::Dashboard;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interleave with the form prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("weight_goal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("Weight Goal Calorie Analyzer");

    let config = AnalyzerConfig::from_env();
    eprintln!("Output directory: {}", config.output_dir.display());

    let stdin = stdin();
    let mut dashboard = Dashboard::new(stdin.lock(), stdout(), config);
    dashboard.run()?;

    Ok(())
}
