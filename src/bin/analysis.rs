//! Dataset dashboard: prints a CSV as a table and charts one column against another
//! Usage: cargo run --bin analysis -- [path/to/Automobile.csv]

use tracing_subscriber::EnvFilter;
use weight_goal::build_info;
use weight_goal::config::AnalyzerConfig;
use weight_goal::tools::charts::{self, BarChartStyle};
use weight_goal::tools::dataset::{
    Dataset, DEFAULT_BAR_COLOR, DEFAULT_DATASET, DEFAULT_X_COLUMN, DEFAULT_X_LABEL,
    DEFAULT_Y_COLUMN, DEFAULT_Y_LABEL,
};

const TABLE_ROWS: usize = 50;
const CHART_FILE: &str = "analysis.png";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("weight_goal=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("Analysis");

    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).map(|s| s.as_str()).unwrap_or(DEFAULT_DATASET);
    let config = AnalyzerConfig::from_env();

    let dataset = Dataset::load(path)?;
    println!("Analysis\n");
    print!("{}", dataset.render_table(TABLE_ROWS));

    let bars = dataset.bar_series(DEFAULT_X_COLUMN, DEFAULT_Y_COLUMN)?;
    let style = BarChartStyle {
        x_label: DEFAULT_X_LABEL.to_string(),
        y_label: DEFAULT_Y_LABEL.to_string(),
        color: charts::parse_hex_color(DEFAULT_BAR_COLOR)
            .ok_or("invalid default bar colour")?,
    };

    let png = charts::generate_bar_chart(&bars, &style, config.chart_width, config.chart_height)?;
    let chart_path = charts::write_png(&config.output_dir, CHART_FILE, &png)?;
    println!("\nChart saved to {}", chart_path.display());

    Ok(())
}
