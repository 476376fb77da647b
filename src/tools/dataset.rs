//! Static dataset view
//!
//! Loads a header-row CSV and prepares it for display as a table and a bar
//! chart of one numeric column against another.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::{ToolError, ToolResult};

pub const DEFAULT_DATASET: &str = "Automobile.csv";
pub const DEFAULT_X_COLUMN: &str = "length";
pub const DEFAULT_Y_COLUMN: &str = "mileage";
pub const DEFAULT_X_LABEL: &str = "Length";
pub const DEFAULT_Y_LABEL: &str = "Mileage";
pub const DEFAULT_BAR_COLOR: &str = "#ffaa00";

/// A CSV file held as text cells
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn load<P: AsRef<Path>>(path: P) -> ToolResult<Self> {
        let file = File::open(path.as_ref())?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.as_ref().display(),
            rows = dataset.rows.len(),
            columns = dataset.headers.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> ToolResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let rows = rdr
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> ToolResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ToolError::MissingColumn(name.to_string()))
    }

    /// Parse every cell of a column as a number
    pub fn numeric_column(&self, name: &str) -> ToolResult<Vec<f64>> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                cell.parse::<f64>().map_err(|_| ToolError::InvalidNumber {
                    row: i + 1,
                    column: name.to_string(),
                    value: cell.to_string(),
                })
            })
            .collect()
    }

    /// `y` summed per distinct `x`, in ascending `x`
    pub fn bar_series(&self, x: &str, y: &str) -> ToolResult<Vec<(String, f64)>> {
        let xs = self.numeric_column(x)?;
        let ys = self.numeric_column(y)?;

        let mut pairs: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut bars: Vec<(f64, f64)> = Vec::new();
        for (x, y) in pairs {
            match bars.last_mut() {
                Some(last) if last.0 == x => last.1 += y,
                _ => bars.push((x, y)),
            }
        }

        Ok(bars.into_iter().map(|(x, y)| (x.to_string(), y)).collect())
    }

    /// Render up to `max_rows` rows as an aligned text table
    pub fn render_table(&self, max_rows: usize) -> String {
        let shown = &self.rows[..self.rows.len().min(max_rows)];

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in shown {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let format_row = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = format_row(self.headers.as_slice());
        out.push('\n');
        for row in shown {
            out.push_str(&format_row(row.as_slice()));
            out.push('\n');
        }
        if self.rows.len() > shown.len() {
            out.push_str(&format!("... {} more rows\n", self.rows.len() - shown.len()));
        }
        out
    }
}
