//! Tabular session data: CSV import, trajectory conversion, JSON export.

use anyhow::{bail, ensure, Context, Result};
use quiver_core::stats::{self, Summary};
use quiver_core::trajectory::Trajectory;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Named columns over row-major numeric cells.
///
/// Cells that were not numeric in the source (text fields, blanks) are held
/// as NaN so row and column shapes stay rectangular regardless of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    columns: Vec<String>,
    values: Vec<f64>,
}

/// One summarized column of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    #[serde(flatten)]
    pub summary: Summary,
}

/// The first two numeric columns of a table, paired for an x/y plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DataTable {
    /// Parses CSV text with a header row. Records must match the header
    /// width; fields that do not parse as numbers become NaN cells.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .context("Failed to read the CSV header row")?
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        ensure!(!columns.is_empty(), "CSV header row has no columns");

        let mut values = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Malformed CSV record {}", idx + 1))?;
            for field in record.iter() {
                values.push(field.trim().parse::<f64>().unwrap_or(f64::NAN));
            }
        }
        Ok(Self { columns, values })
    }

    /// Wraps a solved trajectory as a table with a leading `t` column.
    /// `labels` names the state components, e.g. `["y(t)"]`.
    pub fn from_trajectory(trajectory: &Trajectory<f64>, labels: &[&str]) -> Result<Self> {
        ensure!(
            labels.len() == trajectory.dimension(),
            "Got {} state labels for a trajectory of dimension {}",
            labels.len(),
            trajectory.dimension()
        );

        let mut columns = Vec::with_capacity(labels.len() + 1);
        columns.push("t".to_string());
        columns.extend(labels.iter().map(|label| label.to_string()));

        let mut values = Vec::with_capacity(trajectory.len() * columns.len());
        for (t, state) in trajectory.iter() {
            values.push(t);
            values.extend_from_slice(state);
        }
        Ok(Self { columns, values })
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn nrows(&self) -> usize {
        if self.columns.is_empty() {
            0
        } else {
            self.values.len() / self.columns.len()
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.ncols()..(i + 1) * self.ncols()]
    }

    /// Copies out column `j` top to bottom.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.nrows()).map(|i| self.row(i)[j]).collect()
    }

    /// The first `n` rows (all of them when fewer exist), as shown in the
    /// preview pane after a load or a solve.
    pub fn head(&self, n: usize) -> DataTable {
        let rows = n.min(self.nrows());
        DataTable {
            columns: self.columns.clone(),
            values: self.values[..rows * self.ncols()].to_vec(),
        }
    }

    /// Summarizes every column that has at least one finite sample. Columns
    /// that are entirely text or blank in the source are skipped.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        let mut summaries = Vec::new();
        for j in 0..self.ncols() {
            if let Ok(summary) = stats::describe(&self.column(j)) {
                summaries.push(ColumnSummary {
                    column: self.columns[j].clone(),
                    summary,
                });
            }
        }
        summaries
    }

    /// Picks the first two numeric columns as an x/y plot series.
    pub fn plot_series(&self) -> Result<PlotSeries> {
        let numeric: Vec<usize> = (0..self.ncols())
            .filter(|&j| self.column(j).iter().any(|v| v.is_finite()))
            .collect();
        if numeric.len() < 2 {
            bail!("Plotting needs at least two numeric columns.");
        }
        Ok(PlotSeries {
            x_label: self.columns[numeric[0]].clone(),
            y_label: self.columns[numeric[1]].clone(),
            x: self.column(numeric[0]),
            y: self.column(numeric[1]),
        })
    }

    /// Serializes the rows as a pretty-printed JSON array of records,
    /// preserving column order. Non-finite cells export as null.
    pub fn to_json_records(&self) -> Result<String> {
        let mut records = Vec::with_capacity(self.nrows());
        for i in 0..self.nrows() {
            let mut record = Map::new();
            for (name, &cell) in self.columns.iter().zip(self.row(i)) {
                let value = Number::from_f64(cell).map(Value::Number).unwrap_or(Value::Null);
                record.insert(name.clone(), value);
            }
            records.push(Value::Object(record));
        }
        serde_json::to_string_pretty(&records).context("Failed to serialize records as JSON")
    }
}
