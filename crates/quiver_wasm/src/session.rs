//! Session state behind the workbench UI: one current dataset and the
//! operations the frontend toolbar maps onto.

use quiver_core::problem::{integrate, InitialValueProblem};
use quiver_core::traits::FnField;
use wasm_bindgen::prelude::*;

use crate::table::DataTable;

#[wasm_bindgen]
pub struct Session {
    table: Option<DataTable>,
}

impl Session {
    fn current(&self) -> Result<&DataTable, JsValue> {
        self.table.as_ref().ok_or_else(|| {
            JsValue::from_str("No dataset loaded. Import a CSV or solve a problem first.")
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Session {
        console_error_panic_hook::set_once();
        Session { table: None }
    }

    /// Replaces the current dataset with parsed CSV text and returns the
    /// number of data rows.
    pub fn load_csv(&mut self, text: &str) -> Result<usize, JsValue> {
        let table = DataTable::from_csv(text).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let rows = table.nrows();
        self.table = Some(table);
        Ok(rows)
    }

    /// Row count of the current dataset, zero when none is loaded.
    pub fn rows(&self) -> usize {
        self.table.as_ref().map(DataTable::nrows).unwrap_or(0)
    }

    /// Column names of the current dataset, empty when none is loaded.
    pub fn column_names(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|table| table.columns().to_vec())
            .unwrap_or_default()
    }

    /// The first `n` rows of the current dataset, for the preview pane.
    pub fn head(&self, n: usize) -> Result<JsValue, JsValue> {
        let head = self.current()?.head(n);
        serde_wasm_bindgen::to_value(&head)
            .map_err(|err| JsValue::from_str(&format!("Failed to serialize preview: {err}")))
    }

    /// Per-column summary statistics of the current dataset.
    pub fn describe(&self) -> Result<JsValue, JsValue> {
        let summaries = self.current()?.describe();
        serde_wasm_bindgen::to_value(&summaries)
            .map_err(|err| JsValue::from_str(&format!("Failed to serialize summaries: {err}")))
    }

    /// The first two numeric columns of the current dataset, paired as the
    /// x/y series the plot panel draws.
    pub fn plot_series(&self) -> Result<JsValue, JsValue> {
        let series = self
            .current()?
            .plot_series()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        serde_wasm_bindgen::to_value(&series)
            .map_err(|err| JsValue::from_str(&format!("Failed to serialize series: {err}")))
    }

    /// Solves dy/dt = rate * y and stores the trajectory as the current
    /// dataset, returning its row count. The workbench default run is
    /// rate = -2, t0 = 0, y0 = 1, step = 0.1, t_end = 5.
    pub fn solve_decay(
        &mut self,
        rate: f64,
        t0: f64,
        y0: f64,
        step: f64,
        t_end: f64,
    ) -> Result<usize, JsValue> {
        let problem = InitialValueProblem::scalar(move |_t, y| rate * y, t0, y0, step, t_end)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let trajectory = integrate(&problem);
        let table = DataTable::from_trajectory(&trajectory, &["y(t)"])
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let rows = table.nrows();
        self.table = Some(table);
        Ok(rows)
    }

    /// Solves the harmonic oscillator x'' = -omega^2 x as a first-order
    /// system in (x, v) and stores the trajectory as the current dataset,
    /// returning its row count.
    pub fn solve_oscillator(
        &mut self,
        omega: f64,
        t0: f64,
        x0: f64,
        v0: f64,
        step: f64,
        t_end: f64,
    ) -> Result<usize, JsValue> {
        let rhs = FnField(move |_t: f64, y: &[f64], dydt: &mut [f64]| {
            dydt[0] = y[1];
            dydt[1] = -(omega * omega) * y[0];
        });
        let problem = InitialValueProblem::new(rhs, t0, vec![x0, v0], step, t_end)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let trajectory = integrate(&problem);
        let table = DataTable::from_trajectory(&trajectory, &["x(t)", "v(t)"])
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let rows = table.nrows();
        self.table = Some(table);
        Ok(rows)
    }

    /// Serializes the current dataset as a JSON array of records, the same
    /// shape the export button writes to disk.
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.current()?
            .to_json_records()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_SAMPLE: &str = "t,y\n0.0,1.0\n0.5,0.6\n1.0,0.35\n";

    #[test]
    fn session_starts_without_a_dataset() {
        let session = Session::new();
        assert_eq!(session.rows(), 0);
        assert!(session.column_names().is_empty());
    }

    #[test]
    fn load_csv_replaces_the_dataset() {
        let mut session = Session::new();
        let rows = session.load_csv(CSV_SAMPLE).expect("valid CSV");
        assert_eq!(rows, 3);
        assert_eq!(session.rows(), 3);
        assert_eq!(session.column_names(), vec!["t", "y"]);
    }

    #[test]
    fn solve_decay_stores_the_default_run() {
        let mut session = Session::new();
        let rows = session
            .solve_decay(-2.0, 0.0, 1.0, 0.1, 5.0)
            .expect("valid decay configuration");
        assert!(rows >= 51, "expected the full horizon, got {rows} rows");
        assert_eq!(session.column_names(), vec!["t", "y(t)"]);

        let json = session.export_json().expect("exportable dataset");
        let records: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        let array = records.as_array().expect("array of records");
        assert_eq!(array.len(), rows);
        assert_eq!(array[0]["t"], serde_json::json!(0.0));
        assert_eq!(array[0]["y(t)"], serde_json::json!(1.0));

        let t = array[10]["t"].as_f64().expect("numeric t");
        let y = array[10]["y(t)"].as_f64().expect("numeric y");
        assert!((y - (-2.0 * t).exp()).abs() < 1e-4);
    }

    #[test]
    fn solve_oscillator_stores_a_planar_dataset() {
        let mut session = Session::new();
        let rows = session
            .solve_oscillator(1.0, 0.0, 1.0, 0.0, 0.25, 1.0)
            .expect("valid oscillator configuration");
        assert_eq!(rows, 5);
        assert_eq!(session.column_names(), vec!["t", "x(t)", "v(t)"]);
    }

    #[test]
    fn solving_overwrites_a_loaded_csv() {
        let mut session = Session::new();
        session.load_csv(CSV_SAMPLE).expect("valid CSV");
        session
            .solve_oscillator(1.0, 0.0, 1.0, 0.0, 0.5, 1.0)
            .expect("valid oscillator configuration");
        assert_eq!(session.column_names(), vec!["t", "x(t)", "v(t)"]);
        assert_eq!(session.rows(), 3);
    }
}
