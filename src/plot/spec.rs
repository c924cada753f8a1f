use serde::Serialize;
use thiserror::Error;

use super::regression::{self, FitError, RegressionFit};
use crate::data::model::Table;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Column '{0}' does not exist.")]
    UnknownColumn(String),

    #[error("Column '{0}' is not a numerical column.")]
    NotNumeric(String),

    #[error("Not enough data to plot: {pairs} complete (x, y) pair(s), at least 2 are needed.")]
    InsufficientData { pairs: usize },

    #[error("Cannot fit a regression line: {0}")]
    DegenerateInput(FitError),
}

// ---------------------------------------------------------------------------
// PlotSpec – everything a front end needs to draw one scatter + fit
// ---------------------------------------------------------------------------

/// Self-contained description of one scatter plot with its regression
/// overlay. Points keep the table's row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_name: String,
    pub y_name: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
    pub fit: RegressionFit,
}

impl PlotSpec {
    pub fn title_for(x_name: &str, y_name: &str) -> String {
        format!("Scatter Plot of {y_name} vs {x_name}")
    }

    /// Endpoints of the fitted line across the x-range of the points.
    pub fn fit_line(&self) -> [[f64; 2]; 2] {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[0]), hi.max(p[0]))
            });
        [[lo, self.fit.predict(lo)], [hi, self.fit.predict(hi)]]
    }
}

/// Build the plot for two named columns of `table`. All-or-nothing: any
/// failure returns an error and no partial spec.
pub fn build(table: &Table, x_name: &str, y_name: &str) -> Result<PlotSpec, BuildError> {
    let xs = numeric_column(table, x_name)?;
    let ys = numeric_column(table, y_name)?;

    let points = regression::paired(xs, ys);
    if points.len() < 2 {
        return Err(BuildError::InsufficientData {
            pairs: points.len(),
        });
    }

    let fit = regression::fit_points(&points).map_err(BuildError::DegenerateInput)?;

    Ok(PlotSpec {
        title: PlotSpec::title_for(x_name, y_name),
        x_name: x_name.to_string(),
        y_name: y_name.to_string(),
        x_label: x_name.to_string(),
        y_label: y_name.to_string(),
        points,
        fit,
    })
}

fn numeric_column<'t>(table: &'t Table, name: &str) -> Result<&'t [Option<f64>], BuildError> {
    table
        .column(name)
        .ok_or_else(|| BuildError::UnknownColumn(name.to_string()))?
        .numeric_values()
        .ok_or_else(|| BuildError::NotNumeric(name.to_string()))
}
