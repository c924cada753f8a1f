use std::fmt;

use log::debug;
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// RegressionFit
// ---------------------------------------------------------------------------

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; `None` when y is constant.
    pub r_squared: Option<f64>,
}

impl RegressionFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for RegressionFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.4} * x + {:.4}", self.slope, self.intercept)?;
        if let Some(r2) = self.r_squared {
            write!(f, "  (R² = {r2:.4})")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// What makes a set of points unfit for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    TooFewPoints(usize),
    ConstantX,
    NonFinite,
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::TooFewPoints(n) => {
                write!(f, "need at least 2 paired values, found {n}")
            }
            Degeneracy::ConstantX => write!(f, "all x values are identical"),
            Degeneracy::NonFinite => write!(f, "the data produced a non-finite slope or intercept"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("cannot fit a line: {0}")]
    DegenerateInput(Degeneracy),
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

/// Drop every row where either side is missing, keeping row order.
pub fn paired(x: &[Option<f64>], y: &[Option<f64>]) -> Vec<[f64; 2]> {
    x.iter()
        .zip(y)
        .filter_map(|(xi, yi)| Some([(*xi)?, (*yi)?]))
        .collect()
}

/// Fit two equal-length sequences with missing values dropped pairwise.
pub fn fit(x: &[Option<f64>], y: &[Option<f64>]) -> Result<RegressionFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    fit_points(&paired(x, y))
}

/// Least-squares fit over complete `[x, y]` points.
pub fn fit_points(points: &[[f64; 2]]) -> Result<RegressionFit, FitError> {
    let n = points.len();
    if n < 2 {
        return Err(FitError::DegenerateInput(Degeneracy::TooFewPoints(n)));
    }

    // Identical x values leave a tiny non-zero sxx after rounding the mean,
    // so compare the data itself.
    let first_x = points[0][0];
    if points.iter().all(|p| p[0] == first_x) {
        return Err(FitError::DegenerateInput(Degeneracy::ConstantX));
    }

    let nf = n as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / nf;

    // Centered sums; the 1/n factors of cov and var cancel in the slope.
    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for &[xi, yi] in points {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Err(FitError::DegenerateInput(Degeneracy::ConstantX));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::DegenerateInput(Degeneracy::NonFinite));
    }

    let r_squared = (syy > 0.0).then(|| (sxy * sxy / (sxx * syy)).min(1.0));
    let fit = RegressionFit {
        slope,
        intercept,
        r_squared,
    };
    debug!("fitted {fit} over {n} points");
    Ok(fit)
}
