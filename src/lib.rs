//! Scatter plots with a least-squares overlay for any two numeric columns
//! of a delimited text file.
//!
//! The flow is `load → classify → validate → build`; front ends implement
//! [`Driver`] and hand requests to [`request_plot`].

pub mod data;
pub mod driver;
pub mod plot;
pub mod session;

pub use data::classify::{classify, AxisSet};
pub use data::loader::{load, load_file, LoadError, LoadOptions};
pub use data::model::{Column, ColumnData, ColumnKind, Table};
pub use driver::{plan, request_plot, Driver, PlotError};
pub use plot::regression::{fit, FitError, RegressionFit};
pub use plot::spec::{build, BuildError, PlotSpec};
pub use plot::validate::{validate, AxisSelection, Rejection};
pub use session::Session;
