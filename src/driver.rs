use log::{info, warn};
use thiserror::Error;

use crate::data::classify::AxisSet;
use crate::plot::spec::{self, BuildError, PlotSpec};
use crate::plot::validate::{AxisSelection, Rejection};
use crate::session::Session;

/// Anything that can go wrong between a selection and a drawable plot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Build(#[from] BuildError),
}

// ---------------------------------------------------------------------------
// Driver – the front-end side of a plot request
// ---------------------------------------------------------------------------

/// A front end: collects an axis choice and renders whatever comes back.
/// Rendering state (windows, figures, output streams) belongs to the driver.
pub trait Driver {
    fn collect_selection(&mut self, axes: &AxisSet) -> AxisSelection;

    fn render(&mut self, outcome: Result<PlotSpec, PlotError>);
}

/// Validate a selection against the session and build its plot.
pub fn plan(session: &Session, selection: &AxisSelection) -> Result<PlotSpec, PlotError> {
    selection.validate(session.axes())?;

    // Validation guarantees both names are present.
    let (x, y) = (selection.x().unwrap_or_default(), selection.y().unwrap_or_default());
    Ok(spec::build(session.table(), x, y)?)
}

/// Run one request: collect, validate, build, render. The driver's
/// `render` is called exactly once.
pub fn request_plot<D: Driver + ?Sized>(session: &Session, driver: &mut D) {
    let selection = driver.collect_selection(session.axes());
    let outcome = plan(session, &selection);

    match &outcome {
        Ok(spec) => info!("{} ({} points, {})", spec.title, spec.points.len(), spec.fit),
        Err(err) => warn!("plot request {selection:?} failed: {err}"),
    }

    driver.render(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Table};

    struct Fixed {
        selection: AxisSelection,
        rendered: Vec<Result<PlotSpec, PlotError>>,
    }

    impl Driver for Fixed {
        fn collect_selection(&mut self, _axes: &AxisSet) -> AxisSelection {
            self.selection.clone()
        }

        fn render(&mut self, outcome: Result<PlotSpec, PlotError>) {
            self.rendered.push(outcome);
        }
    }

    fn session() -> Session {
        Session::new(
            Table::new(vec![
                Column::numeric("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
                Column::numeric("y", vec![Some(2.0), Some(4.0), Some(6.0)]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn renders_exactly_once_on_success() {
        let mut driver = Fixed {
            selection: AxisSelection::new("x", "y"),
            rendered: Vec::new(),
        };
        request_plot(&session(), &mut driver);

        assert_eq!(driver.rendered.len(), 1);
        let spec = driver.rendered[0].as_ref().unwrap();
        assert_eq!(spec.points.len(), 3);
    }

    #[test]
    fn rejection_is_rendered_not_built() {
        let mut driver = Fixed {
            selection: AxisSelection::new("x", "x"),
            rendered: Vec::new(),
        };
        request_plot(&session(), &mut driver);

        assert_eq!(
            driver.rendered,
            vec![Err(PlotError::Rejected(Rejection::IdenticalAxes))]
        );
    }
}
