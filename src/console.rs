use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use scatter_creator::{request_plot, AxisSelection, AxisSet, Driver, PlotError, PlotSpec, Session};

use crate::cli::Cli;

// ---------------------------------------------------------------------------
// Console driver – headless rendering to a writer
// ---------------------------------------------------------------------------

/// Takes its selection from the command line and writes the plot
/// descriptor as text or JSON.
pub struct ConsoleDriver<W: Write> {
    selection: AxisSelection,
    json: bool,
    out: W,
    failure: Option<PlotError>,
    write_error: Option<anyhow::Error>,
}

impl<W: Write> ConsoleDriver<W> {
    pub fn new(selection: AxisSelection, json: bool, out: W) -> Self {
        Self {
            selection,
            json,
            out,
            failure: None,
            write_error: None,
        }
    }

    fn write_spec(&mut self, spec: &PlotSpec) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut self.out, spec).context("serializing plot")?;
            writeln!(self.out)?;
            return Ok(());
        }

        writeln!(self.out, "{}", spec.title)?;
        writeln!(self.out, "  x: {}", spec.x_label)?;
        writeln!(self.out, "  y: {}", spec.y_label)?;
        writeln!(self.out, "  points: {}", spec.points.len())?;
        writeln!(self.out, "  fit: {}", spec.fit)?;
        for [x, y] in &spec.points {
            writeln!(self.out, "  {x}\t{y}")?;
        }
        Ok(())
    }

    /// Surface whatever went wrong during rendering.
    pub fn finish(self) -> Result<()> {
        if let Some(err) = self.write_error {
            return Err(err.context("writing plot output"));
        }
        if let Some(err) = self.failure {
            bail!(err);
        }
        Ok(())
    }
}

impl<W: Write> Driver for ConsoleDriver<W> {
    fn collect_selection(&mut self, _axes: &AxisSet) -> AxisSelection {
        self.selection.clone()
    }

    fn render(&mut self, outcome: Result<PlotSpec, PlotError>) {
        match outcome {
            Ok(spec) => {
                if let Err(e) = self.write_spec(&spec) {
                    self.write_error = Some(e);
                }
            }
            Err(err) => self.failure = Some(err),
        }
    }
}

/// Headless entry point.
pub fn run(cli: &Cli) -> Result<()> {
    let path = cli
        .file
        .as_deref()
        .context("a data file is required when running headless")?;
    let session = Session::open(path, &cli.load_options())
        .with_context(|| format!("loading {}", path.display()))?;

    let stdout = io::stdout().lock();

    if cli.x.is_none() && cli.y.is_none() {
        let mut out = stdout;
        if cli.json {
            serde_json::to_writer_pretty(&mut out, session.axes())?;
            writeln!(out)?;
        } else {
            for name in session.axes().iter() {
                writeln!(out, "{name}")?;
            }
        }
        return Ok(());
    }

    let mut driver = ConsoleDriver::new(cli.selection(), cli.json, stdout);
    request_plot(&session, &mut driver);
    driver.finish()
}
