use std::path::{Path, PathBuf};

use scatter_creator::{
    request_plot, AxisSelection, AxisSet, Driver, LoadOptions, PlotError, PlotSpec, Session,
};

// ---------------------------------------------------------------------------
// Selection panel – the desktop driver
// ---------------------------------------------------------------------------

/// Axis combo boxes plus the last rendered outcome.
#[derive(Default)]
pub struct SelectionPanel {
    pub x: Option<String>,
    pub y: Option<String>,
    pub outcome: Option<Result<PlotSpec, PlotError>>,
}

impl SelectionPanel {
    /// Preselect the first two numeric columns.
    fn reset(&mut self, axes: &AxisSet) {
        let mut names = axes.iter().map(str::to_string);
        self.x = names.next();
        self.y = names.next();
        self.outcome = None;
    }
}

impl Driver for SelectionPanel {
    fn collect_selection(&mut self, _axes: &AxisSet) -> AxisSelection {
        AxisSelection {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }

    fn render(&mut self, outcome: Result<PlotSpec, PlotError>) {
        self.outcome = Some(outcome);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub session: Option<Session>,

    /// File the session came from.
    pub source: Option<PathBuf>,

    pub panel: SelectionPanel,

    pub load_options: LoadOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(load_options: LoadOptions) -> Self {
        Self {
            load_options,
            ..Default::default()
        }
    }

    /// Load a file, replacing any current session.
    pub fn load_path(&mut self, path: &Path) {
        match Session::open(path, &self.load_options) {
            Ok(session) => self.set_session(session, path),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded session and reset the axis choice.
    pub fn set_session(&mut self, session: Session, path: &Path) {
        self.panel.reset(session.axes());
        self.status_message = match session.axes().len() {
            n if n < 2 => Some(format!(
                "Error: {}",
                scatter_creator::Rejection::InsufficientNumericColumns
            )),
            _ => None,
        };
        self.session = Some(session);
        self.source = Some(path.to_path_buf());
    }

    /// Run a plot request through the panel.
    pub fn generate(&mut self) {
        if let Some(session) = &self.session {
            request_plot(session, &mut self.panel);
        }
    }
}
