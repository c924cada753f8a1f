use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the last plot outcome in the central panel.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    if state.session.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to plot its columns  (File → Open…)");
        });
        return;
    }

    let spec = match &state.panel.outcome {
        Some(Ok(spec)) => spec,
        Some(Err(err)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
            });
            return;
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Pick two numerical columns and press Generate Scatter Plot");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(spec.title.as_str());
    });

    let points = Points::new(PlotPoints::new(spec.points.clone()))
        .name(&spec.y_name)
        .shape(MarkerShape::Circle)
        .radius(3.0)
        .color(Color32::LIGHT_BLUE);

    let line = Line::new(PlotPoints::new(spec.fit_line().to_vec()))
        .name(format!("fit: {}", spec.fit))
        .color(Color32::RED)
        .width(2.0);

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(points);
            plot_ui.line(line);
        });
}
