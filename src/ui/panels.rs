use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – axis selection
// ---------------------------------------------------------------------------

/// Render the axis selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Axes");
    ui.separator();

    let Some(session) = &state.session else {
        ui.label("No dataset loaded.");
        return;
    };

    let axes: Vec<String> = session.axes().names().to_vec();
    if axes.is_empty() {
        ui.label("No numerical columns found.");
    }

    axis_combo(ui, "X-axis:", "x_axis", &axes, &mut state.panel.x);
    axis_combo(ui, "Y-axis:", "y_axis", &axes, &mut state.panel.y);

    ui.add_space(8.0);
    if ui.button("Generate Scatter Plot").clicked() {
        state.generate();
    }

    if let Some(Err(err)) = &state.panel.outcome {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
    }
}

fn axis_combo(ui: &mut Ui, label: &str, id: &str, axes: &[String], value: &mut Option<String>) {
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_deref().unwrap_or("—"))
        .show_ui(ui, |ui: &mut Ui| {
            for name in axes {
                ui.selectable_value(value, Some(name.clone()), name.as_str());
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            let table = session.table();
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} rows, {} columns, {} numerical",
                table.row_count(),
                table.column_count(),
                session.axes().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Delimited text", &["csv", "tsv", "tab", "txt"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
