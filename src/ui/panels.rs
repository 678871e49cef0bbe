use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::error::DashboardError;
use crate::data::query::{self, ProfileEntry};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Labelled combo box writing the chosen option into `current`.
pub fn selector(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: &mut Option<String>,
    options: &[String],
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        let selected_text = current.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected_text)
            .height(320.0)
            .show_ui(ui, |ui: &mut Ui| {
                for opt in options {
                    let is_selected = current.as_deref() == Some(opt.as_str());
                    if ui.selectable_label(is_selected, opt).clicked() {
                        *current = Some(opt.clone());
                    }
                }
            });
    });
}

/// Show a per-view failure inline and in the status bar.
pub fn report_error(ui: &mut Ui, state: &mut AppState, err: &DashboardError) {
    ui.colored_label(Color32::RED, err.to_string());
    state.report(err);
}

// ---------------------------------------------------------------------------
// Left side panel – primary selections
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("UN Country Profiles");
    ui.separator();

    if state.countries.is_empty() {
        ui.label("Dataset has no countries.");
        return;
    }

    ui.strong("Country");
    selector(
        ui,
        "selected_country",
        "Select a country",
        &mut state.selected_country,
        &state.countries,
    );
    ui.separator();

    ui.strong("Ranking");
    if state.numeric_columns.is_empty() {
        ui.label("No numeric columns.");
    } else {
        selector(
            ui,
            "rank_metric",
            "View top countries by",
            &mut state.rank_metric,
            &state.numeric_columns,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(&state.title);
        ui.separator();

        ui.label(format!(
            "{} rows, {} countries, {} numeric columns",
            state.dataset.len(),
            state.countries.len(),
            state.numeric_columns.len()
        ));

        if let Some(msg) = state.status_message.clone() {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
            if ui.small_button("✕").clicked() {
                state.status_message = None;
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Country profile
// ---------------------------------------------------------------------------

/// Profile of the selected country in two columns, plus the CSV download.
pub fn profile_section(ui: &mut Ui, state: &mut AppState) {
    let Some(country) = state.selected_country.clone() else {
        ui.label("Select a country to see its profile.");
        return;
    };
    ui.heading(format!("Country Profile: {country}"));

    let outcome = query::profile(&state.dataset, &country);
    let failure = match outcome {
        Ok(profile) => {
            let mid = profile.entries.len() / 2;
            let (left, right) = profile.entries.split_at(mid);
            ui.columns(2, |cols: &mut [Ui]| {
                entry_list(&mut cols[0], left);
                entry_list(&mut cols[1], right);
            });
            None
        }
        Err(e) => Some(e),
    };
    if let Some(err) = failure {
        report_error(ui, state, &err);
        return;
    }

    ui.add_space(8.0);
    ui.strong("Download Profile");
    if ui.button("Download Country Profile as CSV").clicked() {
        save_profile_dialog(state);
    }
}

fn entry_list(ui: &mut Ui, entries: &[ProfileEntry<'_>]) {
    for entry in entries {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong(format!("{}:", entry.indicator));
            if entry.value.is_missing() {
                ui.weak("n/a");
            } else {
                ui.label(entry.value.to_string());
            }
        });
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_profile_dialog(state: &mut AppState) {
    let export = match state.export_selected_profile() {
        Ok(Some(export)) => export,
        Ok(None) => return,
        Err(msg) => {
            log::error!("{msg}");
            state.status_message = Some(msg);
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Save country profile")
        .set_file_name(&export.file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match std::fs::write(&path, &export.bytes) {
            Ok(()) => {
                log::info!(
                    "Saved {} ({}, {} bytes) to {}",
                    export.file_name,
                    export.content_type,
                    export.bytes.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save profile: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
