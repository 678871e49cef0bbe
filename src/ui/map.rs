use eframe::egui::{self, RichText, Ui};

use crate::color::ColorScale;
use crate::data::query::{self, MapProjection};
use crate::state::AppState;
use crate::ui::panels::{report_error, selector};

// ---------------------------------------------------------------------------
// Metric "map": every country shaded on a continuous scale
// ---------------------------------------------------------------------------

pub fn map_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Global Metric Map");
    selector(
        ui,
        "map_metric",
        "Metric to display",
        &mut state.map_metric,
        &state.numeric_columns,
    );
    let Some(metric) = state.map_metric.clone() else {
        ui.label("No numeric columns to display.");
        return;
    };

    let outcome = query::project_for_map(&state.dataset, &metric);
    let failure = match outcome {
        Ok(projection) => {
            shaded_table(ui, &projection);
            None
        }
        Err(e) => Some(e),
    };
    if let Some(err) = failure {
        report_error(ui, state, &err);
    }
}

fn legend(ui: &mut Ui, scale: &ColorScale) {
    const STEPS: usize = 24;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{}", scale.min()));
        ui.spacing_mut().item_spacing.x = 0.0;
        for i in 0..=STEPS {
            let v = scale.min() + (scale.max() - scale.min()) * i as f64 / STEPS as f64;
            ui.colored_label(scale.color_for(v), "█");
        }
        ui.spacing_mut().item_spacing.x = 6.0;
        ui.label(format!("{}", scale.max()));
    });
}

/// Missing values are skipped here, the projection itself keeps them.
fn shaded_table(ui: &mut Ui, projection: &MapProjection<'_>) {
    let Some((min, max)) = projection.range() else {
        ui.label(format!("World Map: {} has no numeric values.", projection.metric));
        return;
    };
    let scale = ColorScale::new(min, max);

    ui.label(format!("World Map: {}", projection.metric));
    legend(ui, &scale);

    let shaded: Vec<(&str, f64)> = projection
        .points
        .iter()
        .filter_map(|p| Some((p.country, p.value.value()?)))
        .collect();

    egui::Grid::new(ui.make_persistent_id(format!("map_table_{}", projection.metric)))
        .striped(true)
        .min_col_width(24.0)
        .spacing([8.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            ui.label(RichText::new("Country").strong());
            ui.label(RichText::new(projection.metric).strong());
            ui.end_row();

            for (country, value) in &shaded {
                ui.colored_label(scale.color_for(*value), "■");
                ui.label(*country);
                ui.label(value.to_string());
                ui.end_row();
            }
        });
}
