use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::CountryColors;
use crate::data::query::{self, MetricPoint};
use crate::state::AppState;
use crate::ui::panels::{report_error, selector};

// ---------------------------------------------------------------------------
// Bar charts (central panel)
// ---------------------------------------------------------------------------

/// One bar per country, coloured per country. Missing values get no bar and
/// are listed underneath instead.
fn metric_bars(
    ui: &mut Ui,
    id: &str,
    metric: &str,
    points: &[MetricPoint<'_>],
    colors: &CountryColors,
) {
    Plot::new(id)
        .legend(Legend::default())
        .height(320.0)
        .y_axis_label(metric)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, point) in points.iter().enumerate() {
                let Some(value) = point.value.value() else {
                    continue;
                };
                let color = colors.color_for(point.country);
                let bar = Bar::new(i as f64, value).name(point.country).fill(color);
                let chart = BarChart::new(vec![bar])
                    .name(point.country)
                    .color(color);
                plot_ui.bar_chart(chart);
            }
        });

    let missing: Vec<&str> = points
        .iter()
        .filter(|p| p.value.is_missing())
        .map(|p| p.country)
        .collect();
    if !missing.is_empty() {
        ui.weak(format!("No data: {}", missing.join(", ")));
    }
}

/// Top-N countries by the metric picked in the side panel.
pub fn ranking_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("Top {} Countries by Selected Metric", state.top_n));
    let Some(metric) = state.rank_metric.clone() else {
        ui.label("No numeric columns to rank by.");
        return;
    };

    let outcome = query::rank_top(&state.dataset, &metric, state.top_n);
    let failure = match outcome {
        Ok(ranked) => {
            ui.label(format!("Top {} Countries by {metric}", ranked.len()));
            let points: Vec<MetricPoint<'_>> = ranked
                .iter()
                .map(|r| MetricPoint {
                    country: r.country,
                    value: r.value,
                })
                .collect();
            metric_bars(ui, "ranking_plot", &metric, &points, &state.country_colors);
            None
        }
        Err(e) => Some(e),
    };
    if let Some(err) = failure {
        report_error(ui, state, &err);
    }
}

/// Two countries side by side on one metric.
pub fn comparison_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Compare Two Countries by a Metric");

    ui.columns(2, |cols: &mut [Ui]| {
        selector(
            &mut cols[0],
            "compare_a",
            "First country",
            &mut state.compare_a,
            &state.countries,
        );
        selector(
            &mut cols[1],
            "compare_b",
            "Second country",
            &mut state.compare_b,
            &state.countries,
        );
    });
    selector(
        ui,
        "compare_metric",
        "Metric to compare",
        &mut state.compare_metric,
        &state.numeric_columns,
    );

    let (Some(a), Some(b), Some(metric)) = (
        state.compare_a.clone(),
        state.compare_b.clone(),
        state.compare_metric.clone(),
    ) else {
        ui.label("Pick two countries and a metric.");
        return;
    };

    let outcome = query::compare_two(&state.dataset, &a, &b, &metric);
    let failure = match outcome {
        Ok(points) => {
            ui.label(format!("{metric} Comparison: {a} vs {b}"));
            metric_bars(ui, "compare_plot", &metric, &points, &state.country_colors);
            None
        }
        Err(e) => Some(e),
    };
    if let Some(err) = failure {
        report_error(ui, state, &err);
    }
}
