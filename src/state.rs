use crate::color::CountryColors;
use crate::config::DashboardConfig;
use crate::data::error::DashboardError;
use crate::data::export::{ProfileExport, export_profile};
use crate::data::model::Dataset;
use crate::data::query;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once before the window opens and never replaced;
/// every view reads from it through `data::query`.
pub struct AppState {
    pub title: String,

    pub dataset: Dataset,

    /// Sorted distinct countries (selector contents).
    pub countries: Vec<String>,

    /// Numeric columns in dataset order (metric selector contents).
    pub numeric_columns: Vec<String>,

    /// One colour per country, shared by all charts.
    pub country_colors: CountryColors,

    pub selected_country: Option<String>,
    pub rank_metric: Option<String>,
    pub top_n: usize,

    pub compare_a: Option<String>,
    pub compare_b: Option<String>,
    pub compare_metric: Option<String>,

    pub map_metric: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        let countries: Vec<String> = dataset
            .list_countries()
            .into_iter()
            .map(str::to_string)
            .collect();
        let numeric_columns: Vec<String> = dataset
            .list_numeric_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        let country_colors = CountryColors::new(countries.iter().map(String::as_str));

        let first_country = countries.first().cloned();
        let first_metric = numeric_columns.first().cloned();

        Self {
            title: config.title.clone(),
            dataset,
            country_colors,
            selected_country: first_country.clone(),
            rank_metric: first_metric.clone(),
            top_n: config.top_n,
            compare_a: first_country.clone(),
            compare_b: first_country,
            compare_metric: first_metric.clone(),
            map_metric: first_metric,
            countries,
            numeric_columns,
            status_message: None,
        }
    }

    /// Build the CSV export of the selected country's profile.
    pub fn export_selected_profile(&self) -> Result<Option<ProfileExport>, String> {
        let Some(country) = &self.selected_country else {
            return Ok(None);
        };
        let profile = query::profile(&self.dataset, country).map_err(|e| e.to_string())?;
        export_profile(&profile)
            .map(Some)
            .map_err(|e| format!("Export failed: {e:#}"))
    }

    /// Record a per-request failure without interrupting the session.
    pub fn report(&mut self, err: &DashboardError) {
        let msg = err.to_string();
        if self.status_message.as_deref() != Some(msg.as_str()) {
            log::warn!("{msg}");
            self.status_message = Some(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::indicators;

    #[test]
    fn selections_start_at_first_entries() {
        let state = AppState::new(indicators(), &DashboardConfig::default());
        assert_eq!(state.countries, vec!["Albania", "Bhutan", "Chile", "Denmark"]);
        assert_eq!(state.numeric_columns, vec!["Population", "GDP growth"]);
        assert_eq!(state.selected_country.as_deref(), Some("Albania"));
        assert_eq!(state.rank_metric.as_deref(), Some("Population"));
        assert_eq!(state.compare_a, state.compare_b);
        assert_eq!(state.map_metric.as_deref(), Some("Population"));
        assert_eq!(state.top_n, 10);
    }

    #[test]
    fn exports_selected_country() {
        let mut state = AppState::new(indicators(), &DashboardConfig::default());
        state.selected_country = Some("Chile".into());
        let export = state.export_selected_profile().unwrap().unwrap();
        assert_eq!(export.file_name, "Chile_profile.csv");

        state.selected_country = Some("Atlantis".into());
        let err = state.export_selected_profile().unwrap_err();
        assert_eq!(err, "Country not found: Atlantis");

        state.selected_country = None;
        assert!(state.export_selected_profile().unwrap().is_none());
    }

    #[test]
    fn report_sets_status_message() {
        let mut state = AppState::new(indicators(), &DashboardConfig::default());
        state.report(&DashboardError::InvalidColumn("GDP".into()));
        assert_eq!(state.status_message.as_deref(), Some("Unknown column: GDP"));
    }
}
