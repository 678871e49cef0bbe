use super::error::DashboardError;
use super::model::{CellValue, Dataset, Row};
use super::numeric::Numeric;

// ---------------------------------------------------------------------------
// Derived views: all pure reads over an immutable Dataset
// ---------------------------------------------------------------------------

/// Default size of the ranking shown in the bar chart.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry<'a> {
    pub indicator: &'a str,
    pub value: &'a CellValue,
}

/// Every indicator of one country, key column excluded, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryProfile<'a> {
    pub country: &'a str,
    pub entries: Vec<ProfileEntry<'a>>,
}

/// A row of the ranking together with its coerced sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow<'a> {
    /// Position of the row in the dataset.
    pub index: usize,
    pub country: &'a str,
    pub value: Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint<'a> {
    pub country: &'a str,
    pub value: Numeric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapProjection<'a> {
    pub metric: &'a str,
    pub points: Vec<MetricPoint<'a>>,
}

impl MapProjection<'_> {
    /// `(min, max)` over the non-missing values.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value.value())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn metric_index(dataset: &Dataset, metric: &str) -> Result<usize, DashboardError> {
    dataset
        .column_index(metric)
        .ok_or_else(|| DashboardError::InvalidColumn(metric.to_string()))
}

fn lookup<'a>(dataset: &'a Dataset, country: &str) -> Result<&'a Row, DashboardError> {
    dataset
        .find_row(country)
        .ok_or_else(|| DashboardError::NotFound(country.to_string()))
}

/// Profile of `country`. With duplicate keys the first row wins.
pub fn profile<'a>(
    dataset: &'a Dataset,
    country: &str,
) -> Result<CountryProfile<'a>, DashboardError> {
    let row = lookup(dataset, country)?;
    let key = dataset.key_index();
    let entries = dataset
        .columns()
        .iter()
        .zip(&row.cells)
        .enumerate()
        .filter(|(idx, _)| *idx != key)
        .map(|(_, (col, value))| ProfileEntry {
            indicator: col.name.as_str(),
            value,
        })
        .collect();
    Ok(CountryProfile {
        country: dataset.country_of(row),
        entries,
    })
}

/// The `n` rows with the largest `metric`, descending.
///
/// Uncoercible values sort last. The sort is stable, so ties and missing
/// values keep their dataset order.
pub fn rank_top<'a>(
    dataset: &'a Dataset,
    metric: &str,
    n: usize,
) -> Result<Vec<RankedRow<'a>>, DashboardError> {
    let col = metric_index(dataset, metric)?;
    let mut ranked: Vec<RankedRow<'a>> = dataset
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| RankedRow {
            index,
            country: dataset.country_of(row),
            value: Numeric::coerce(&row.cells[col]),
        })
        .collect();
    ranked.sort_by(|a, b| b.value.rank_cmp(&a.value));
    ranked.truncate(n);
    Ok(ranked)
}

/// `metric` for two countries, in the order they were asked for.
pub fn compare_two<'a>(
    dataset: &'a Dataset,
    country_a: &str,
    country_b: &str,
    metric: &str,
) -> Result<[MetricPoint<'a>; 2], DashboardError> {
    let col = metric_index(dataset, metric)?;
    let point = |country: &str| -> Result<MetricPoint<'a>, DashboardError> {
        let row = lookup(dataset, country)?;
        Ok(MetricPoint {
            country: dataset.country_of(row),
            value: Numeric::coerce(&row.cells[col]),
        })
    };
    Ok([point(country_a)?, point(country_b)?])
}

/// `metric` for every row. Missing values are kept; the renderer skips them.
pub fn project_for_map<'a>(
    dataset: &'a Dataset,
    metric: &str,
) -> Result<MapProjection<'a>, DashboardError> {
    let col = metric_index(dataset, metric)?;
    let points = dataset
        .rows()
        .iter()
        .map(|row| MetricPoint {
            country: dataset.country_of(row),
            value: Numeric::coerce(&row.cells[col]),
        })
        .collect();
    Ok(MapProjection {
        metric: dataset.columns()[col].name.as_str(),
        points,
    })
}
