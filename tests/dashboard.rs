use std::io::Write;

use country_panda::data::export::export_profile;
use country_panda::data::loader::load_file;
use country_panda::data::query::{compare_two, profile, project_for_map, rank_top};
use country_panda::{CellValue, ColumnKind, DashboardError, Dataset, Numeric};
use tempfile::Builder;

fn load_csv(contents: &str) -> Dataset {
    let mut file = Builder::new().suffix(".csv").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    load_file(file.path(), "country").expect("load csv")
}

const UN_SAMPLE: &str = "\
country,Region,Surface area (km2),Population in thousands (2017),GDP per capita (current US$),Urban population (% of total population)
Afghanistan,SouthernAsia,652864,35530,623.2,26.7
Albania,SouthernEurope,28748,2930,3984.2,57.4
Nauru,Micronesia,21,11,...,100.0
Tuvalu,Polynesia,26,11,3474.6,-99
Japan,EasternAsia,377930,127484,34628.7,93.5
";

#[test]
fn small_table_rank_profile_and_compare() {
    let ds = load_csv("country,pop\nA,100\nB,bad\nC,300\n");

    let top = rank_top(&ds, "pop", 10).unwrap();
    let order: Vec<(&str, Numeric)> = top.iter().map(|r| (r.country, r.value)).collect();
    assert_eq!(
        order,
        vec![
            ("C", Numeric::Value(300.0)),
            ("A", Numeric::Value(100.0)),
            ("B", Numeric::Missing),
        ]
    );

    let a = profile(&ds, "A").unwrap();
    assert_eq!(a.entries.len(), 1);
    assert_eq!(a.entries[0].indicator, "pop");
    assert_eq!(a.entries[0].value.to_string(), "100");

    let [b, c] = compare_two(&ds, "B", "C", "pop").unwrap();
    assert_eq!((b.country, b.value), ("B", Numeric::Missing));
    assert_eq!((c.country, c.value), ("C", Numeric::Value(300.0)));
}

#[test]
fn un_style_placeholders_do_not_break_views() {
    let ds = load_csv(UN_SAMPLE);

    assert_eq!(
        ds.list_numeric_columns(),
        vec![
            "Surface area (km2)",
            "Population in thousands (2017)",
            "Urban population (% of total population)",
        ]
    );
    let gdp = ds.column_index("GDP per capita (current US$)").unwrap();
    assert_eq!(ds.columns()[gdp].kind, ColumnKind::Text);

    let richest = rank_top(&ds, "GDP per capita (current US$)", 3).unwrap();
    let names: Vec<&str> = richest.iter().map(|r| r.country).collect();
    assert_eq!(names, vec!["Japan", "Albania", "Tuvalu"]);

    let by_population = rank_top(&ds, "Population in thousands (2017)", 10).unwrap();
    let tail: Vec<&str> = by_population[3..].iter().map(|r| r.country).collect();
    assert_eq!(tail, vec!["Nauru", "Tuvalu"]);

    let map = project_for_map(&ds, "GDP per capita (current US$)").unwrap();
    assert_eq!(map.points.len(), ds.len());
    assert_eq!(map.points[2].country, "Nauru");
    assert!(map.points[2].value.is_missing());
    assert_eq!(map.range(), Some((623.2, 34628.7)));
}

#[test]
fn profile_export_round_trips_through_csv() {
    let ds = load_csv(UN_SAMPLE);
    let nauru = profile(&ds, "Nauru").unwrap();
    assert_eq!(nauru.entries.len(), ds.columns().len() - 1);
    assert_eq!(nauru.entries[3].value, &CellValue::Text("...".into()));

    let export = export_profile(&nauru).unwrap();
    assert_eq!(export.file_name, "Nauru_profile.csv");
    assert_eq!(export.content_type, "text/csv");
    let text = String::from_utf8(export.bytes).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Indicator,Value"));
    assert_eq!(lines.next(), Some("Region,Micronesia"));
    assert_eq!(
        text.lines().last(),
        Some("Urban population (% of total population),100.0")
    );
    assert_eq!(text.lines().count(), nauru.entries.len() + 1);
}

#[test]
fn per_request_errors_leave_the_session_usable() {
    let ds = load_csv(UN_SAMPLE);

    assert!(matches!(profile(&ds, "Narnia"), Err(DashboardError::NotFound(_))));
    assert!(matches!(
        rank_top(&ds, "Happiness", 10),
        Err(DashboardError::InvalidColumn(_))
    ));
    assert!(matches!(
        compare_two(&ds, "Japan", "Narnia", "Surface area (km2)"),
        Err(DashboardError::NotFound(_))
    ));

    let [j, a] = compare_two(&ds, "Japan", "Albania", "Surface area (km2)").unwrap();
    assert_eq!(j.value, Numeric::Value(377930.0));
    assert_eq!(a.value, Numeric::Value(28748.0));
}

#[test]
fn malformed_source_is_fatal_load_error() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"country,a\nA,1,extra\n").unwrap();
    assert!(matches!(
        load_file(file.path(), "country"),
        Err(DashboardError::Load(_))
    ));
}
