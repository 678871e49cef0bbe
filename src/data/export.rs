use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use super::query::CountryProfile;

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A profile rendered as a downloadable CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileExport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Indicator")]
    indicator: &'a str,
    #[serde(rename = "Value")]
    value: String,
}

/// Serialize a profile as `Indicator,Value` rows.
pub fn export_profile(profile: &CountryProfile<'_>) -> Result<ProfileExport> {
    // Header written by hand so an empty profile still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(["Indicator", "Value"])
        .context("writing CSV header")?;
    for entry in &profile.entries {
        writer
            .serialize(ExportRow {
                indicator: entry.indicator,
                value: entry.value.to_string(),
            })
            .with_context(|| format!("writing indicator '{}'", entry.indicator))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV export: {e}"))?;

    Ok(ProfileExport {
        file_name: format!("{}_profile.csv", profile.country),
        content_type: CSV_CONTENT_TYPE,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::query::ProfileEntry;

    #[test]
    fn writes_indicator_value_rows() {
        let population = CellValue::Integer(18055);
        let region = CellValue::Text("South America, Andes".into());
        let growth = CellValue::Missing;
        let profile = CountryProfile {
            country: "Chile",
            entries: vec![
                ProfileEntry { indicator: "Region", value: &region },
                ProfileEntry { indicator: "Population", value: &population },
                ProfileEntry { indicator: "GDP growth", value: &growth },
            ],
        };

        let export = export_profile(&profile).unwrap();
        assert_eq!(export.file_name, "Chile_profile.csv");
        assert_eq!(export.content_type, "text/csv");
        assert_eq!(
            String::from_utf8(export.bytes).unwrap(),
            "Indicator,Value\nRegion,\"South America, Andes\"\nPopulation,18055\nGDP growth,\n"
        );
    }

    #[test]
    fn empty_profile_still_has_header() {
        let profile = CountryProfile {
            country: "Nauru",
            entries: Vec::new(),
        };
        let export = export_profile(&profile).unwrap();
        assert_eq!(export.bytes, b"Indicator,Value\n");
    }

    #[test]
    fn export_reads_back_as_csv() {
        let ds = crate::data::model::tests::indicators();
        let profile = crate::data::query::profile(&ds, "Bhutan").unwrap();
        let export = export_profile(&profile).unwrap();

        let mut reader = csv::Reader::from_reader(export.bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Indicator", "Value"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), profile.entries.len());
        assert_eq!(&rows[1][0], "Population");
        assert_eq!(&rows[1][1], "798");
        // whole floats keep their fractional part
        assert_eq!(&rows[2][0], "GDP growth");
        assert_eq!(&rows[2][1], "-99.0");
    }
}
