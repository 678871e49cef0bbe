use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

const HEADERS: [&str; 8] = [
    "country",
    "Region",
    "Surface area (km2)",
    "Population in thousands (2017)",
    "GDP growth rate (annual %, const. 2005 prices)",
    "GDP per capita (current US$)",
    "Urban population (% of total population)",
    "Threatened species (number)",
];

const COUNTRIES: [(&str, &str); 16] = [
    ("Afghanistan", "SouthernAsia"),
    ("Albania", "SouthernEurope"),
    ("Algeria", "NorthernAfrica"),
    ("Argentina", "SouthAmerica"),
    ("Australia", "Oceania"),
    ("Bhutan", "SouthernAsia"),
    ("Brazil", "SouthAmerica"),
    ("Canada", "NorthernAmerica"),
    ("Chad", "MiddleAfrica"),
    ("Denmark", "NorthernEurope"),
    ("Japan", "EasternAsia"),
    ("Kenya", "EasternAfrica"),
    ("Nauru", "Micronesia"),
    ("Peru", "SouthAmerica"),
    ("Tuvalu", "Polynesia"),
    ("Viet Nam", "South-easternAsia"),
];

/// One row of raw cell texts. A few cells use the placeholders found in the
/// real UN export ("...", "-99", "~0.0") so the coercion paths get exercised.
fn generate_row(index: usize, country: &str, region: &str, rng: &mut SimpleRng) -> Vec<String> {
    let surface = rng.uniform(20.0, 9_000_000.0).round();
    let population = rng.uniform(10.0, 200_000.0).round();
    let growth = rng.uniform(-4.0, 9.0);
    let gdp_per_capita = rng.uniform(300.0, 60_000.0);
    let urban = rng.uniform(10.0, 100.0);
    let threatened = rng.uniform(0.0, 400.0).round();

    let growth = if index % 7 == 5 {
        "-99".to_string()
    } else {
        format!("{growth:.1}")
    };
    let gdp_per_capita = if index % 5 == 4 {
        "...".to_string()
    } else {
        format!("{gdp_per_capita:.1}")
    };
    let urban = if index % 9 == 8 {
        "~0.0".to_string()
    } else {
        format!("{urban:.1}")
    };

    vec![
        country.to_string(),
        region.to_string(),
        format!("{surface}"),
        format!("{population}"),
        growth,
        gdp_per_capita,
        urban,
        format!("{threatened}"),
    ]
}

fn write_csv(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(HEADERS).context("writing CSV header")?;
    for row in rows {
        writer.write_record(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

/// Every column is written as Utf8; the loader infers kinds the same way it
/// does for CSV.
fn write_parquet(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        HEADERS
            .iter()
            .map(|h| Field::new(*h, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..HEADERS.len())
        .map(|col| {
            let values: Vec<&str> = rows.iter().map(|r| r[col].as_str()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let rows: Vec<Vec<String>> = COUNTRIES
        .iter()
        .enumerate()
        .map(|(i, (country, region))| generate_row(i, country, region, &mut rng))
        .collect();

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).context("creating data directory")?;

    let csv_path = out_dir.join("country_profile_variables.csv");
    write_csv(&csv_path, &rows)?;
    let parquet_path = out_dir.join("country_profile_variables.parquet");
    write_parquet(&parquet_path, &rows)?;

    println!(
        "Wrote {} countries ({} columns) to {} and {}",
        rows.len(),
        HEADERS.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
