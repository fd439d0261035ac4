use anyhow::{Context, Result};
use std::path::Path;

use crate::scoring::factors::{Factor, FACTOR_COUNT};
use crate::stderr_buffer;

use super::types::{Record, RecordStore};

/// Where each canonical field lives in the CSV, resolved from the header row.
#[derive(Debug, Default)]
struct ColumnMap {
    country: Option<usize>,
    year: Option<usize>,
    region: Option<usize>,
    happiness_score: Option<usize>,
    factors: [Option<usize>; FACTOR_COUNT],
}

impl ColumnMap {
    fn from_header(header: &str) -> Self {
        let mut map = ColumnMap::default();
        for (i, name) in header.split(',').map(str::trim).enumerate() {
            match name {
                "country" => map.country = Some(i),
                "year" => map.year = Some(i),
                "region" => map.region = Some(i),
                "happiness_score" => map.happiness_score = Some(i),
                other => {
                    if let Some(factor) = Factor::from_csv_header(other) {
                        map.factors[factor.index()] = Some(i);
                    }
                    // Unrecognized columns are ignored
                }
            }
        }
        map
    }
}

/// Load the full dataset from a CSV file. This is the one async boundary:
/// everything downstream (normalize, score, aggregate) is synchronous.
///
/// Fatal errors (unreadable file, missing country/year columns, no usable
/// rows) abort the bootstrap; no partial dataset is ever returned. Rows
/// with an unparsable key field are skipped with a warning, and duplicate
/// (country, year) rows keep the first occurrence.
pub async fn load_dataset(path: &Path, verbose: bool) -> Result<RecordStore> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read dataset at {}", path.display()))?;

    let store = parse_dataset(&text)
        .with_context(|| format!("Failed to parse dataset at {}", path.display()))?;

    if verbose {
        eprintln!(
            "Loaded {} records ({} countries, {} years)",
            store.len(),
            store.countries().len(),
            store.years().len()
        );
    }

    Ok(store)
}

/// Parse CSV text into a deduplicated store. Split out from the async read
/// so tests can feed strings directly.
pub fn parse_dataset(text: &str) -> Result<RecordStore> {
    let mut lines = text.trim().lines();
    let header = lines.next().unwrap_or("");
    if header.is_empty() {
        anyhow::bail!("Dataset is empty");
    }

    let columns = ColumnMap::from_header(header);
    let (country_col, year_col) = match (columns.country, columns.year) {
        (Some(c), Some(y)) => (c, y),
        _ => anyhow::bail!("Dataset header must include 'country' and 'year' columns"),
    };

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();

        let country = match cells.get(country_col) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => {
                stderr_buffer::warn(format!("Skipping row {}: missing country", line_no + 2));
                continue;
            }
        };
        let year = match cells.get(year_col).and_then(|c| c.parse::<i32>().ok()) {
            Some(y) => y,
            None => {
                stderr_buffer::warn(format!(
                    "Skipping row {} ({}): unparsable year",
                    line_no + 2,
                    country
                ));
                continue;
            }
        };
        let happiness_score = match columns
            .happiness_score
            .and_then(|i| cells.get(i))
            .and_then(|c| c.parse::<f64>().ok())
        {
            Some(s) => s,
            None => {
                stderr_buffer::warn(format!(
                    "Skipping row {} ({}, {}): unparsable happiness_score",
                    line_no + 2,
                    country,
                    year
                ));
                continue;
            }
        };

        let region = columns
            .region
            .and_then(|i| cells.get(i))
            .map(|c| c.to_string())
            .unwrap_or_default();

        let mut raw = [None; FACTOR_COUNT];
        for factor in Factor::ALL {
            raw[factor.index()] = columns.factors[factor.index()]
                .and_then(|i| cells.get(i))
                .and_then(|c| c.parse::<f64>().ok());
        }

        records.push(Record {
            country,
            year,
            region,
            happiness_score,
            raw,
        });
    }

    if records.is_empty() {
        anyhow::bail!("Dataset contains no usable rows");
    }

    let (store, skipped) = RecordStore::from_records(records);
    if skipped > 0 {
        stderr_buffer::warn(format!(
            "Skipped {} duplicate (country, year) rows",
            skipped
        ));
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
country,year,region,happiness_score,gdp_per_capita,social_support,healthy_life_expectancy,freedom_to_make_life_choices,generosity,perceptions_of_corruption
Finland,2021,Western Europe,7.84,1.45,1.11,0.74,0.69,0.12,0.48
Denmark,2021,Western Europe,7.62,1.50,1.11,0.76,0.69,0.21,0.53
Finland,2020,Western Europe,7.81,1.28,1.50,0.96,0.66,0.16,0.48";

    #[test]
    fn test_parse_maps_headers_to_factors() {
        let store = parse_dataset(SAMPLE).unwrap();
        assert_eq!(store.len(), 3);

        let finland = store.get("Finland", 2021).unwrap();
        assert_eq!(finland.region, "Western Europe");
        assert_eq!(finland.happiness_score, 7.84);
        assert_eq!(finland.factor(Factor::GdpPerCapita), Some(1.45));
        assert_eq!(finland.factor(Factor::CorruptionPerception), Some(0.48));
    }

    #[test]
    fn test_parse_shuffled_columns() {
        let text = "\
happiness_score,country,generosity,year
5.5,Chile,0.1,2020";
        let store = parse_dataset(text).unwrap();
        let chile = store.get("Chile", 2020).unwrap();
        assert_eq!(chile.happiness_score, 5.5);
        assert_eq!(chile.factor(Factor::Generosity), Some(0.1));
        assert_eq!(chile.factor(Factor::GdpPerCapita), None);
        assert_eq!(chile.region, "");
    }

    #[test]
    fn test_non_numeric_factor_becomes_none() {
        let text = "\
country,year,happiness_score,gdp_per_capita
Chile,2020,5.5,n/a";
        let store = parse_dataset(text).unwrap();
        assert_eq!(
            store.get("Chile", 2020).unwrap().factor(Factor::GdpPerCapita),
            None
        );
    }

    #[test]
    fn test_row_with_bad_year_is_skipped() {
        let text = "\
country,year,happiness_score
Chile,2020,5.5
Norway,unknown,7.4";
        let store = parse_dataset(text).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let text = "\
country,year,happiness_score
Chile,2020,5.5
Chile,2020,9.9";
        let store = parse_dataset(text).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Chile", 2020).unwrap().happiness_score, 5.5);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(parse_dataset("").is_err());
        assert!(parse_dataset("   \n  ").is_err());
    }

    #[test]
    fn test_missing_key_columns_is_fatal() {
        assert!(parse_dataset("region,happiness_score\nEurope,5.0").is_err());
    }

    #[test]
    fn test_header_only_is_fatal() {
        assert!(parse_dataset("country,year,happiness_score").is_err());
    }
}
