use crate::dataset::types::{Record, RecordStore};

use super::factors::{Factor, FACTOR_COUNT};

/// A record carrying per-factor values rescaled to [0, 1].
///
/// `None` entries mirror missing raw values; the scorer skips them rather
/// than inventing a substitute.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub record: Record,
    pub normalized: [Option<f64>; FACTOR_COUNT],
}

/// Min and max of one factor's defined raw values across the whole store:
/// all years, all countries. `None` when no record defines the factor.
pub fn factor_bounds(store: &RecordStore, factor: Factor) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for record in store.records() {
        if let Some(v) = record.factor(factor) {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(v), max.max(v)),
                None => (v, v),
            });
        }
    }
    bounds
}

/// Rescale every factor of every record to [0, 1] against the dataset-wide
/// bounds. A degenerate domain (max == min) collapses to 0 for all records.
/// Weight- and year-independent; the raw records are never mutated.
pub fn normalize_dataset(store: &RecordStore) -> Vec<NormalizedRecord> {
    let bounds: [Option<(f64, f64)>; FACTOR_COUNT] =
        Factor::ALL.map(|f| factor_bounds(store, f));

    store
        .records()
        .iter()
        .map(|record| {
            let mut normalized = [None; FACTOR_COUNT];
            for factor in Factor::ALL {
                let i = factor.index();
                normalized[i] = match (record.raw[i], bounds[i]) {
                    (Some(_), Some((min, max))) if max == min => Some(0.0),
                    (Some(v), Some((min, max))) => Some((v - min) / (max - min)),
                    _ => None,
                };
            }
            NormalizedRecord {
                record: record.clone(),
                normalized,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::test_record;

    fn store_with_gdp(values: &[Option<f64>]) -> RecordStore {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut r = test_record(&format!("C{}", i), 2020, 5.0);
                r.raw = [None; FACTOR_COUNT];
                r.raw[Factor::GdpPerCapita.index()] = *v;
                r
            })
            .collect();
        RecordStore::from_records(records).0
    }

    #[test]
    fn test_bounds_span_all_years() {
        let mut a = test_record("A", 2020, 5.0);
        a.raw[Factor::GdpPerCapita.index()] = Some(1.0);
        let mut b = test_record("A", 2021, 5.0);
        b.raw[Factor::GdpPerCapita.index()] = Some(3.0);
        let (store, _) = RecordStore::from_records(vec![a, b]);

        assert_eq!(factor_bounds(&store, Factor::GdpPerCapita), Some((1.0, 3.0)));
    }

    #[test]
    fn test_normalized_values_in_unit_range_with_extrema() {
        let store = store_with_gdp(&[Some(10.0), Some(20.0), Some(50.0)]);
        let normalized = normalize_dataset(&store);
        let gdp = Factor::GdpPerCapita.index();

        let values: Vec<f64> = normalized.iter().map(|n| n.normalized[gdp].unwrap()).collect();
        for v in &values {
            assert!((0.0..=1.0).contains(v));
        }
        assert!(values.iter().any(|v| *v == 0.0));
        assert!(values.iter().any(|v| *v == 1.0));
        assert!((values[1] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_domain_collapses_to_zero() {
        let store = store_with_gdp(&[Some(100.0), Some(100.0), Some(100.0)]);
        let normalized = normalize_dataset(&store);
        let gdp = Factor::GdpPerCapita.index();
        for n in &normalized {
            assert_eq!(n.normalized[gdp], Some(0.0));
        }
    }

    #[test]
    fn test_missing_value_stays_missing_and_is_excluded_from_bounds() {
        let store = store_with_gdp(&[Some(10.0), None, Some(20.0)]);
        let normalized = normalize_dataset(&store);
        let gdp = Factor::GdpPerCapita.index();

        assert_eq!(factor_bounds(&store, Factor::GdpPerCapita), Some((10.0, 20.0)));
        assert_eq!(normalized[0].normalized[gdp], Some(0.0));
        assert_eq!(normalized[1].normalized[gdp], None);
        assert_eq!(normalized[2].normalized[gdp], Some(1.0));
    }

    #[test]
    fn test_factor_defined_nowhere() {
        let store = store_with_gdp(&[None, None]);
        assert_eq!(factor_bounds(&store, Factor::GdpPerCapita), None);
        let normalized = normalize_dataset(&store);
        assert_eq!(normalized[0].normalized[Factor::GdpPerCapita.index()], None);
    }

    #[test]
    fn test_idempotent() {
        let store = store_with_gdp(&[Some(1.0), Some(2.0), Some(4.0)]);
        let first = normalize_dataset(&store);
        let second = normalize_dataset(&store);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.normalized, b.normalized);
        }
    }
}
