use std::collections::HashSet;

use crate::scoring::factors::{Factor, FACTOR_COUNT};

/// One observation: a country in a single year.
///
/// Raw factor values are `None` when the source cell was missing or not
/// numeric; such values are excluded from normalization bounds and carry
/// no weight in the personalized score.
#[derive(Debug, Clone)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub region: String,
    /// Externally supplied ground-truth score, independent of weighting.
    pub happiness_score: f64,
    pub raw: [Option<f64>; FACTOR_COUNT],
}

impl Record {
    pub fn factor(&self, factor: Factor) -> Option<f64> {
        self.raw[factor.index()]
    }
}

/// Canonical owner of all loaded records. Write-once: built by the loader,
/// read-only afterwards. Holds at most one record per (country, year).
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Build a store from parsed rows, keeping the first record seen for
    /// each (country, year) key. Returns the store and the number of
    /// duplicate rows that were skipped.
    pub fn from_records(records: Vec<Record>) -> (Self, usize) {
        let mut seen: HashSet<(String, i32)> = HashSet::new();
        let before = records.len();
        let unique: Vec<Record> = records
            .into_iter()
            .filter(|r| seen.insert((r.country.clone(), r.year)))
            .collect();
        let skipped = before - unique.len();
        (Self { records: unique }, skipped)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .records
            .iter()
            .map(|r| r.year)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        years.sort_unstable();
        years
    }

    /// Distinct country names, ascending.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self
            .records
            .iter()
            .map(|r| r.country.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        countries.sort();
        countries
    }

    pub fn for_year(&self, year: i32) -> Vec<&Record> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    /// All records for a country, sorted by year ascending.
    pub fn for_country(&self, country: &str) -> Vec<&Record> {
        let mut records: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| r.country == country)
            .collect();
        records.sort_by_key(|r| r.year);
        records
    }

    pub fn get(&self, country: &str, year: i32) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.country == country && r.year == year)
    }
}

#[cfg(test)]
pub(crate) fn test_record(country: &str, year: i32, score: f64) -> Record {
    Record {
        country: country.to_string(),
        year,
        region: "Test Region".to_string(),
        happiness_score: score,
        raw: [Some(1.0); FACTOR_COUNT],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_by_country_year() {
        let records = vec![
            test_record("Finland", 2020, 7.8),
            test_record("Finland", 2020, 1.0),
            test_record("Finland", 2021, 7.9),
        ];
        let (store, skipped) = RecordStore::from_records(records);
        assert_eq!(store.len(), 2);
        assert_eq!(skipped, 1);
        // First occurrence wins
        assert_eq!(store.get("Finland", 2020).unwrap().happiness_score, 7.8);
    }

    #[test]
    fn test_years_sorted_unique() {
        let records = vec![
            test_record("A", 2021, 5.0),
            test_record("B", 2019, 5.0),
            test_record("C", 2021, 5.0),
        ];
        let (store, _) = RecordStore::from_records(records);
        assert_eq!(store.years(), vec![2019, 2021]);
    }

    #[test]
    fn test_countries_sorted_unique() {
        let records = vec![
            test_record("Norway", 2020, 7.5),
            test_record("Chile", 2020, 6.2),
            test_record("Norway", 2021, 7.4),
        ];
        let (store, _) = RecordStore::from_records(records);
        assert_eq!(store.countries(), vec!["Chile", "Norway"]);
    }

    #[test]
    fn test_for_country_sorted_by_year() {
        let records = vec![
            test_record("Chile", 2021, 6.1),
            test_record("Chile", 2019, 6.3),
            test_record("Chile", 2020, 6.2),
        ];
        let (store, _) = RecordStore::from_records(records);
        let years: Vec<i32> = store.for_country("Chile").iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_get_missing() {
        let (store, _) = RecordStore::from_records(vec![test_record("A", 2020, 5.0)]);
        assert!(store.get("A", 2019).is_none());
        assert!(store.get("B", 2020).is_none());
    }
}
