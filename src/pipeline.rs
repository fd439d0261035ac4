use crate::analytics::{distribution, rank, Distribution, RankingEntry};
use crate::dataset::RecordStore;
use crate::scoring::{normalize_dataset, score_dataset, ScoreField, ScoredRecord, WeightProfile};

/// Everything the presentation layer needs for one (year, field) view.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub year: i32,
    pub field: ScoreField,
    pub ranking: Vec<RankingEntry>,
    pub distribution: Distribution,
}

/// Normalize and score the whole store under one profile. The returned
/// collection replaces any previous one wholesale.
pub fn score_store(store: &RecordStore, weights: &WeightProfile) -> Vec<ScoredRecord> {
    score_dataset(normalize_dataset(store), weights)
}

/// The full pipeline as one pure function of its inputs. Callers invoke it
/// on every input change (weight edit, year move, field toggle); there is
/// no hidden cache to invalidate.
pub fn recompute(
    store: &RecordStore,
    weights: &WeightProfile,
    year: i32,
    field: ScoreField,
) -> DashboardView {
    let scored = score_store(store, weights);
    DashboardView {
        year,
        field,
        ranking: rank(&scored, year, field),
        distribution: distribution(&scored, year, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::{test_record, Record};
    use crate::scoring::{Factor, FACTOR_COUNT};

    fn record(country: &str, year: i32, score: f64, gdp: f64, freedom: f64) -> Record {
        let mut r = test_record(country, year, score);
        r.raw = [None; FACTOR_COUNT];
        r.raw[Factor::GdpPerCapita.index()] = Some(gdp);
        r.raw[Factor::Freedom.index()] = Some(freedom);
        r
    }

    fn sample_store() -> RecordStore {
        RecordStore::from_records(vec![
            record("A", 2020, 6.0, 1.0, 0.2),
            record("B", 2020, 5.0, 2.0, 0.8),
            record("A", 2021, 6.2, 1.1, 0.3),
            record("B", 2021, 5.1, 2.2, 0.9),
        ])
        .0
    }

    #[test]
    fn test_recompute_produces_consistent_views() {
        let store = sample_store();
        let view = recompute(
            &store,
            &WeightProfile::default(),
            2021,
            ScoreField::Personalized,
        );
        assert_eq!(view.year, 2021);
        assert_eq!(view.ranking.len(), 2);
        let binned: usize = view.distribution.bins.iter().map(|b| b.count).sum();
        assert_eq!(binned, view.ranking.len());
    }

    #[test]
    fn test_recompute_is_pure() {
        let store = sample_store();
        let weights = WeightProfile::default();
        let a = recompute(&store, &weights, 2021, ScoreField::Personalized);
        let b = recompute(&store, &weights, 2021, ScoreField::Personalized);
        for (x, y) in a.ranking.iter().zip(b.ranking.iter()) {
            assert_eq!(x.country, y.country);
            assert_eq!(x.rank, y.rank);
            assert_eq!(x.score, y.score);
        }
    }

    #[test]
    fn test_weight_change_reorders_personalized_only() {
        let store = sample_store();

        // All weight on GDP: B leads (higher GDP)
        let mut gdp_heavy = WeightProfile::new([0.0; FACTOR_COUNT]);
        gdp_heavy.set(Factor::GdpPerCapita, 100.0);
        let view = recompute(&store, &gdp_heavy, 2021, ScoreField::Personalized);
        assert_eq!(view.ranking[0].country, "B");

        // Original field ignores weights entirely: A leads
        let view = recompute(&store, &gdp_heavy, 2021, ScoreField::Original);
        assert_eq!(view.ranking[0].country, "A");
    }
}
