use std::collections::HashMap;

use crate::scoring::{ScoreField, ScoredRecord};

/// One row of a per-year ranking, with movement relative to the prior year.
#[derive(Debug, Clone)]
pub struct RankingEntry {
    /// 1-based position after a score-descending stable sort.
    pub rank: usize,
    pub country: String,
    pub region: String,
    pub score: f64,
    /// previous rank - current rank; positive = the country moved up.
    /// None when the country has no record in year - 1.
    pub rank_delta: Option<i64>,
    /// Active score minus the prior-year active score; None without a
    /// prior-year record. Renders as "no change", never as zero.
    pub score_delta: Option<f64>,
}

/// Country -> (rank, score) for one year, using a stable descending sort so
/// tied scores keep their source order.
fn positions(
    scored: &[ScoredRecord],
    year: i32,
    field: ScoreField,
) -> Vec<(&ScoredRecord, usize)> {
    let mut year_records: Vec<&ScoredRecord> =
        scored.iter().filter(|r| r.year() == year).collect();
    // slice::sort_by is stable: equal scores preserve input order.
    year_records.sort_by(|a, b| {
        b.score(field)
            .partial_cmp(&a.score(field))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    year_records
        .into_iter()
        .enumerate()
        .map(|(i, r)| (r, i + 1))
        .collect()
}

/// Rank all countries for one year and annotate each with its rank and
/// score movement against the independently computed year-1 ranking.
pub fn rank(scored: &[ScoredRecord], year: i32, field: ScoreField) -> Vec<RankingEntry> {
    let previous: HashMap<&str, (usize, f64)> = positions(scored, year - 1, field)
        .into_iter()
        .map(|(r, rank)| (r.country(), (rank, r.score(field))))
        .collect();

    positions(scored, year, field)
        .into_iter()
        .map(|(record, current_rank)| {
            let prior = previous.get(record.country());
            RankingEntry {
                rank: current_rank,
                country: record.country().to_string(),
                region: record.record.region.clone(),
                score: record.score(field),
                rank_delta: prior.map(|(prev_rank, _)| *prev_rank as i64 - current_rank as i64),
                score_delta: prior.map(|(_, prev_score)| record.score(field) - prev_score),
            }
        })
        .collect()
}

/// Year-over-year change in the active score for one country, or None if
/// either year is missing.
pub fn score_change(
    scored: &[ScoredRecord],
    country: &str,
    year: i32,
    field: ScoreField,
) -> Option<f64> {
    let at = |y: i32| {
        scored
            .iter()
            .find(|r| r.country() == country && r.year() == y)
            .map(|r| r.score(field))
    };
    match (at(year), at(year - 1)) {
        (Some(current), Some(previous)) => Some(current - previous),
        _ => None,
    }
}
