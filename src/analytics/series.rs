use crate::scoring::{Factor, ScoreField, ScoredRecord};

/// One point of a factor-vs-score scatter for a single year.
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub country: String,
    pub factor_value: f64,
    pub score: f64,
    pub year: i32,
}

/// (country, raw factor, active score) tuples for one year. Records with no
/// value for the chosen factor are omitted.
pub fn scatter(
    scored: &[ScoredRecord],
    year: i32,
    factor: Factor,
    field: ScoreField,
) -> Vec<ScatterPoint> {
    scored
        .iter()
        .filter(|r| r.year() == year)
        .filter_map(|r| {
            r.record.factor(factor).map(|factor_value| ScatterPoint {
                country: r.country().to_string(),
                factor_value,
                score: r.score(field),
                year,
            })
        })
        .collect()
}

/// A country's active score across all years it appears in, ascending.
#[derive(Debug, Clone)]
pub struct TrendSeries {
    pub country: String,
    pub points: Vec<(i32, f64)>,
}

/// Per-country score series for a selected subset of countries. A country
/// with no records yields an empty series rather than being dropped, so the
/// caller's selection order is preserved one-to-one.
pub fn trend(scored: &[ScoredRecord], countries: &[String], field: ScoreField) -> Vec<TrendSeries> {
    countries
        .iter()
        .map(|country| {
            let mut points: Vec<(i32, f64)> = scored
                .iter()
                .filter(|r| r.country() == *country)
                .map(|r| (r.year(), r.score(field)))
                .collect();
            points.sort_by_key(|(year, _)| *year);
            TrendSeries {
                country: country.clone(),
                points,
            }
        })
        .collect()
}
