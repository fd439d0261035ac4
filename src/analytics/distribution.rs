use crate::scoring::{ScoreField, ScoredRecord};

/// Fixed bin boundaries over the 0-10 score range. The first bin spans
/// [0, 2); the rest are unit-wide; the last is closed at 10.
pub const BIN_EDGES: [(f64, f64); 9] = [
    (0.0, 2.0),
    (2.0, 3.0),
    (3.0, 4.0),
    (4.0, 5.0),
    (5.0, 6.0),
    (6.0, 7.0),
    (7.0, 8.0),
    (8.0, 9.0),
    (9.0, 10.0),
];

#[derive(Debug, Clone)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub members: Vec<String>,
}

impl Bin {
    pub fn label(&self) -> String {
        format!("{:.0}-{:.0}", self.lower, self.upper)
    }
}

/// Summary statistics over one year's active scores.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    /// Element at index floor(n/2) of the ascending sort. For even n this
    /// is the upper middle, not the average of the two middles.
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
}

#[derive(Debug, Clone)]
pub struct Distribution {
    pub bins: Vec<Bin>,
    pub stats: Stats,
}

/// Which bin a score falls into. Scores below 0 or above 10 clamp to the
/// outermost bins; 10.0 itself lands in the closed final bin.
fn bin_index(score: f64) -> usize {
    BIN_EDGES
        .iter()
        .position(|(_, upper)| score < *upper)
        .unwrap_or(BIN_EDGES.len() - 1)
}

/// Bucket one year's records by their active score and compute summary
/// statistics over the same filtered set. An empty year yields empty bins
/// and zeroed stats.
pub fn distribution(scored: &[ScoredRecord], year: i32, field: ScoreField) -> Distribution {
    let mut bins: Vec<Bin> = BIN_EDGES
        .iter()
        .map(|(lower, upper)| Bin {
            lower: *lower,
            upper: *upper,
            count: 0,
            members: Vec::new(),
        })
        .collect();

    let mut values: Vec<f64> = Vec::new();
    for record in scored.iter().filter(|r| r.year() == year) {
        let score = record.score(field);
        let bin = &mut bins[bin_index(score)];
        bin.count += 1;
        bin.members.push(record.country().to_string());
        values.push(score);
    }

    Distribution {
        bins,
        stats: compute_stats(&mut values),
    }
}

fn compute_stats(values: &mut [f64]) -> Stats {
    if values.is_empty() {
        return Stats::default();
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    Stats {
        count: n,
        mean,
        median: values[n / 2],
        min: values[0],
        max: values[n - 1],
        std_dev: variance.sqrt(),
    }
}
