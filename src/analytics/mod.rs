pub mod distribution;
pub mod ranking;
pub mod series;

pub use distribution::{distribution, Bin, Distribution, Stats, BIN_EDGES};
pub use ranking::{rank, score_change, RankingEntry};
pub use series::{scatter, trend, ScatterPoint, TrendSeries};
