mod formatter;

pub use formatter::{
    format_distribution, format_rank_delta, format_ranking_table, format_score,
    format_score_delta, format_trend, format_tsv, should_use_colors,
};
