use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::analytics::{Distribution, RankingEntry, TrendSeries};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Scores are always two decimals on a 0-10 scale.
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Rank movement vs the prior year. A missing prior year renders as a dash
/// ("no change"), never as a zero.
pub fn format_rank_delta(delta: Option<i64>) -> String {
    match delta {
        Some(0) => "=".to_string(),
        Some(n) => format!("{:+}", n),
        None => "-".to_string(),
    }
}

pub fn format_score_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{:+.2}", d),
        None => "-".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a ranking as an aligned table:
/// rank, country, score, rank delta, score delta, region.
pub fn format_ranking_table(entries: &[RankingEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No countries ranked for this year.".to_string();
    }

    let term_width = get_terminal_width();
    // rank(4) + score(6) + deltas(5 + 7) + separators
    let fixed_width = 4 + 1 + 6 + 2 + 5 + 2 + 7 + 2;
    let country_width = 24;
    let region_width = term_width
        .map(|w| w.saturating_sub(fixed_width + country_width + 2))
        .unwrap_or(usize::MAX)
        .max(8);

    entries
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>3}.", entry.rank);
            let score_str = format!("{:>6}", format_score(entry.score));
            let rank_delta = format!("{:>5}", format_rank_delta(entry.rank_delta));
            let score_delta = format!("{:>7}", format_score_delta(entry.score_delta));
            let country = format!(
                "{:<width$}",
                truncate_name(&entry.country, country_width),
                width = country_width
            );
            let region = truncate_name(&entry.region, region_width);

            if use_colors {
                let rank_delta = match entry.rank_delta {
                    Some(n) if n > 0 => rank_delta.green().to_string(),
                    Some(n) if n < 0 => rank_delta.red().to_string(),
                    _ => rank_delta.dimmed().to_string(),
                };
                format!(
                    "{} {}  {}  {}  {}  {}",
                    rank_str.dimmed(),
                    score_str.bold(),
                    rank_delta,
                    score_delta,
                    country,
                    region.cyan()
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}  {}",
                    rank_str, score_str, rank_delta, score_delta, country, region
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tab-separated ranking for scripting: rank, country, score, rank delta,
/// score delta, region. No headers, no colors.
pub fn format_tsv(entries: &[RankingEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                entry.rank,
                entry.country,
                format_score(entry.score),
                format_rank_delta(entry.rank_delta),
                format_score_delta(entry.score_delta),
                entry.region
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Histogram of score bins plus the summary statistics line.
pub fn format_distribution(dist: &Distribution, use_colors: bool) -> String {
    let max_count = dist.bins.iter().map(|b| b.count).max().unwrap_or(0);
    let bar_width = 40usize;

    let mut lines: Vec<String> = dist
        .bins
        .iter()
        .map(|bin| {
            let filled = if max_count > 0 {
                (bin.count as f64 / max_count as f64 * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar = "█".repeat(filled);
            if use_colors {
                format!(
                    "{:>5}  {:<40}  {}",
                    bin.label(),
                    bar.cyan(),
                    bin.count.to_string().dimmed()
                )
            } else {
                format!("{:>5}  {:<40}  {}", bin.label(), bar, bin.count)
            }
        })
        .collect();

    let s = &dist.stats;
    lines.push(String::new());
    lines.push(format!(
        "n={}  mean={:.2}  median={:.2}  min={:.2}  max={:.2}  stddev={:.2}",
        s.count, s.mean, s.median, s.min, s.max, s.std_dev
    ));
    lines.join("\n")
}

/// One line per country: its score per year, oldest first.
pub fn format_trend(series: &[TrendSeries], use_colors: bool) -> String {
    if series.is_empty() {
        return "No countries selected.".to_string();
    }

    series
        .iter()
        .map(|s| {
            if s.points.is_empty() {
                return format!("{}: no records", s.country);
            }
            let points = s
                .points
                .iter()
                .map(|(year, score)| format!("{} {}", year, format_score(*score)))
                .collect::<Vec<_>>()
                .join("  ");
            if use_colors {
                format!("{}  {}", s.country.bold(), points)
            } else {
                format!("{}  {}", s.country, points)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
