use clap::{Parser, Subcommand};
use std::path::PathBuf;

use happyrank::dataset::{load_dataset, RecordStore};
use happyrank::scoring::{
    validate_weights, Factor, Preset, ScoreField, WeightProfile, FACTOR_COUNT,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_USAGE: i32 = 3;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ranking table for a year
    Rank {
        /// Year to rank (defaults to the latest in the dataset)
        #[arg(short, long)]
        year: Option<i32>,
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Print the score distribution and summary statistics for a year
    Stats {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Print per-year scores for one or more countries
    Trend {
        /// Country names as they appear in the dataset
        #[arg(required = true)]
        countries: Vec<String>,
    },
    /// Interactive dashboard (default if no subcommand)
    Dash,
}

#[derive(Parser, Debug)]
#[command(name = "happyrank")]
#[command(about = "Re-rank countries by a happiness score you control", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/happyrank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the dataset CSV (overrides the config file)
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Preset or custom profile name (equal, balanced, wealth, health,
    /// freedom, social, ethics, or a profile from the config file)
    #[arg(short, long, global = true)]
    preset: Option<String>,

    /// Six comma-separated weights in factor order:
    /// GDP,Social,Health,Freedom,Generosity,Corruption
    #[arg(short, long, global = true, conflicts_with = "preset")]
    weights: Option<String>,

    /// Use the dataset's original happiness score instead of the
    /// personalized one
    #[arg(long, global = true)]
    original: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dash);

    // Load config
    let config_path = cli.config.clone().map(PathBuf::from);
    let config = match happyrank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Resolve and validate the weight profile before touching the dataset
    let weights = match resolve_weights(&cli.weights, &cli.preset, &config) {
        Ok(w) => w,
        Err(errors) => {
            eprintln!("Weight profile errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = validate_weights(&weights) {
        eprintln!("Weight profile errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Resolve the dataset path: flag first, then config
    let data_path = match cli.data.clone().or_else(|| config.data.clone()) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("No dataset configured.");
            eprintln!("Pass --data <csv> or set 'data:' in ~/.config/happyrank/config.yaml");
            std::process::exit(EXIT_CONFIG);
        }
    };

    // The one async boundary: everything after this is synchronous
    let store = match load_dataset(&data_path, cli.verbose).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Dataset error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let field = if cli.original {
        ScoreField::Original
    } else {
        ScoreField::Personalized
    };
    let use_colors = happyrank::output::should_use_colors();

    match command {
        Commands::Rank { year, tsv } => {
            let year = resolve_year(&store, year);
            let view = happyrank::recompute(&store, &weights, year, field);
            if tsv {
                println!("{}", happyrank::output::format_tsv(&view.ranking));
            } else {
                println!("Year {}  ({} score)", year, field.label());
                println!();
                println!(
                    "{}",
                    happyrank::output::format_ranking_table(&view.ranking, use_colors)
                );
            }
        }
        Commands::Stats { year } => {
            let year = resolve_year(&store, year);
            let view = happyrank::recompute(&store, &weights, year, field);
            println!("Year {}  ({} score)", year, field.label());
            println!();
            println!(
                "{}",
                happyrank::output::format_distribution(&view.distribution, use_colors)
            );
        }
        Commands::Trend { countries } => {
            let known = store.countries();
            for country in &countries {
                if !known.contains(country) {
                    eprintln!("Unknown country: '{}'", country);
                    std::process::exit(EXIT_USAGE);
                }
            }
            let scored = happyrank::score_store(&store, &weights);
            let series = happyrank::analytics::trend(&scored, &countries, field);
            println!(
                "{}",
                happyrank::output::format_trend(&series, use_colors)
            );
        }
        Commands::Dash => {
            let app = happyrank::tui::App::new(store, weights, field);
            if let Err(e) = happyrank::tui::run_tui(app).await {
                eprintln!("Dashboard error: {}", e);
                std::process::exit(EXIT_DATA);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Pick the requested year if it exists in the dataset, or the latest one.
/// An unknown year is a usage error.
fn resolve_year(store: &RecordStore, requested: Option<i32>) -> i32 {
    let years = store.years();
    match requested {
        Some(year) if years.contains(&year) => year,
        Some(year) => {
            eprintln!(
                "Year {} is not in the dataset (available: {}-{})",
                year,
                years.first().unwrap_or(&0),
                years.last().unwrap_or(&0)
            );
            std::process::exit(EXIT_USAGE);
        }
        // The loader rejects empty datasets, so years is never empty here
        None => *years.last().expect("dataset has at least one year"),
    }
}

/// Resolve the starting weight profile: explicit --weights wins, then a
/// preset or config profile by name, then the config's default preset,
/// then equal weights.
fn resolve_weights(
    weights_arg: &Option<String>,
    preset_arg: &Option<String>,
    config: &happyrank::config::Config,
) -> Result<WeightProfile, Vec<String>> {
    if let Some(list) = weights_arg {
        return parse_weights_list(list).map_err(|e| vec![e]);
    }
    if let Some(name) = preset_arg.as_ref().or(config.preset.as_ref()) {
        return lookup_profile(name, config);
    }
    Ok(WeightProfile::default())
}

fn lookup_profile(
    name: &str,
    config: &happyrank::config::Config,
) -> Result<WeightProfile, Vec<String>> {
    if let Some(preset) = Preset::parse(name) {
        return Ok(preset.weights());
    }
    if let Some(profile) = config.profiles.iter().find(|p| p.name == name) {
        return profile.to_weight_profile();
    }
    let builtin: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
    Err(vec![format!(
        "unknown preset '{}' (built-in: {})",
        name,
        builtin.join(", ")
    )])
}

/// Parse "16.67,16.67,16.67,16.67,16.67,16.67" into a profile, in
/// canonical factor order.
fn parse_weights_list(list: &str) -> Result<WeightProfile, String> {
    let parts: Vec<&str> = list.split(',').map(str::trim).collect();
    if parts.len() != FACTOR_COUNT {
        return Err(format!(
            "--weights expects {} comma-separated numbers ({}), got {}",
            FACTOR_COUNT,
            Factor::ALL
                .iter()
                .map(|f| f.short_label())
                .collect::<Vec<_>>()
                .join(","),
            parts.len()
        ));
    }
    let mut values = [0.0; FACTOR_COUNT];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part
            .parse::<f64>()
            .map_err(|_| format!("--weights: '{}' is not a number", part))?;
    }
    Ok(WeightProfile::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights_list() {
        let weights = parse_weights_list("40,15,15,10,10,10").unwrap();
        assert_eq!(weights.get(Factor::GdpPerCapita), 40.0);
        assert_eq!(weights.get(Factor::CorruptionPerception), 10.0);
    }

    #[test]
    fn test_parse_weights_list_wrong_count() {
        assert!(parse_weights_list("1,2,3").is_err());
    }

    #[test]
    fn test_parse_weights_list_bad_number() {
        assert!(parse_weights_list("a,b,c,d,e,f").is_err());
    }

    #[test]
    fn test_lookup_builtin_preset() {
        let config = happyrank::config::Config::default();
        let weights = lookup_profile("wealth", &config).unwrap();
        assert_eq!(weights.get(Factor::GdpPerCapita), 40.0);
    }

    #[test]
    fn test_lookup_unknown_preset() {
        let config = happyrank::config::Config::default();
        let errors = lookup_profile("nope", &config).unwrap_err();
        assert!(errors[0].contains("unknown preset 'nope'"));
    }

    #[test]
    fn test_resolve_weights_default_is_equal() {
        let config = happyrank::config::Config::default();
        let weights = resolve_weights(&None, &None, &config).unwrap();
        assert_eq!(weights, WeightProfile::default());
    }
}
