/// The six measured dimensions that contribute to a happiness score.
///
/// Order is canonical: CSV columns, weight vectors, and CLI `--weights`
/// lists all follow `Factor::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    GdpPerCapita,
    SocialSupport,
    HealthyLifeExpectancy,
    Freedom,
    Generosity,
    CorruptionPerception,
}

pub const FACTOR_COUNT: usize = 6;

impl Factor {
    pub const ALL: [Factor; FACTOR_COUNT] = [
        Factor::GdpPerCapita,
        Factor::SocialSupport,
        Factor::HealthyLifeExpectancy,
        Factor::Freedom,
        Factor::Generosity,
        Factor::CorruptionPerception,
    ];

    /// Position in canonical order, used to index per-factor arrays.
    pub fn index(self) -> usize {
        match self {
            Factor::GdpPerCapita => 0,
            Factor::SocialSupport => 1,
            Factor::HealthyLifeExpectancy => 2,
            Factor::Freedom => 3,
            Factor::Generosity => 4,
            Factor::CorruptionPerception => 5,
        }
    }

    /// The snake_case column header this factor is loaded from.
    pub fn csv_header(self) -> &'static str {
        match self {
            Factor::GdpPerCapita => "gdp_per_capita",
            Factor::SocialSupport => "social_support",
            Factor::HealthyLifeExpectancy => "healthy_life_expectancy",
            Factor::Freedom => "freedom_to_make_life_choices",
            Factor::Generosity => "generosity",
            Factor::CorruptionPerception => "perceptions_of_corruption",
        }
    }

    pub fn from_csv_header(header: &str) -> Option<Factor> {
        Factor::ALL.into_iter().find(|f| f.csv_header() == header)
    }

    /// Human-readable name for tables and slider labels.
    pub fn label(self) -> &'static str {
        match self {
            Factor::GdpPerCapita => "GDP per Capita",
            Factor::SocialSupport => "Social Support",
            Factor::HealthyLifeExpectancy => "Healthy Life Expectancy",
            Factor::Freedom => "Freedom",
            Factor::Generosity => "Generosity",
            Factor::CorruptionPerception => "Corruption Perception",
        }
    }

    /// Compact name for narrow layouts (TUI weight panel).
    pub fn short_label(self) -> &'static str {
        match self {
            Factor::GdpPerCapita => "GDP",
            Factor::SocialSupport => "Social",
            Factor::HealthyLifeExpectancy => "Health",
            Factor::Freedom => "Freedom",
            Factor::Generosity => "Generosity",
            Factor::CorruptionPerception => "Corruption",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_order_matches_index() {
        for (i, factor) in Factor::ALL.into_iter().enumerate() {
            assert_eq!(factor.index(), i);
        }
    }

    #[test]
    fn test_csv_header_roundtrip() {
        for factor in Factor::ALL {
            assert_eq!(Factor::from_csv_header(factor.csv_header()), Some(factor));
        }
    }

    #[test]
    fn test_unknown_header() {
        assert_eq!(Factor::from_csv_header("happiness_score"), None);
        assert_eq!(Factor::from_csv_header(""), None);
    }
}
