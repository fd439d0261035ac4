use super::factors::{Factor, FACTOR_COUNT};

/// Slider step used by the TUI weight panel.
pub const WEIGHT_STEP: f64 = 5.0;
pub const WEIGHT_MAX: f64 = 100.0;

/// Relative importance per factor, each in [0, 100].
///
/// Weights do not need to sum to 100: the scorer divides by the total
/// participating weight, so only the ratios matter.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightProfile {
    values: [f64; FACTOR_COUNT],
}

impl WeightProfile {
    pub fn new(values: [f64; FACTOR_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        self.values[factor.index()]
    }

    pub fn set(&mut self, factor: Factor, weight: f64) {
        self.values[factor.index()] = weight;
    }

    /// Nudge one factor's weight, clamped to [0, WEIGHT_MAX].
    pub fn adjust(&mut self, factor: Factor, delta: f64) {
        let v = (self.get(factor) + delta).clamp(0.0, WEIGHT_MAX);
        self.set(factor, v);
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn values(&self) -> &[f64; FACTOR_COUNT] {
        &self.values
    }
}

impl Default for WeightProfile {
    /// Equal weights, matching the "equal" preset.
    fn default() -> Self {
        Preset::Equal.weights()
    }
}

/// Fixed library of named starting configurations. The engine treats a
/// preset identically to a user-built profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Equal,
    Balanced,
    Wealth,
    Health,
    Freedom,
    Social,
    Ethics,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Equal,
        Preset::Balanced,
        Preset::Wealth,
        Preset::Health,
        Preset::Freedom,
        Preset::Social,
        Preset::Ethics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Equal => "equal",
            Preset::Balanced => "balanced",
            Preset::Wealth => "wealth",
            Preset::Health => "health",
            Preset::Freedom => "freedom",
            Preset::Social => "social",
            Preset::Ethics => "ethics",
        }
    }

    pub fn parse(name: &str) -> Option<Preset> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Weight values in canonical factor order:
    /// GDP, Social, Health, Freedom, Generosity, Corruption.
    pub fn weights(self) -> WeightProfile {
        let values = match self {
            Preset::Equal => [16.67; FACTOR_COUNT],
            Preset::Balanced => [20.0, 20.0, 20.0, 20.0, 10.0, 10.0],
            Preset::Wealth => [40.0, 15.0, 15.0, 10.0, 10.0, 10.0],
            Preset::Health => [10.0, 20.0, 40.0, 10.0, 10.0, 10.0],
            Preset::Freedom => [10.0, 15.0, 15.0, 35.0, 15.0, 10.0],
            Preset::Social => [10.0, 40.0, 15.0, 15.0, 10.0, 10.0],
            Preset::Ethics => [10.0, 15.0, 10.0, 15.0, 25.0, 25.0],
        };
        WeightProfile::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_equal() {
        let weights = WeightProfile::default();
        for factor in Factor::ALL {
            assert_eq!(weights.get(factor), 16.67);
        }
    }

    #[test]
    fn test_preset_parse_case_insensitive() {
        assert_eq!(Preset::parse("wealth"), Some(Preset::Wealth));
        assert_eq!(Preset::parse("Wealth"), Some(Preset::Wealth));
        assert_eq!(Preset::parse("nope"), None);
    }

    #[test]
    fn test_preset_values() {
        let wealth = Preset::Wealth.weights();
        assert_eq!(wealth.get(Factor::GdpPerCapita), 40.0);
        assert_eq!(wealth.get(Factor::CorruptionPerception), 10.0);

        let ethics = Preset::Ethics.weights();
        assert_eq!(ethics.get(Factor::Generosity), 25.0);
        assert_eq!(ethics.get(Factor::CorruptionPerception), 25.0);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut weights = WeightProfile::new([0.0; FACTOR_COUNT]);
        weights.adjust(Factor::Freedom, -WEIGHT_STEP);
        assert_eq!(weights.get(Factor::Freedom), 0.0);

        weights.set(Factor::Freedom, 98.0);
        weights.adjust(Factor::Freedom, WEIGHT_STEP);
        assert_eq!(weights.get(Factor::Freedom), 100.0);
    }

    #[test]
    fn test_total() {
        let weights = Preset::Balanced.weights();
        assert!((weights.total() - 100.0).abs() < 1e-9);
    }
}
