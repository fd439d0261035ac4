use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::{Factor, WeightProfile};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Path to the dataset CSV. Overridable with --data.
    pub data: Option<String>,
    /// Name of the preset or custom profile applied at startup.
    pub preset: Option<String>,
    /// User-defined named weight profiles, selectable like presets.
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,
}

/// A custom profile as written in YAML: factor header -> weight.
///
/// ```yaml
/// profiles:
///   - name: nordic
///     weights:
///       social_support: 30
///       healthy_life_expectancy: 30
///       freedom_to_make_life_choices: 20
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub name: String,
    pub weights: BTreeMap<String, f64>,
}

impl ProfileConfig {
    /// Resolve factor names to a WeightProfile. Unlisted factors weigh 0.
    /// Returns all problems at once, with field paths.
    pub fn to_weight_profile(&self) -> Result<WeightProfile, Vec<String>> {
        let mut errors = Vec::new();
        let mut profile = WeightProfile::new([0.0; crate::scoring::FACTOR_COUNT]);

        for (name, weight) in &self.weights {
            match Factor::from_csv_header(name) {
                Some(factor) => profile.set(factor, *weight),
                None => errors.push(format!(
                    "profiles.{}.weights: unknown factor '{}'",
                    self.name, name
                )),
            }
        }

        if let Err(weight_errors) = crate::scoring::validate_weights(&profile) {
            for e in weight_errors {
                errors.push(format!("profiles.{}.{}", self.name, e));
            }
        }

        if errors.is_empty() {
            Ok(profile)
        } else {
            Err(errors)
        }
    }
}
