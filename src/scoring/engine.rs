use crate::dataset::types::Record;

use super::factors::{Factor, FACTOR_COUNT};
use super::normalize::NormalizedRecord;
use super::weights::WeightProfile;

/// Selects which score drives ranking, distribution, and trend views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    /// The dataset's ground-truth happiness score.
    Original,
    /// The weighted score computed from the active profile.
    Personalized,
}

impl ScoreField {
    pub fn toggle(self) -> ScoreField {
        match self {
            ScoreField::Original => ScoreField::Personalized,
            ScoreField::Personalized => ScoreField::Original,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreField::Original => "Original",
            ScoreField::Personalized => "Personalized",
        }
    }
}

/// A record with its personalized score under the active weight profile.
/// The whole collection is replaced when the profile changes.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub record: Record,
    pub normalized: [Option<f64>; FACTOR_COUNT],
    pub personalized_score: f64,
}

impl ScoredRecord {
    pub fn country(&self) -> &str {
        &self.record.country
    }

    pub fn year(&self) -> i32 {
        self.record.year
    }

    pub fn score(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Original => self.record.happiness_score,
            ScoreField::Personalized => self.personalized_score,
        }
    }
}

/// Weighted average of the defined normalized factors, scaled to [0, 10].
///
/// Factors with no normalized value contribute neither to the weighted sum
/// nor to the weight total, so a sparse record is still scored against the
/// weight mass that could participate. All weights zero yields 0.
pub fn personalized_score(
    normalized: &[Option<f64>; FACTOR_COUNT],
    weights: &WeightProfile,
) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for factor in Factor::ALL {
        if let Some(value) = normalized[factor.index()] {
            let w = weights.get(factor);
            weighted_sum += value * w;
            total_weight += w;
        }
    }

    if total_weight > 0.0 {
        (weighted_sum / total_weight) * 10.0
    } else {
        0.0
    }
}

/// Score every record under one profile. Consumes the normalized set and
/// returns a complete replacement collection, so callers never observe a
/// half-updated mix of old and new scores.
pub fn score_dataset(
    normalized: Vec<NormalizedRecord>,
    weights: &WeightProfile,
) -> Vec<ScoredRecord> {
    normalized
        .into_iter()
        .map(|n| {
            let score = personalized_score(&n.normalized, weights);
            ScoredRecord {
                record: n.record,
                normalized: n.normalized,
                personalized_score: score,
            }
        })
        .collect()
}
