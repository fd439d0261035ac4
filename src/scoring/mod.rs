pub mod engine;
pub mod factors;
pub mod normalize;
pub mod validation;
pub mod weights;

pub use engine::{personalized_score, score_dataset, ScoreField, ScoredRecord};
pub use factors::{Factor, FACTOR_COUNT};
pub use normalize::{factor_bounds, normalize_dataset, NormalizedRecord};
pub use validation::validate_weights;
pub use weights::{Preset, WeightProfile, WEIGHT_MAX, WEIGHT_STEP};
