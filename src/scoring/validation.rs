use super::factors::Factor;
use super::weights::{WeightProfile, WEIGHT_MAX};

/// Validate a weight profile before use.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &WeightProfile) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for factor in Factor::ALL {
        let w = weights.get(factor);
        if !w.is_finite() {
            errors.push(format!(
                "weights.{}: must be a finite number, got {}",
                factor.csv_header(),
                w
            ));
        } else if w < 0.0 {
            errors.push(format!(
                "weights.{}: must be non-negative, got {}",
                factor.csv_header(),
                w
            ));
        } else if w > WEIGHT_MAX {
            errors.push(format!(
                "weights.{}: must be at most {}, got {}",
                factor.csv_header(),
                WEIGHT_MAX,
                w
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::factors::FACTOR_COUNT;

    #[test]
    fn test_valid_profile() {
        assert!(validate_weights(&WeightProfile::default()).is_ok());
        assert!(validate_weights(&WeightProfile::new([0.0; FACTOR_COUNT])).is_ok());
        assert!(validate_weights(&WeightProfile::new([100.0; FACTOR_COUNT])).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let mut weights = WeightProfile::default();
        weights.set(Factor::Freedom, -1.0);
        let errors = validate_weights(&weights).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("weights.freedom_to_make_life_choices"));
        assert!(errors[0].contains("non-negative"));
    }

    #[test]
    fn test_over_max_weight() {
        let mut weights = WeightProfile::default();
        weights.set(Factor::GdpPerCapita, 150.0);
        let errors = validate_weights(&weights).unwrap_err();
        assert!(errors[0].contains("weights.gdp_per_capita"));
    }

    #[test]
    fn test_non_finite_weight() {
        let mut weights = WeightProfile::default();
        weights.set(Factor::Generosity, f64::NAN);
        let errors = validate_weights(&weights).unwrap_err();
        assert!(errors[0].contains("finite"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut weights = WeightProfile::default();
        weights.set(Factor::GdpPerCapita, -5.0);
        weights.set(Factor::SocialSupport, 200.0);
        let errors = validate_weights(&weights).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
