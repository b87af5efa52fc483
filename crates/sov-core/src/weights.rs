use serde::{Deserialize, Serialize};

use crate::ConfigError;

const SUM_TOLERANCE: f64 = 1e-9;

/// Weights combining mention-frequency share and sentiment into one SoV score.
///
/// Both weights lie in `[0.0, 1.0]` and sum to `1.0`; construct through
/// [`SovWeights::new`] to enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SovWeights {
    frequency: f64,
    sentiment: f64,
}

impl SovWeights {
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if either weight is outside
    /// `[0.0, 1.0]`, non-finite, or the pair does not sum to `1.0`.
    pub fn new(frequency: f64, sentiment: f64) -> Result<Self, ConfigError> {
        for (name, w) in [("frequency", frequency), ("sentiment", sentiment)] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::Validation(format!(
                    "{name} weight {w} must lie in [0, 1]"
                )));
            }
        }
        if ((frequency + sentiment) - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::Validation(format!(
                "SoV weights must sum to 1.0 (got {frequency} + {sentiment})"
            )));
        }
        Ok(Self {
            frequency,
            sentiment,
        })
    }

    #[must_use]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    #[must_use]
    pub fn sentiment(&self) -> f64 {
        self.sentiment
    }
}

impl Default for SovWeights {
    fn default() -> Self {
        Self {
            frequency: 0.6,
            sentiment: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sixty_forty() {
        let w = SovWeights::default();
        assert_eq!(w.frequency(), 0.6);
        assert_eq!(w.sentiment(), 0.4);
    }

    #[test]
    fn accepts_extremes() {
        assert!(SovWeights::new(1.0, 0.0).is_ok());
        assert!(SovWeights::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn rejects_pair_not_summing_to_one() {
        let err = SovWeights::new(0.5, 0.4).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"), "got: {err}");
    }

    #[test]
    fn rejects_negative_weight() {
        let err = SovWeights::new(1.5, -0.5).unwrap_err();
        assert!(err.to_string().contains("must lie in [0, 1]"), "got: {err}");
    }

    #[test]
    fn rejects_nan() {
        assert!(SovWeights::new(f64::NAN, 0.4).is_err());
    }
}
