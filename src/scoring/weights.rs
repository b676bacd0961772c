use serde::{Deserialize, Serialize};

/// Default blend: technical match dominates, referrals weigh least.
pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    tms: 0.5,
    srs: 0.3,
    rns: 0.2,
};

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub tms: f64,
    pub srs: f64,
    pub rns: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.tms + self.srs + self.rns
    }

    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<(), String> {
        if self.tms < 0.0 || self.srs < 0.0 || self.rns < 0.0 {
            return Err(format!(
                "weights must be non-negative, got {}/{}/{}",
                self.tms, self.srs, self.rns
            ));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(format!("weights must sum to 1, got {}", sum));
        }
        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < SUM_TOLERANCE);
        assert!(DEFAULT_WEIGHTS.validate().is_ok());
    }

    #[test]
    fn rejects_negative_components() {
        let w = ScoreWeights {
            tms: 1.2,
            srs: -0.1,
            rns: -0.1,
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn rejects_sum_away_from_one() {
        let w = ScoreWeights {
            tms: 0.5,
            srs: 0.3,
            rns: 0.3,
        };
        assert!(w.validate().is_err());
    }
}
