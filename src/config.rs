use serde::{Deserialize, Serialize};

use crate::context::WeightSet;

/// Hand-tuned model constants, passed explicitly into the engine so that
/// alternate tunings can be evaluated side by side. Both weight sets sum
/// to exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Strict upper bound on the absence score below which the
    /// absence-dominant weights apply. The switch is a hard step, not a
    /// blend: an absence score of exactly this value stays on the
    /// balanced side.
    pub absence_regime_threshold: f64,
    pub absence_dominant_weights: WeightSet,
    pub balanced_weights: WeightSet,
    /// Multiplier applied to the global score before the logit transform.
    pub sharpness: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            absence_regime_threshold: -0.4,
            absence_dominant_weights: WeightSet {
                absences: 0.40,
                form: 0.18,
                home_away: 0.10,
                standings: 0.14,
                h2h: 0.04,
                opp_vs_strong: 0.04,
                lineup: 0.10,
            },
            balanced_weights: WeightSet {
                absences: 0.18,
                form: 0.27,
                home_away: 0.18,
                standings: 0.14,
                h2h: 0.09,
                opp_vs_strong: 0.04,
                lineup: 0.10,
            },
            sharpness: 2.0,
        }
    }
}
