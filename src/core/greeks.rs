//! Option Greeks as reported by the data provider
//!
//! Every sensitivity is optional: a provider may omit a field or send a value
//! that cannot be read as a number.

use serde::{Deserialize, Serialize};

/// Provider-reported sensitivities for one contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: Option<f64>,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: Option<f64>,
    /// Theta: dV/dt (time decay, usually per day)
    pub theta: Option<f64>,
    /// Vega: dV/dσ (sensitivity to volatility)
    pub vega: Option<f64>,
    /// Rho: dV/dr (sensitivity to interest rate)
    pub rho: Option<f64>,
}

impl Greeks {
    /// Only gamma populated
    pub fn with_gamma(gamma: f64) -> Self {
        Self {
            gamma: Some(gamma),
            ..Default::default()
        }
    }

    /// Number of sensitivities present
    pub fn present(&self) -> usize {
        [self.delta, self.gamma, self.theta, self.vega, self.rho]
            .iter()
            .filter(|g| g.is_some())
            .count()
    }
}
