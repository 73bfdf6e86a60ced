//! Gamma exposure per (strike, type)
//!
//! GEX for one contract is `open_interest × gamma × 100 × φ`, with φ = +1 for
//! calls and −1 for puts. Contracts sharing the exact same strike and type are
//! folded into a single [`ExposureRow`].

mod calculator;

pub use calculator::*;

use serde::{Deserialize, Serialize};

use crate::core::OptionType;

/// Shares per option contract. Fixed by the GEX convention, not configurable.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Signed gamma exposure of a single contract
pub fn signed_exposure(open_interest: u64, gamma: f64, option_type: OptionType) -> f64 {
    open_interest as f64 * gamma * CONTRACT_MULTIPLIER * option_type.phi()
}

/// Aggregated exposure for one (strike, type) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRow {
    /// Strike price
    pub strike: f64,
    /// Call or put
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Sum of signed exposure
    pub gex: f64,
    /// Sum of open interest
    pub open_interest: u64,
    /// Unweighted mean gamma of the grouped contracts
    pub gamma: f64,
    /// Sum of reported volume (absent volumes count as zero)
    pub volume: u64,
}

impl ExposureRow {
    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    pub fn is_put(&self) -> bool {
        self.option_type == OptionType::Put
    }
}

/// Sort rows by (strike ascending, call before put)
pub fn sort_rows(rows: &mut [ExposureRow]) {
    rows.sort_by(|a, b| {
        a.strike
            .total_cmp(&b.strike)
            .then(a.option_type.cmp(&b.option_type))
    });
}
