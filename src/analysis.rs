//! GexAnalyzer - facade over the normalize → exposure → key-level pipeline
//!
//! Pure and synchronous: one raw snapshot in, one [`GexProfile`] out.

use serde_json::Value;

use crate::core::{normalize_chain, Contract, GexResult};
use crate::exposure::{calculate_gex, sort_rows, ExposureRow};
use crate::levels::{collapse_by_strike, identify_key_levels_or_empty, KeyLevels, StrikeExposure};

/// Result of running the full pipeline on one snapshot
#[derive(Debug, Clone)]
pub struct GexProfile {
    /// Records in the raw snapshot
    pub contracts_total: usize,
    /// Contracts that contributed exposure
    pub contracts_used: usize,
    /// Aggregated rows, ordered by (strike, type)
    pub rows: Vec<ExposureRow>,
    /// Derived levels
    pub key_levels: KeyLevels,
}

impl GexProfile {
    /// Rows ordered by (strike, type)
    pub fn sorted_rows(&self) -> Vec<ExposureRow> {
        let mut rows = self.rows.clone();
        sort_rows(&mut rows);
        rows
    }

    /// Net exposure per strike, ascending
    pub fn strike_profile(&self) -> Vec<StrikeExposure> {
        collapse_by_strike(&self.rows)
    }

    /// Contracts dropped before aggregation
    pub fn contracts_dropped(&self) -> usize {
        self.contracts_total - self.contracts_used
    }

    /// True when no contract survived filtering
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Runs the three pipeline stages
#[derive(Debug, Clone, Copy, Default)]
pub struct GexAnalyzer;

impl GexAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a raw snapshot document (`{ "data": [ ... ] }`)
    ///
    /// Fails only with `InvalidInputFormat`; an empty exposure set produces
    /// empty key levels.
    pub fn analyze(&self, raw: &Value) -> GexResult<GexProfile> {
        let contracts = normalize_chain(raw)?;
        Ok(self.analyze_contracts(&contracts))
    }

    /// Analyze already-normalized contracts
    pub fn analyze_contracts(&self, contracts: &[Contract]) -> GexProfile {
        let contracts_used = contracts.iter().filter(|c| c.is_usable()).count();
        let rows = calculate_gex(contracts);
        let key_levels = identify_key_levels_or_empty(&rows);

        GexProfile {
            contracts_total: contracts.len(),
            contracts_used,
            rows,
            key_levels,
        }
    }
}

/// Convenience function: analyze a raw snapshot with the default analyzer
pub fn analyze_chain(raw: &Value) -> GexResult<GexProfile> {
    GexAnalyzer::new().analyze(raw)
}
