//! # GEX Levels - Gamma Exposure Key-Level Detection
//!
//! Derives a Gamma Exposure (GEX) profile from an options chain snapshot and
//! locates the strikes where dealer hedging concentrates.
//!
//! ## Overview
//!
//! The pipeline has three stages:
//! - **Normalizer**: loosely-typed provider records → typed [`core::Contract`]s
//! - **GEX Calculator**: `OI × γ × 100 × (±1)` per contract, folded per (strike, type)
//! - **Key-Level Identifier**: Call Wall, Put Wall, Gamma Flip, total GEX, regime
//!
//! ## Usage
//!
//! ```rust
//! use gex_levels::prelude::*;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "data": [
//!         {"strike": "100", "type": "call", "open_interest": "500", "gamma": "0.05"},
//!         {"strike": "100", "type": "put", "open_interest": "300", "gamma": "0.04"}
//!     ]
//! });
//!
//! let profile = analyze_chain(&raw).unwrap();
//! assert_eq!(profile.key_levels.market_regime, MarketRegime::PositiveGamma);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Fetch data from a market-data provider
//! - Render charts or reports
//! - Stream, batch multiple symbols, or backtest

pub mod analysis;
pub mod core;
pub mod data;
pub mod exposure;
pub mod levels;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        normalize_chain, normalize_record, Contract, GexError, GexResult, Greeks, OptionType,
    };

    // Exposure
    pub use crate::exposure::{
        calculate_gex, signed_exposure, sort_rows, total_gex, ExposureRow, CONTRACT_MULTIPLIER,
    };

    // Level detection
    pub use crate::levels::{
        collapse_by_strike, find_call_wall, find_gamma_flip, find_put_wall, identify_key_levels,
        identify_key_levels_or_empty, KeyLevels, MarketRegime, StrikeExposure, Wall,
    };

    // Pipeline and storage
    pub use crate::analysis::{analyze_chain, GexAnalyzer, GexProfile};
    pub use crate::data::{ProcessedSnapshot, SnapshotStore, StoreConfig};
}

// Re-export main types at crate root
pub use crate::analysis::{analyze_chain, GexProfile};
pub use crate::core::{GexError, GexResult};
pub use crate::levels::KeyLevels;
