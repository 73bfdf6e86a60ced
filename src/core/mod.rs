//! Core data types for GEX analysis
//!
//! Defines fundamental types:
//! - OptionType: call/put and its exposure sign
//! - Contract: one normalized option record, plus the chain normalizer
//! - Greeks: provider-reported sensitivities
//! - GexError: error taxonomy

pub mod contract;
pub mod error;
pub mod greeks;
pub mod option;

pub use contract::*;
pub use error::*;
pub use greeks::*;
pub use option::*;
