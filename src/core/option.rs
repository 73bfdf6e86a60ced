//! Option type definitions
//!
//! Call/put classification and the dealer-hedging sign convention used by GEX.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GexError;

/// Option type (Call or Put)
///
/// Ordered so that rows sorted by `(strike, type)` list the call before the put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Exposure sign: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Wire label ("call" / "put")
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Lenient parse used by the normalizer: trims and ignores case
    pub fn parse_loose(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("call") {
            Some(OptionType::Call)
        } else if s.eq_ignore_ascii_case("put") {
            Some(OptionType::Put)
        } else {
            None
        }
    }
}

impl FromStr for OptionType {
    type Err = GexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s).ok_or_else(|| GexError::data(format!("unknown option type: {:?}", s)))
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
