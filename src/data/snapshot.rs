//! Processed snapshot document
//!
//! The JSON handed to the chart and report stages: run metadata, key levels
//! and the per-(strike, type) exposure rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::GexProfile;
use crate::exposure::ExposureRow;
use crate::levels::KeyLevels;

/// Output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSnapshot {
    /// Run date (UTC)
    pub date: NaiveDate,
    /// Underlying symbol
    pub symbol: String,
    /// Run timestamp
    pub timestamp: DateTime<Utc>,
    /// Derived levels
    pub key_levels: KeyLevels,
    /// Exposure rows ordered by (strike, type)
    pub gex_by_strike: Vec<ExposureRow>,
}

impl ProcessedSnapshot {
    /// Build a snapshot stamped with the current time
    pub fn new(symbol: impl Into<String>, profile: &GexProfile) -> Self {
        Self::at(symbol, profile, Utc::now())
    }

    /// Build a snapshot stamped with `timestamp`
    pub fn at(symbol: impl Into<String>, profile: &GexProfile, timestamp: DateTime<Utc>) -> Self {
        Self {
            date: timestamp.date_naive(),
            symbol: symbol.into(),
            timestamp,
            key_levels: profile.key_levels.clone(),
            gex_by_strike: profile.sorted_rows(),
        }
    }

    /// File name under the processed directory: `<date>_<symbol>.json`
    pub fn file_name(&self) -> String {
        processed_file_name(self.date, &self.symbol)
    }
}

pub fn processed_file_name(date: NaiveDate, symbol: &str) -> String {
    format!("{}_{}.json", date.format("%Y-%m-%d"), symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::GexAnalyzer;
    use crate::core::Contract;
    use chrono::TimeZone;

    #[test]
    fn test_document_shape() {
        let contracts = vec![
            Contract::put(105.0).with_open_interest(100).with_gamma(0.01),
            Contract::call(100.0).with_open_interest(500).with_gamma(0.05).with_volume(3),
            Contract::put(100.0).with_open_interest(300).with_gamma(0.04),
        ];
        let profile = GexAnalyzer::new().analyze_contracts(&contracts);
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 21, 5, 0).unwrap();
        let snapshot = ProcessedSnapshot::at("QQQ", &profile, ts);

        assert_eq!(snapshot.file_name(), "2025-03-14_QQQ.json");

        let v = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(v["date"], "2025-03-14");
        assert_eq!(v["symbol"], "QQQ");
        assert_eq!(v["timestamp"], "2025-03-14T21:05:00Z");
        assert_eq!(v["key_levels"]["market_regime"], "Positive Gamma");
        assert_eq!(v["key_levels"]["call_wall"]["strike"], 100.0);
        assert!(v["key_levels"]["gamma_flip"].is_number());

        let rows = v["gex_by_strike"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["strike"], 100.0);
        assert_eq!(rows[0]["type"], "call");
        assert_eq!(rows[0]["volume"], 3);
        assert_eq!(rows[1]["type"], "put");
        assert_eq!(rows[2]["strike"], 105.0);
        for key in ["strike", "type", "gex", "open_interest", "gamma", "volume"] {
            assert!(rows[0].get(key).is_some(), "missing {}", key);
        }
    }
}
