//! Key-level identification from an aggregated GEX profile
//!
//! Detects the strikes where dealer gamma hedging concentrates.
//!
//! Three levels plus a regime label:
//! - **Call Wall**: call strike with the largest positive exposure (likely ceiling)
//! - **Put Wall**: put strike with the largest absolute exposure (likely floor)
//! - **Gamma Flip**: first strike, scanning upward, where net exposure changes sign
//! - **Market Regime**: sign of total exposure (volatility suppressing vs amplifying)

mod flip;
mod identifier;
mod walls;

pub use flip::*;
pub use identifier::*;
pub use walls::*;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A wall level: strike and the exposure found there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub strike: f64,
    pub gex: f64,
}

/// Regime implied by the sign of total GEX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketRegime {
    /// Dealers long gamma: hedging dampens moves
    #[serde(rename = "Positive Gamma")]
    PositiveGamma,
    /// Dealers short gamma: hedging amplifies moves
    #[serde(rename = "Negative Gamma")]
    NegativeGamma,
}

impl MarketRegime {
    /// Strictly positive total is PositiveGamma; zero is NegativeGamma
    pub fn from_total(total_gex: f64) -> Self {
        if total_gex > 0.0 {
            MarketRegime::PositiveGamma
        } else {
            MarketRegime::NegativeGamma
        }
    }

    /// Label used in reports and the processed snapshot
    pub fn label(&self) -> &'static str {
        match self {
            MarketRegime::PositiveGamma => "Positive Gamma",
            MarketRegime::NegativeGamma => "Negative Gamma",
        }
    }

    /// Short description of expected price behavior
    pub fn description(&self) -> &'static str {
        match self {
            MarketRegime::PositiveGamma => "volatility suppressed, mean-reverting",
            MarketRegime::NegativeGamma => "volatility amplified, trend-following",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key levels derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    #[serde(with = "wall_repr")]
    pub call_wall: Option<Wall>,
    #[serde(with = "wall_repr")]
    pub put_wall: Option<Wall>,
    pub gamma_flip: Option<f64>,
    pub total_gex: f64,
    pub market_regime: MarketRegime,
}

impl KeyLevels {
    /// Levels for a snapshot with no usable exposure
    pub fn empty() -> Self {
        Self {
            call_wall: None,
            put_wall: None,
            gamma_flip: None,
            total_gex: 0.0,
            market_regime: MarketRegime::from_total(0.0),
        }
    }

    /// True when no wall or flip was found
    pub fn is_empty(&self) -> bool {
        self.call_wall.is_none() && self.put_wall.is_none() && self.gamma_flip.is_none()
    }

    /// Whether `price` sits between the put wall and the call wall
    pub fn is_within_walls(&self, price: f64) -> Option<bool> {
        match (self.put_wall, self.call_wall) {
            (Some(put), Some(call)) => {
                let (lo, hi) = if put.strike <= call.strike {
                    (put.strike, call.strike)
                } else {
                    (call.strike, put.strike)
                };
                Some(price >= lo && price <= hi)
            }
            _ => None,
        }
    }
}

impl fmt::Display for KeyLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = |p: Option<f64>| p.map_or_else(|| "N/A".to_string(), |v| format!("${:.2}", v));

        writeln!(f, "Call Wall: {}", price(self.call_wall.map(|w| w.strike)))?;
        writeln!(f, "Put Wall: {}", price(self.put_wall.map(|w| w.strike)))?;
        writeln!(f, "Gamma Flip: {}", price(self.gamma_flip))?;
        writeln!(f, "Total GEX: {}", format_thousands(self.total_gex))?;
        write!(f, "Market Regime: {}", self.market_regime)
    }
}

/// Round to a whole number and group digits with commas: -1234567.8 -> "-1,234,568"
pub fn format_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value.round() < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Walls serialize as `{ "strike", "gex" }` with both fields null when absent
mod wall_repr {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Wall;

    #[derive(Serialize, Deserialize)]
    struct Repr {
        strike: Option<f64>,
        gex: Option<f64>,
    }

    pub fn serialize<S: Serializer>(wall: &Option<Wall>, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = Repr {
            strike: wall.map(|w| w.strike),
            gex: wall.map(|w| w.gex),
        };
        repr.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Wall>, D::Error> {
        let repr = Option::<Repr>::deserialize(deserializer)?;
        Ok(match repr {
            Some(Repr {
                strike: Some(strike),
                gex: Some(gex),
            }) => Some(Wall { strike, gex }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_regime_strict_positive() {
        assert_eq!(MarketRegime::from_total(1300.0), MarketRegime::PositiveGamma);
        assert_eq!(MarketRegime::from_total(0.0), MarketRegime::NegativeGamma);
        assert_eq!(MarketRegime::from_total(-0.0), MarketRegime::NegativeGamma);
        assert_eq!(MarketRegime::from_total(-5.0), MarketRegime::NegativeGamma);
        assert_eq!(MarketRegime::from_total(f64::MIN_POSITIVE), MarketRegime::PositiveGamma);
    }

    #[test]
    fn test_empty_levels() {
        let levels = KeyLevels::empty();
        assert!(levels.is_empty());
        assert_eq!(levels.total_gex, 0.0);
        assert_eq!(levels.market_regime, MarketRegime::NegativeGamma);
        assert_eq!(levels.is_within_walls(100.0), None);
    }

    #[test]
    fn test_json_shape() {
        let levels = KeyLevels {
            call_wall: Some(Wall { strike: 510.0, gex: 125000.0 }),
            put_wall: None,
            gamma_flip: Some(495.0),
            total_gex: 42.5,
            market_regime: MarketRegime::PositiveGamma,
        };

        let v = serde_json::to_value(&levels).unwrap();
        assert_eq!(
            v,
            json!({
                "call_wall": {"strike": 510.0, "gex": 125000.0},
                "put_wall": {"strike": null, "gex": null},
                "gamma_flip": 495.0,
                "total_gex": 42.5,
                "market_regime": "Positive Gamma"
            })
        );

        let back: KeyLevels = serde_json::from_value(v).unwrap();
        assert_eq!(back, levels);
    }

    #[test]
    fn test_within_walls() {
        let levels = KeyLevels {
            call_wall: Some(Wall { strike: 110.0, gex: 10.0 }),
            put_wall: Some(Wall { strike: 90.0, gex: -10.0 }),
            ..KeyLevels::empty()
        };
        assert_eq!(levels.is_within_walls(100.0), Some(true));
        assert_eq!(levels.is_within_walls(111.0), Some(false));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1300.0), "1,300");
        assert_eq!(format_thousands(-1234567.8), "-1,234,568");
        assert_eq!(format_thousands(-0.2), "0");
    }

    #[test]
    fn test_summary_display() {
        let levels = KeyLevels {
            call_wall: Some(Wall { strike: 100.0, gex: 2500.0 }),
            put_wall: Some(Wall { strike: 100.0, gex: -1200.0 }),
            gamma_flip: None,
            total_gex: 1300.0,
            market_regime: MarketRegime::PositiveGamma,
        };
        let text = levels.to_string();
        assert_eq!(
            text,
            "Call Wall: $100.00\nPut Wall: $100.00\nGamma Flip: N/A\nTotal GEX: 1,300\nMarket Regime: Positive Gamma"
        );
    }
}
