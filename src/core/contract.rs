//! Option contracts and chain normalization
//!
//! Converts the loosely-typed provider records of a raw snapshot into strictly
//! typed [`Contract`] values. Each field is coerced on its own: a value that
//! cannot be read becomes `None` for that record and the run carries on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{GexError, GexResult};
use super::greeks::Greeks;
use super::option::OptionType;

/// Top-level field holding the record array in a raw snapshot
pub const DATA_FIELD: &str = "data";

/// Record fields coerced to numbers
pub const NUMERIC_FIELDS: [&str; 12] = [
    "strike",
    "bid",
    "ask",
    "last",
    "volume",
    "open_interest",
    "delta",
    "gamma",
    "theta",
    "vega",
    "rho",
    "implied_volatility",
];

/// One option instrument from a chain snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Provider contract identifier (e.g. "QQQ250620C00500000")
    pub contract_id: Option<String>,
    /// Expiration date as sent by the provider
    pub expiration: Option<String>,
    /// Strike price (positive)
    pub strike: Option<f64>,
    /// Call or put
    #[serde(rename = "type")]
    pub option_type: Option<OptionType>,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Last traded price
    pub last: Option<f64>,
    /// Trading volume
    pub volume: Option<u64>,
    /// Open interest
    pub open_interest: Option<u64>,
    /// Implied volatility
    pub implied_volatility: Option<f64>,
    /// Provider Greeks
    pub greeks: Greeks,
}

impl Contract {
    /// Create a contract with only strike and type set
    pub fn new(strike: f64, option_type: OptionType) -> Self {
        Self {
            strike: Some(strike),
            option_type: Some(option_type),
            ..Default::default()
        }
    }

    pub fn call(strike: f64) -> Self {
        Self::new(strike, OptionType::Call)
    }

    pub fn put(strike: f64) -> Self {
        Self::new(strike, OptionType::Put)
    }

    pub fn with_open_interest(mut self, open_interest: u64) -> Self {
        self.open_interest = Some(open_interest);
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.greeks.gamma = Some(gamma);
        self
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Gamma, if the provider sent a usable one
    pub fn gamma(&self) -> Option<f64> {
        self.greeks.gamma
    }

    /// Whether both inputs of the exposure formula are present
    pub fn has_exposure_inputs(&self) -> bool {
        self.greeks.gamma.is_some() && self.open_interest.is_some()
    }

    /// Whether the calculator can both price and key this contract
    pub fn is_usable(&self) -> bool {
        self.has_exposure_inputs() && self.strike.is_some() && self.option_type.is_some()
    }

    /// Mid price from bid/ask
    pub fn mid(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) => Some((b + a) / 2.0),
            _ => None,
        }
    }
}

/// Normalize a raw snapshot document into contracts
///
/// The document must be an object whose `data` field is a non-empty array.
/// Output preserves the length and order of that array.
pub fn normalize_chain(raw: &Value) -> GexResult<Vec<Contract>> {
    let records = raw
        .get(DATA_FIELD)
        .ok_or_else(|| GexError::invalid_input(format!("missing `{}` field", DATA_FIELD)))?
        .as_array()
        .ok_or_else(|| GexError::invalid_input(format!("`{}` is not an array", DATA_FIELD)))?;

    if records.is_empty() {
        return Err(GexError::invalid_input("no option records in snapshot"));
    }

    let mut malformed = 0usize;
    let contracts: Vec<Contract> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let (contract, bad) = normalize_record(record);
            if bad > 0 {
                tracing::debug!("Record {}: {} malformed field(s) treated as absent", i, bad);
            }
            malformed += bad;
            contract
        })
        .collect();

    tracing::info!(
        "Normalized {} contracts ({} malformed fields)",
        contracts.len(),
        malformed
    );
    Ok(contracts)
}

/// Normalize a single record
///
/// Returns the contract and the number of fields that were present but could
/// not be coerced. A record that is not an object yields an all-absent contract.
pub fn normalize_record(record: &Value) -> (Contract, usize) {
    let Some(fields) = record.as_object() else {
        tracing::warn!("Skipping non-object option record: {}", record);
        return (Contract::default(), 1);
    };

    let mut bad = 0usize;
    let mut number = |name: &str| {
        let value = fields.get(name);
        let coerced = coerce_f64(value);
        if coerced.is_none() && is_supplied(value) {
            bad += 1;
        }
        coerced
    };

    let strike = number("strike").filter(|&k| k > 0.0);
    let bid = number("bid");
    let ask = number("ask");
    let last = number("last");
    let volume = number("volume").and_then(as_count);
    let open_interest = number("open_interest").and_then(as_count);
    let implied_volatility = number("implied_volatility");
    let greeks = Greeks {
        delta: number("delta"),
        gamma: number("gamma"),
        theta: number("theta"),
        vega: number("vega"),
        rho: number("rho"),
    };

    let option_type = fields
        .get("type")
        .and_then(Value::as_str)
        .and_then(OptionType::parse_loose);
    if option_type.is_none() && is_supplied(fields.get("type")) {
        bad += 1;
    }

    let contract = Contract {
        contract_id: text(fields.get("contractID").or_else(|| fields.get("contract_id"))),
        expiration: text(fields.get("expiration")),
        strike,
        option_type,
        bid,
        ask,
        last,
        volume,
        open_interest,
        implied_volatility,
        greeks,
    };

    (contract, bad)
}

/// Coerce a JSON value to a finite number
///
/// Numbers pass through; strings are trimmed and parsed. Anything else,
/// including NaN and infinities, is absent.
pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Non-negative whole number
fn as_count(n: f64) -> Option<u64> {
    if n >= 0.0 && n.fract() != 0.0 {
        tracing::debug!("Rejecting fractional count {}", n);
        return None;
    }
    (n >= 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

fn is_supplied(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
