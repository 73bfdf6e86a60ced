//! GEX calculator: filter, per-contract exposure, (strike, type) aggregation

use std::collections::BTreeMap;

use crate::core::{Contract, OptionType};

use super::{signed_exposure, ExposureRow};

/// Contributions to one (strike, type) group
#[derive(Debug, Clone)]
struct RowAccumulator {
    strike: f64,
    option_type: OptionType,
    exposures: Vec<f64>,
    gammas: Vec<f64>,
    open_interest: u64,
    volume: u64,
}

impl RowAccumulator {
    fn new(strike: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            option_type,
            exposures: Vec::new(),
            gammas: Vec::new(),
            open_interest: 0,
            volume: 0,
        }
    }

    fn add(&mut self, open_interest: u64, gamma: f64, volume: Option<u64>) {
        self.exposures
            .push(signed_exposure(open_interest, gamma, self.option_type));
        self.gammas.push(gamma);
        self.open_interest = self.open_interest.saturating_add(open_interest);
        self.volume = self.volume.saturating_add(volume.unwrap_or(0));
    }

    fn finish(self) -> ExposureRow {
        let count = self.gammas.len();
        ExposureRow {
            strike: self.strike,
            option_type: self.option_type,
            gex: sorted_sum(self.exposures),
            open_interest: self.open_interest,
            gamma: sorted_sum(self.gammas) / count as f64,
            volume: self.volume,
        }
    }
}

/// Float sum that does not depend on the order values arrived in
fn sorted_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Compute aggregated exposure rows from a contract set
///
/// Contracts without gamma or open interest are dropped silently. Contracts
/// that have both but lack a strike or type cannot be keyed and are dropped
/// with a warning. An empty result is not an error.
///
/// Rows come back sorted by strike, calls before puts. The output is
/// bit-for-bit the same for any ordering of the same contracts.
pub fn calculate_gex(contracts: &[Contract]) -> Vec<ExposureRow> {
    // Strikes are positive and finite: their bit patterns order like their values.
    let mut groups: BTreeMap<(u64, OptionType), RowAccumulator> = BTreeMap::new();
    let mut used = 0usize;
    let mut unkeyed = 0usize;

    for contract in contracts {
        let (Some(open_interest), Some(gamma)) = (contract.open_interest, contract.gamma()) else {
            continue;
        };
        let (Some(strike), Some(option_type)) = (contract.strike, contract.option_type) else {
            unkeyed += 1;
            continue;
        };

        groups
            .entry((strike.to_bits(), option_type))
            .or_insert_with(|| RowAccumulator::new(strike, option_type))
            .add(open_interest, gamma, contract.volume);
        used += 1;
    }

    if unkeyed > 0 {
        tracing::warn!(
            "Dropped {} contract(s) with gamma and open interest but no usable strike/type",
            unkeyed
        );
    }

    tracing::info!(
        "Computed GEX from {} of {} contracts into {} (strike, type) rows",
        used,
        contracts.len(),
        groups.len()
    );

    groups.into_values().map(RowAccumulator::finish).collect()
}

/// Sum of `gex` over a row set
///
/// Rows are summed in (strike, type) order whatever order the slice is in.
pub fn total_gex(rows: &[ExposureRow]) -> f64 {
    let mut ordered: Vec<&ExposureRow> = rows.iter().collect();
    ordered.sort_by(|a, b| {
        a.strike
            .total_cmp(&b.strike)
            .then(a.option_type.cmp(&b.option_type))
    });
    ordered.into_iter().map(|r| r.gex).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::sort_rows;

    #[test]
    fn test_reference_example() {
        let contracts = vec![
            Contract::call(100.0).with_open_interest(500).with_gamma(0.05),
            Contract::put(100.0).with_open_interest(300).with_gamma(0.04),
        ];

        let mut rows = calculate_gex(&contracts);
        sort_rows(&mut rows);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].option_type, OptionType::Call);
        assert!((rows[0].gex - 2500.0).abs() < 1e-9);
        assert_eq!(rows[1].option_type, OptionType::Put);
        assert!((rows[1].gex + 1200.0).abs() < 1e-9);
        assert!((total_gex(&rows) - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn test_groups_by_exact_strike_and_type() {
        let contracts = vec![
            Contract::call(100.0).with_open_interest(100).with_gamma(0.02).with_volume(5),
            Contract::call(100.0).with_open_interest(300).with_gamma(0.04).with_volume(7),
            Contract::call(100.5).with_open_interest(10).with_gamma(0.01),
            Contract::put(100.0).with_open_interest(50).with_gamma(0.03),
        ];

        let mut rows = calculate_gex(&contracts);
        sort_rows(&mut rows);
        assert_eq!(rows.len(), 3);

        let merged = &rows[0];
        assert_eq!(merged.strike, 100.0);
        assert_eq!(merged.option_type, OptionType::Call);
        assert_eq!(merged.open_interest, 400);
        assert_eq!(merged.volume, 12);
        // 100*0.02*100 + 300*0.04*100
        assert!((merged.gex - 1400.0).abs() < 1e-9);
        // Arithmetic mean, not OI-weighted (which would be 0.035)
        assert!((merged.gamma - 0.03).abs() < 1e-12);

        assert_eq!(rows[1].strike, 100.0);
        assert_eq!(rows[1].option_type, OptionType::Put);
        assert_eq!(rows[2].strike, 100.5);
        assert_eq!(rows[2].volume, 0);
    }

    #[test]
    fn test_filters_missing_gamma_or_open_interest() {
        let contracts = vec![
            Contract::call(100.0).with_open_interest(500),
            Contract::put(95.0).with_gamma(0.04),
            Contract::call(105.0).with_open_interest(10).with_gamma(0.01),
        ];

        let rows = calculate_gex(&contracts);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].strike, 105.0);
    }

    #[test]
    fn test_unkeyed_contracts_dropped() {
        let mut no_type = Contract::call(100.0).with_open_interest(10).with_gamma(0.01);
        no_type.option_type = None;
        let mut no_strike = Contract::put(100.0).with_open_interest(10).with_gamma(0.01);
        no_strike.strike = None;

        assert!(calculate_gex(&[no_type, no_strike]).is_empty());
    }

    #[test]
    fn test_empty_after_filtering() {
        let contracts = vec![Contract::call(100.0), Contract::put(100.0)];
        assert!(calculate_gex(&contracts).is_empty());
        assert!(calculate_gex(&[]).is_empty());
        assert_eq!(total_gex(&[]), 0.0);
    }

    #[test]
    fn test_rows_come_back_in_strike_type_order() {
        let contracts = vec![
            Contract::put(105.0).with_open_interest(20).with_gamma(0.02),
            Contract::call(95.0).with_open_interest(30).with_gamma(0.01),
            Contract::put(95.0).with_open_interest(40).with_gamma(0.03),
            Contract::call(105.0).with_open_interest(50).with_gamma(0.02),
            Contract::call(100.0).with_open_interest(60).with_gamma(0.04),
        ];

        let keys: Vec<(f64, OptionType)> = calculate_gex(&contracts)
            .iter()
            .map(|r| (r.strike, r.option_type))
            .collect();
        assert_eq!(
            keys,
            vec![
                (95.0, OptionType::Call),
                (95.0, OptionType::Put),
                (100.0, OptionType::Call),
                (105.0, OptionType::Call),
                (105.0, OptionType::Put),
            ]
        );
    }

    #[test]
    fn test_total_is_bit_identical_across_runs_and_orderings() {
        // Near-cancelling book: the regime hinges on the last few bits of the total
        let contracts = vec![
            Contract::call(100.0).with_open_interest(1).with_gamma(0.1),
            Contract::call(100.0).with_open_interest(1).with_gamma(0.2),
            Contract::put(100.0).with_open_interest(1).with_gamma(0.3),
            Contract::call(105.0).with_open_interest(3).with_gamma(0.07),
            Contract::put(110.0).with_open_interest(7).with_gamma(0.03),
            Contract::put(110.0).with_open_interest(1).with_gamma(0.0001),
        ];
        let expected = calculate_gex(&contracts);
        let bits = total_gex(&expected).to_bits();

        let mut reversed = contracts.clone();
        reversed.reverse();
        let mut rotated = contracts.clone();
        rotated.rotate_left(2);

        for _ in 0..50 {
            for input in [&contracts, &reversed, &rotated] {
                let rows = calculate_gex(input);
                assert_eq!(rows, expected);
                assert_eq!(total_gex(&rows).to_bits(), bits);
            }
        }

        let mut shuffled_rows = expected.clone();
        shuffled_rows.reverse();
        assert_eq!(total_gex(&shuffled_rows).to_bits(), bits);
    }
}
