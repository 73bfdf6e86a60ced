//! Gamma Flip: per-strike net exposure and the sign-change scan

use serde::{Deserialize, Serialize};

use crate::exposure::ExposureRow;

/// Net exposure at one strike (calls and puts summed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeExposure {
    pub strike: f64,
    pub gex: f64,
}

/// Collapse rows to one net value per strike, sorted by strike ascending
pub fn collapse_by_strike(rows: &[ExposureRow]) -> Vec<StrikeExposure> {
    let mut points: Vec<StrikeExposure> = rows
        .iter()
        .map(|r| StrikeExposure {
            strike: r.strike,
            gex: r.gex,
        })
        .collect();
    points.sort_by(|a, b| a.strike.total_cmp(&b.strike));

    let mut profile: Vec<StrikeExposure> = Vec::with_capacity(points.len());
    for point in points {
        match profile.last_mut() {
            Some(last) if last.strike == point.strike => last.gex += point.gex,
            _ => profile.push(point),
        }
    }
    profile
}

/// First sign change scanning strikes upward
///
/// `profile` must be sorted by strike ascending. Only strictly positive to
/// strictly negative (or the reverse) counts; a zero on either side of a pair
/// is skipped over. Positive→negative reports the lower strike of the pair,
/// negative→positive the higher one.
pub fn find_gamma_flip(profile: &[StrikeExposure]) -> Option<f64> {
    profile.windows(2).find_map(|pair| {
        let (lo, hi) = (pair[0], pair[1]);
        if lo.gex > 0.0 && hi.gex < 0.0 {
            Some(lo.strike)
        } else if lo.gex < 0.0 && hi.gex > 0.0 {
            Some(hi.strike)
        } else {
            None
        }
    })
}
