//! Key-level identifier: walls, flip, total and regime from exposure rows

use crate::core::{GexError, GexResult};
use crate::exposure::{total_gex, ExposureRow};

use super::{
    collapse_by_strike, find_call_wall, find_gamma_flip, find_put_wall, KeyLevels, MarketRegime,
};

/// Derive key levels from an exposure row set
///
/// Returns [`GexError::InsufficientData`] for an empty set; callers that want
/// the run to complete substitute [`KeyLevels::empty`].
pub fn identify_key_levels(rows: &[ExposureRow]) -> GexResult<KeyLevels> {
    if rows.is_empty() {
        return Err(GexError::InsufficientData);
    }

    let call_wall = find_call_wall(rows);
    let put_wall = find_put_wall(rows);

    let profile = collapse_by_strike(rows);
    let gamma_flip = find_gamma_flip(&profile);

    let total = total_gex(rows);
    debug_assert!(
        {
            let collapsed: f64 = profile.iter().map(|p| p.gex).sum();
            let scale: f64 = rows.iter().map(|r| r.gex.abs()).sum::<f64>().max(1.0);
            (collapsed - total).abs() <= scale * 1e-9
        },
        "per-strike profile does not sum to total GEX"
    );

    let levels = KeyLevels {
        call_wall,
        put_wall,
        gamma_flip,
        total_gex: total,
        market_regime: MarketRegime::from_total(total),
    };

    tracing::info!(
        "Key levels: call wall {:?}, put wall {:?}, flip {:?}, total {:.0} ({})",
        levels.call_wall.map(|w| w.strike),
        levels.put_wall.map(|w| w.strike),
        levels.gamma_flip,
        levels.total_gex,
        levels.market_regime
    );

    Ok(levels)
}

/// Like [`identify_key_levels`] but maps an empty row set to [`KeyLevels::empty`]
pub fn identify_key_levels_or_empty(rows: &[ExposureRow]) -> KeyLevels {
    match identify_key_levels(rows) {
        Ok(levels) => levels,
        Err(e) => {
            tracing::warn!("{}; reporting empty key levels", e);
            KeyLevels::empty()
        }
    }
}
