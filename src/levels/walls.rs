//! Call Wall and Put Wall selection

use std::cmp::Ordering;

use crate::exposure::ExposureRow;

use super::Wall;

/// Call row with the largest `gex`
///
/// Equal maxima resolve to the lowest strike.
pub fn find_call_wall(rows: &[ExposureRow]) -> Option<Wall> {
    select_wall(rows.iter().filter(|r| r.is_call()), |r| r.gex)
}

/// Put row with the largest `|gex|`
///
/// Put exposure is negative by construction, so this is the most negative row.
/// Equal maxima resolve to the lowest strike. The reported `gex` keeps its sign.
pub fn find_put_wall(rows: &[ExposureRow]) -> Option<Wall> {
    select_wall(rows.iter().filter(|r| r.is_put()), |r| r.gex.abs())
}

fn select_wall<'a, I, F>(rows: I, key: F) -> Option<Wall>
where
    I: Iterator<Item = &'a ExposureRow>,
    F: Fn(&ExposureRow) -> f64,
{
    rows.fold(None::<&ExposureRow>, |best, row| match best {
        None => Some(row),
        Some(b) => {
            let ord = key(row)
                .total_cmp(&key(b))
                .then_with(|| b.strike.total_cmp(&row.strike));
            if ord == Ordering::Greater {
                Some(row)
            } else {
                Some(b)
            }
        }
    })
    .map(|r| Wall {
        strike: r.strike,
        gex: r.gex,
    })
}
