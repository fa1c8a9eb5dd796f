//! Order book feature derivation
//!
//! Row-wise features of a single depth snapshot: the best market's width and
//! midpoint, and two distance-weighted measures over the top levels.
//!
//! Each level's weight is `(0.5 * width / (price - mid))^power`. The best
//! levels sit half a width from mid and get weight 1; deeper levels decay
//! faster the larger `power` is.

use bitmicro_core::{BookLevel, BookSnapshot, to_f64};

use crate::table::PowerFeatures;

/// Width and midpoint of the best market, `None` for a one-sided book
pub fn width_and_mid(book: &BookSnapshot) -> Option<(f64, f64)> {
    Some((to_f64(book.width()?), to_f64(book.mid()?)))
}

/// Distance weight of one level
///
/// A level priced exactly at mid has no finite weight and is skipped.
fn level_weight(level: &BookLevel, width: f64, mid: f64, power: i32) -> Option<f64> {
    let distance = to_f64(level.price) - mid;
    if distance == 0.0 {
        return None;
    }
    let weight = (0.5 * width / distance).powi(power);
    weight.is_finite().then_some(weight)
}

/// Level amount scaled by its distance weight
fn weighted_amount(level: &BookLevel, width: f64, mid: f64, power: i32) -> Option<f64> {
    level_weight(level, width, mid, power).map(|w| to_f64(level.amount) * w)
}

/// Weighted bid volume minus weighted ask volume over the top `n` levels
pub fn power_imbalance(book: &BookSnapshot, n: usize, power: i32) -> Option<f64> {
    let (width, mid) = width_and_mid(book)?;
    let side = |levels: &[BookLevel]| -> f64 {
        levels
            .iter()
            .filter_map(|level| weighted_amount(level, width, mid, power))
            .sum()
    };
    Some(side(book.top_bids(n)) - side(book.top_asks(n)))
}

/// Average of bid and ask prices over the top `n` levels, weighted by inverse
/// weighted volume
///
/// Thin levels near mid pull the price toward them, so the result leans
/// toward the side offering less resistance. Levels with zero weighted volume
/// are skipped; `None` if nothing is left.
pub fn power_adjusted_price(book: &BookSnapshot, n: usize, power: i32) -> Option<f64> {
    let (width, mid) = width_and_mid(book)?;

    let mut weighted_price = 0.0;
    let mut total_inverse = 0.0;
    for level in book.top_bids(n).iter().chain(book.top_asks(n)) {
        let Some(amount) = weighted_amount(level, width, mid, power) else {
            continue;
        };
        let inverse = 1.0 / amount;
        if !inverse.is_finite() {
            continue;
        }
        weighted_price += to_f64(level.price) * inverse;
        total_inverse += inverse;
    }

    if total_inverse == 0.0 {
        None
    } else {
        Some(weighted_price / total_inverse)
    }
}

/// Power-tier book feature extractor
///
/// Produces the imbalance and the mid-normalized adjusted price for one
/// exponent over a fixed number of levels.
#[derive(Debug, Clone)]
pub struct BookFeatures {
    /// Number of levels per side
    depth_levels: usize,
    /// Exponent of the distance weight
    power: i32,
}

impl BookFeatures {
    /// Create with default 10 levels
    pub fn new(power: i32) -> Self {
        Self::with_depth(10, power)
    }

    /// Create with custom depth levels
    pub fn with_depth(depth_levels: usize, power: i32) -> Self {
        Self {
            depth_levels: depth_levels.max(1),
            power,
        }
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    /// Extract the tier's features; `None` for a one-sided book
    pub fn extract(&self, book: &BookSnapshot) -> Option<PowerFeatures> {
        let (_, mid) = width_and_mid(book)?;
        let imbalance = power_imbalance(book, self.depth_levels, self.power)?;
        let adjusted_price = power_adjusted_price(book, self.depth_levels, self.power)
            .map(|price| (price / mid).ln());
        Some(PowerFeatures {
            imbalance,
            adjusted_price,
        })
    }
}
