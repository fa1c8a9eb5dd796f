//! Trade feature derivation
//!
//! Statistics over the trades that printed in a trailing window before a
//! snapshot. The window for snapshot `ts` and offset `n` covers
//! `[ts - n, ts - 1]`, so a trade stamped in the same second as the
//! snapshot is never visible to it.

use bitmicro_core::{Timestamp, Trade, to_f64};
use rust_decimal::Decimal;

use crate::alignment::range_by;
use crate::table::TradeFeatures;

/// Minimum number of trades for a meaningful trend fit
const MIN_TREND_POINTS: usize = 3;

/// Trades stamped in `[ts - offset, ts - 1]`
///
/// `trades` must be ascending by timestamp.
pub fn trades_in_window(trades: &[Trade], ts: Timestamp, offset: Timestamp) -> &[Trade] {
    &trades[range_by(trades, ts - offset, ts, |trade| trade.timestamp)]
}

/// Volume-weighted average price, `None` for an empty window
pub fn volume_weighted_average(window: &[Trade]) -> Option<f64> {
    let volume: Decimal = window.iter().map(|trade| trade.amount).sum();
    if volume.is_zero() {
        return None;
    }
    let notional: Decimal = window.iter().map(Trade::notional).sum();
    Some(to_f64(notional / volume))
}

/// Buy volume minus sell volume
pub fn aggressor_imbalance(window: &[Trade]) -> f64 {
    to_f64(window.iter().map(Trade::signed_amount).sum())
}

/// Least-squares slope of price against timestamp
///
/// Fewer than three trades, or trades all stamped in the same second, have
/// no stable fit and report 0.
pub fn trend(window: &[Trade]) -> f64 {
    if window.len() < MIN_TREND_POINTS {
        return 0.0;
    }

    let n = window.len() as f64;
    let mean_x = window.iter().map(|t| t.timestamp as f64).sum::<f64>() / n;
    let mean_y = window.iter().map(|t| to_f64(t.price)).sum::<f64>() / n;

    let (sxy, sxx) = window.iter().fold((0.0, 0.0), |(sxy, sxx), t| {
        let dx = t.timestamp as f64 - mean_x;
        let dy = to_f64(t.price) - mean_y;
        (sxy + dx * dy, sxx + dx * dx)
    });

    if sxx == 0.0 { 0.0 } else { sxy / sxx }
}

/// All trade features for snapshot `ts` and one offset
///
/// The average is reported as `ln(mid / vwap)` and zero-filled when the
/// window is empty.
pub fn trade_features(trades: &[Trade], ts: Timestamp, offset: Timestamp, mid: f64) -> TradeFeatures {
    let window = trades_in_window(trades, ts, offset);
    if window.is_empty() {
        return TradeFeatures::EMPTY;
    }

    let average = volume_weighted_average(window)
        .map(|vwap| (mid / vwap).ln())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);

    TradeFeatures {
        average,
        aggressor: aggressor_imbalance(window),
        trend: trend(window),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitmicro_core::Side;
    use rust_decimal_macros::dec;

    fn trade(id: u64, ts: Timestamp, price: Decimal, amount: Decimal, side: Side) -> Trade {
        Trade::new(id, ts, price, amount, side)
    }

    fn three_buys() -> Vec<Trade> {
        vec![
            trade(1, 5, dec!(10), dec!(1), Side::Buy),
            trade(2, 6, dec!(11), dec!(1), Side::Buy),
            trade(3, 7, dec!(12), dec!(1), Side::Buy),
        ]
    }

    #[test]
    fn test_window_excludes_snapshot_second() {
        let trades: Vec<Trade> = (0..10)
            .map(|i| trade(i, i as Timestamp, dec!(100), dec!(1), Side::Buy))
            .collect();

        let window = trades_in_window(&trades, 8, 3);
        let stamps: Vec<Timestamp> = window.iter().map(|t| t.timestamp).collect();
        assert_eq!(stamps, vec![5, 6, 7]);

        assert!(trades_in_window(&trades, 0, 5).is_empty());
        assert_eq!(trades_in_window(&trades, 100, 1000).len(), 10);
    }

    #[test]
    fn test_window_keeps_same_second_trades() {
        let trades = vec![
            trade(1, 4, dec!(100), dec!(1), Side::Buy),
            trade(2, 5, dec!(100), dec!(1), Side::Buy),
            trade(3, 5, dec!(101), dec!(1), Side::Sell),
            trade(4, 6, dec!(102), dec!(1), Side::Buy),
        ];
        let window = trades_in_window(&trades, 6, 1);
        assert_eq!(window.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_three_trade_example() {
        let trades = three_buys();
        let window = trades_in_window(&trades, 8, 3);
        assert_eq!(window.len(), 3);

        assert_eq!(volume_weighted_average(window), Some(11.0));
        assert_eq!(aggressor_imbalance(window), 3.0);
        assert_eq!(trend(window), 1.0);
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(volume_weighted_average(&[]), None);
        assert_eq!(aggressor_imbalance(&[]), 0.0);
        assert_eq!(trend(&[]), 0.0);
        assert_eq!(trade_features(&three_buys(), 100, 10, 11.0), TradeFeatures::EMPTY);
    }

    #[test]
    fn test_vwap_weights_by_amount() {
        let window = vec![
            trade(1, 1, dec!(10), dec!(3), Side::Buy),
            trade(2, 2, dec!(20), dec!(1), Side::Sell),
        ];
        assert_eq!(volume_weighted_average(&window), Some(12.5));
        assert_eq!(aggressor_imbalance(&window), 2.0);
    }

    #[test]
    fn test_trend_two_points_is_zero() {
        let window = vec![
            trade(1, 1, dec!(10), dec!(1), Side::Buy),
            trade(2, 2, dec!(20), dec!(1), Side::Buy),
        ];
        assert_eq!(trend(&window), 0.0);
    }

    #[test]
    fn test_trend_collinear_slope() {
        let window: Vec<Trade> = (0..5)
            .map(|i| {
                trade(
                    i,
                    10 + 2 * i as Timestamp,
                    Decimal::from(50 - 3 * i as i64),
                    dec!(1),
                    Side::Sell,
                )
            })
            .collect();
        // Price drops 3 every 2 seconds
        assert!((trend(&window) + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_trend_same_second_is_zero() {
        let window = vec![
            trade(1, 7, dec!(10), dec!(1), Side::Buy),
            trade(2, 7, dec!(11), dec!(1), Side::Buy),
            trade(3, 7, dec!(12), dec!(1), Side::Buy),
        ];
        assert_eq!(trend(&window), 0.0);
    }

    #[test]
    fn test_trade_features_log_normalizes_average() {
        let features = trade_features(&three_buys(), 8, 3, 11.0);
        assert_eq!(features.average, 0.0);
        assert_eq!(features.aggressor, 3.0);
        assert_eq!(features.trend, 1.0);

        let features = trade_features(&three_buys(), 8, 3, 22.0);
        assert!((features.average - 2f64.ln()).abs() < 1e-12);
    }
}
