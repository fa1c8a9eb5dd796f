//! Label derivation
//!
//! Forward log-returns of the midpoint are the training targets. The same
//! lookup run backwards gives lagged returns, used as inputs.
//!
//! The two have different missing-value policies: a missing forward label
//! stays missing (the row is dropped for training), a missing backward
//! return is filled with 0 (no history means no observed change).

use bitmicro_core::Timestamp;

use crate::alignment::nearest;

/// Mid of the snapshot nearest `t + offset`, for every `t` in `timestamps`
///
/// `timestamps` must be ascending and `mids` aligned with it. Negative
/// offsets look into the past.
pub fn future_mid(
    timestamps: &[Timestamp],
    mids: &[f64],
    offset: Timestamp,
    sensitivity: Timestamp,
) -> Vec<Option<f64>> {
    timestamps
        .iter()
        .map(|&ts| nearest(timestamps, ts + offset, sensitivity).map(|i| mids[i]))
        .collect()
}

/// `ln(future / mid)`
pub fn forward_label(mid: f64, future: Option<f64>) -> Option<f64> {
    future.map(|future| (future / mid).ln())
}

/// `ln(mid / past)`, 0 without a past snapshot
pub fn backward_feature(mid: f64, past: Option<f64>) -> f64 {
    past.map(|past| (mid / past).ln()).unwrap_or(0.0)
}

/// Forward labels for one offset
pub fn forward_labels(
    timestamps: &[Timestamp],
    mids: &[f64],
    offset: Timestamp,
    sensitivity: Timestamp,
) -> Vec<Option<f64>> {
    future_mid(timestamps, mids, offset, sensitivity)
        .into_iter()
        .zip(mids)
        .map(|(future, &mid)| forward_label(mid, future))
        .collect()
}

/// Backward features for one offset
pub fn backward_features(
    timestamps: &[Timestamp],
    mids: &[f64],
    offset: Timestamp,
    sensitivity: Timestamp,
) -> Vec<f64> {
    future_mid(timestamps, mids, -offset, sensitivity)
        .into_iter()
        .zip(mids)
        .map(|(past, &mid)| backward_feature(mid, past))
        .collect()
}
