//! Feature assembly
//!
//! Drives one feature-generation run against injected storage handles:
//!
//! ```text
//!   BookSource ──► width/mid ──► forward/backward mids ──► power tiers ─┐
//!                                                                      ├──► FeatureTable
//!   TradeSource ─────────────► trailing windows per trade offset ──────┘
//! ```
//!
//! Training runs read the oldest snapshots and drop rows that cannot be
//! labeled. Live runs read the newest snapshots and keep every row, since
//! each current snapshot must yield a prediction.

use bitmicro_core::{BookSnapshot, SortOrder, TimeRange, Timestamp};
use bitmicro_ports::{BookSource, TradeSource};
use log::{debug, info, warn};
use std::time::Instant;

use crate::book::{BookFeatures, width_and_mid};
use crate::config::FeatureConfig;
use crate::error::{FeatureError, FeatureResult};
use crate::labels::{backward_features, forward_labels};
use crate::table::{FeatureRow, FeatureSchema, FeatureTable};
use crate::trades::trade_features;

/// Whether a run feeds model training or live inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Oldest snapshots first; unlabeled rows dropped; stage timings logged
    Training,
    /// Newest snapshots first; every row kept
    Live,
}

impl RunMode {
    /// Order snapshots are requested from storage in
    pub fn sort_order(&self) -> SortOrder {
        match self {
            RunMode::Training => SortOrder::Ascending,
            RunMode::Live => SortOrder::Descending,
        }
    }
}

/// Stage timer; only training runs report at info level
struct StageTimer {
    mode: RunMode,
    start: Instant,
    stage: Instant,
}

impl StageTimer {
    fn new(mode: RunMode) -> Self {
        let now = Instant::now();
        Self {
            mode,
            start: now,
            stage: now,
        }
    }

    fn lap(&mut self, label: &str) {
        let minutes = self.stage.elapsed().as_secs_f64() / 60.0;
        match self.mode {
            RunMode::Training => info!("{} run time: {:.4} minutes", label, minutes),
            RunMode::Live => debug!("{} run time: {:.4} minutes", label, minutes),
        }
        self.stage = Instant::now();
    }

    fn finish(&self) {
        let minutes = self.start.elapsed().as_secs_f64() / 60.0;
        match self.mode {
            RunMode::Training => info!("make_features run time: {:.4} minutes", minutes),
            RunMode::Live => debug!("make_features run time: {:.4} minutes", minutes),
        }
    }
}

/// Joins book and trade history into a feature table
///
/// Borrows the storage handles for the duration of a run; connection
/// lifecycle stays with the caller.
pub struct FeatureAssembler<'a, B: BookSource + ?Sized, T: TradeSource + ?Sized> {
    books: &'a B,
    trades: &'a T,
    config: &'a FeatureConfig,
}

impl<'a, B: BookSource + ?Sized, T: TradeSource + ?Sized> FeatureAssembler<'a, B, T> {
    pub fn new(books: &'a B, trades: &'a T, config: &'a FeatureConfig) -> Self {
        Self {
            books,
            trades,
            config,
        }
    }

    /// Run feature generation over up to `sample` snapshots of `symbol`
    pub fn run(&self, symbol: &str, sample: usize, mode: RunMode) -> FeatureResult<FeatureTable> {
        self.config.validate()?;
        let config = self.config;
        let schema = FeatureSchema::from_config(config);
        let mut timer = StageTimer::new(mode);

        // Book related features
        let mut books = self.books.fetch_books(symbol, sample, mode.sort_order())?;
        if books.is_empty() {
            return Err(FeatureError::NoBooks {
                symbol: symbol.to_string(),
            });
        }
        // Lookups need ascending keys whatever order storage returned
        books.sort_by_key(|book| book.timestamp);

        let timestamps: Vec<Timestamp> = books.iter().map(|book| book.timestamp).collect();
        let quotes = books
            .iter()
            .map(|book| {
                width_and_mid(book).ok_or(FeatureError::OneSidedBook {
                    timestamp: book.timestamp,
                })
            })
            .collect::<FeatureResult<Vec<(f64, f64)>>>()?;
        let mids: Vec<f64> = quotes.iter().map(|&(_, mid)| mid).collect();
        timer.lap("book, width and mid");

        let forward: Vec<Vec<Option<f64>>> = config
            .mid_offsets
            .iter()
            .map(|&n| forward_labels(&timestamps, &mids, n, config.sensitivity))
            .collect();
        let backward: Vec<Vec<f64>> = config
            .mid_offsets
            .iter()
            .map(|&n| backward_features(&timestamps, &mids, n, config.sensitivity))
            .collect();

        // Rows travel with their snapshot until the depth is no longer needed
        let mut rows: Vec<(FeatureRow, &BookSnapshot)> = books
            .iter()
            .enumerate()
            .map(|(i, book)| {
                let row = FeatureRow {
                    timestamp: book.timestamp,
                    width: quotes[i].0,
                    mid: quotes[i].1,
                    forward: forward.iter().map(|column| column[i]).collect(),
                    backward: backward.iter().map(|column| column[i]).collect(),
                    power: Vec::with_capacity(config.power_tiers.len()),
                    trades: Vec::with_capacity(config.trade_offsets.len()),
                };
                (row, book)
            })
            .collect();

        if mode == RunMode::Training {
            let before = rows.len();
            rows.retain(|(row, _)| row.is_labeled());
            debug!("Dropped {} unlabeled rows of {}", before - rows.len(), before);
        }
        timer.lap("offset mids");

        if rows.is_empty() {
            warn!("No labeled rows for {} in a sample of {}", symbol, sample);
            timer.finish();
            return Ok(FeatureTable::new(schema, Vec::new()));
        }

        let extractors: Vec<BookFeatures> = config
            .power_tiers
            .iter()
            .map(|&power| BookFeatures::with_depth(config.depth_levels, power))
            .collect();
        for (row, book) in rows.iter_mut() {
            for extractor in &extractors {
                let tier = extractor
                    .extract(*book)
                    .ok_or(FeatureError::OneSidedBook {
                        timestamp: book.timestamp,
                    })?;
                row.power.push(tier);
            }
        }
        let mut rows: Vec<FeatureRow> = rows.into_iter().map(|(row, _)| row).collect();
        timer.lap("power calcs");

        // Trade related features
        let (first, last) = (rows[0].timestamp, rows[rows.len() - 1].timestamp);
        let range = TimeRange::new(first - config.largest_trade_offset(), last);
        let mut trades = self.trades.fetch_trades(symbol, range)?;
        if !trades.is_sorted_by_key(|trade| trade.timestamp) {
            warn!("Trades for {} arrived unsorted; sorting by timestamp", symbol);
            trades.sort_by_key(|trade| trade.timestamp);
        }
        debug!(
            "Using {} trades in [{}, {}] for {}",
            trades.len(),
            range.start,
            range.end,
            symbol
        );

        for row in rows.iter_mut() {
            for &n in &config.trade_offsets {
                row.trades
                    .push(trade_features(&trades, row.timestamp, n, row.mid));
            }
        }
        timer.lap("trade features");
        timer.finish();

        if mode.sort_order() == SortOrder::Descending {
            rows.reverse();
        }
        Ok(FeatureTable::new(schema, rows))
    }
}

/// Build a feature table for `sample` snapshots of `symbol`
pub fn make_features<B, T>(
    books: &B,
    trades: &T,
    symbol: &str,
    sample: usize,
    config: &FeatureConfig,
    mode: RunMode,
) -> FeatureResult<FeatureTable>
where
    B: BookSource + ?Sized,
    T: TradeSource + ?Sized,
{
    FeatureAssembler::new(books, trades, config).run(symbol, sample, mode)
}

/// Labeled training table with the default offsets
pub fn make_data<B, T>(books: &B, trades: &T, symbol: &str, sample: usize) -> FeatureResult<FeatureTable>
where
    B: BookSource + ?Sized,
    T: TradeSource + ?Sized,
{
    make_features(
        books,
        trades,
        symbol,
        sample,
        &FeatureConfig::default(),
        RunMode::Training,
    )
}

/// Unlabeled table over the newest snapshots, newest first
pub fn make_live_features<B, T>(
    books: &B,
    trades: &T,
    symbol: &str,
    sample: usize,
    config: &FeatureConfig,
) -> FeatureResult<FeatureTable>
where
    B: BookSource + ?Sized,
    T: TradeSource + ?Sized,
{
    make_features(books, trades, symbol, sample, config, RunMode::Live)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_per_mode() {
        assert_eq!(RunMode::Training.sort_order(), SortOrder::Ascending);
        assert_eq!(RunMode::Live.sort_order(), SortOrder::Descending);
    }
}
