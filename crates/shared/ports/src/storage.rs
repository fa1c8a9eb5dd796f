use bitmicro_core::{BookSnapshot, SortOrder, TimeRange, Trade};

use crate::error::StorageResult;

/// Port for reading order book snapshots
///
/// Implementations might be:
/// - A time-series database collection per symbol
/// - An in-memory table for tests and replays
pub trait BookSource: Send + Sync {
    /// Fetch up to `limit` snapshots for `symbol`, ordered by collection time
    ///
    /// `SortOrder::Descending` returns the most recent snapshots first.
    fn fetch_books(
        &self,
        symbol: &str,
        limit: usize,
        order: SortOrder,
    ) -> StorageResult<Vec<BookSnapshot>>;
}

/// Port for reading executed trades
pub trait TradeSource: Send + Sync {
    /// Fetch every trade for `symbol` whose timestamp lies in `range`
    ///
    /// Results are sorted ascending by timestamp.
    fn fetch_trades(&self, symbol: &str, range: TimeRange) -> StorageResult<Vec<Trade>>;
}
