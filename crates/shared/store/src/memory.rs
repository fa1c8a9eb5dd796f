use bitmicro_core::{BookSnapshot, SortOrder, TimeRange, Trade};
use bitmicro_ports::{BookSource, StorageResult, TradeSource};
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

/// In-memory book and trade tables, one of each per symbol
pub struct InMemoryStore {
    books: Arc<DashMap<String, Vec<BookSnapshot>>>,
    trades: Arc<DashMap<String, Vec<Trade>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            books: Arc::new(DashMap::new()),
            trades: Arc::new(DashMap::new()),
        }
    }

    /// Add book snapshots for a symbol, keeping the table ascending by timestamp
    pub fn insert_books(&self, symbol: &str, books: impl IntoIterator<Item = BookSnapshot>) {
        let mut table = self.books.entry(symbol.to_string()).or_default();
        table.extend(books);
        table.sort_by_key(|book| book.timestamp);
    }

    /// Add trades for a symbol, keeping the table ascending by timestamp
    ///
    /// The sort is stable so trades sharing a second keep insertion order.
    pub fn insert_trades(&self, symbol: &str, trades: impl IntoIterator<Item = Trade>) {
        let mut table = self.trades.entry(symbol.to_string()).or_default();
        table.extend(trades);
        table.sort_by_key(|trade| trade.timestamp);
    }

    /// Number of snapshots stored for a symbol
    pub fn book_count(&self, symbol: &str) -> usize {
        self.books.get(symbol).map(|t| t.len()).unwrap_or(0)
    }

    /// Number of trades stored for a symbol
    pub fn trade_count(&self, symbol: &str) -> usize {
        self.trades.get(symbol).map(|t| t.len()).unwrap_or(0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryStore {
    fn clone(&self) -> Self {
        InMemoryStore {
            books: Arc::clone(&self.books),
            trades: Arc::clone(&self.trades),
        }
    }
}

impl BookSource for InMemoryStore {
    fn fetch_books(
        &self,
        symbol: &str,
        limit: usize,
        order: SortOrder,
    ) -> StorageResult<Vec<BookSnapshot>> {
        let Some(table) = self.books.get(symbol) else {
            debug!("No book table for {}", symbol);
            return Ok(Vec::new());
        };

        let books: Vec<BookSnapshot> = match order {
            SortOrder::Ascending => table.iter().take(limit).cloned().collect(),
            SortOrder::Descending => table.iter().rev().take(limit).cloned().collect(),
        };
        debug!(
            "Fetched {} of {} snapshots for {} ({:?})",
            books.len(),
            table.len(),
            symbol,
            order
        );
        Ok(books)
    }
}

impl TradeSource for InMemoryStore {
    fn fetch_trades(&self, symbol: &str, range: TimeRange) -> StorageResult<Vec<Trade>> {
        let Some(table) = self.trades.get(symbol) else {
            debug!("No trade table for {}", symbol);
            return Ok(Vec::new());
        };

        let lo = table.partition_point(|t| t.timestamp < range.start);
        let hi = table.partition_point(|t| t.timestamp <= range.end);
        let trades = table[lo..hi.max(lo)].to_vec();
        debug!(
            "Fetched {} trades for {} in [{}, {}]",
            trades.len(),
            symbol,
            range.start,
            range.end
        );
        Ok(trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitmicro_core::{BookLevel, Side};
    use rust_decimal_macros::dec;

    fn book(ts: i64) -> BookSnapshot {
        BookSnapshot::new(
            ts,
            vec![BookLevel::new(dec!(99), dec!(1), ts)],
            vec![BookLevel::new(dec!(101), dec!(1), ts)],
        )
    }

    fn trade(id: u64, ts: i64) -> Trade {
        Trade::new(id, ts, dec!(100), dec!(1), Side::Buy)
    }

    #[test]
    fn test_fetch_books_ascending_and_descending() {
        let store = InMemoryStore::new();
        store.insert_books("btcusd", [book(30), book(10), book(20)]);

        let asc = store.fetch_books("btcusd", 2, SortOrder::Ascending).unwrap();
        assert_eq!(asc.iter().map(|b| b.timestamp).collect::<Vec<_>>(), vec![10, 20]);

        let desc = store.fetch_books("btcusd", 2, SortOrder::Descending).unwrap();
        assert_eq!(desc.iter().map(|b| b.timestamp).collect::<Vec<_>>(), vec![30, 20]);
    }

    #[test]
    fn test_unknown_symbol_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.fetch_books("ltcusd", 10, SortOrder::Ascending).unwrap().is_empty());
        assert!(store.fetch_trades("ltcusd", TimeRange::new(0, 10)).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_trades_inclusive_range() {
        let store = InMemoryStore::new();
        store.insert_trades("btcusd", (0..10).map(|i| trade(i, i as i64)));

        let trades = store.fetch_trades("btcusd", TimeRange::new(3, 6)).unwrap();
        assert_eq!(trades.iter().map(|t| t.timestamp).collect::<Vec<_>>(), vec![3, 4, 5, 6]);

        let inverted = store.fetch_trades("btcusd", TimeRange::new(6, 3)).unwrap();
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_clone_shares_tables() {
        let store = InMemoryStore::new();
        let handle = store.clone();
        handle.insert_trades("btcusd", [trade(1, 5)]);
        assert_eq!(store.trade_count("btcusd"), 1);
        assert_eq!(store.book_count("btcusd"), 0);
    }
}
