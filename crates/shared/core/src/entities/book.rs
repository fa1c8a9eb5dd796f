use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity, Timestamp};

/// A single price level of a depth listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub amount: Quantity,
    /// Time the exchange last touched this level (seconds)
    pub timestamp: Timestamp,
}

impl BookLevel {
    pub fn new(price: Price, amount: Quantity, timestamp: Timestamp) -> Self {
        Self {
            price,
            amount,
            timestamp,
        }
    }
}

/// Point-in-time depth of one instrument
///
/// Both sides are stored in priority order as delivered by the collector:
/// bids highest first, asks lowest first. Nothing here re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Collection time (seconds); the key of the book table
    #[serde(alias = "_id")]
    pub timestamp: Timestamp,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

impl BookSnapshot {
    pub fn new(timestamp: Timestamp, bids: Vec<BookLevel>, asks: Vec<BookLevel>) -> Self {
        Self {
            timestamp,
            bids,
            asks,
        }
    }

    // === Price Queries ===

    /// Best bid level
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    /// Best ask level
    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    /// Width of the best market (ask - bid)
    pub fn width(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Midpoint of the best market
    pub fn mid(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price + ask.price) / Decimal::TWO),
            _ => None,
        }
    }

    /// Check if book has both sides
    pub fn is_two_sided(&self) -> bool {
        !self.bids.is_empty() && !self.asks.is_empty()
    }

    // === Level Queries ===

    /// Top N bid levels (best first)
    pub fn top_bids(&self, n: usize) -> &[BookLevel] {
        &self.bids[..n.min(self.bids.len())]
    }

    /// Top N ask levels (best first)
    pub fn top_asks(&self, n: usize) -> &[BookLevel] {
        &self.asks[..n.min(self.asks.len())]
    }

    // === Diagnostics ===

    /// Collection time as a UTC datetime
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Seconds between collection and the most recently updated level
    ///
    /// Large values mean the collector stored a stale listing.
    pub fn collection_lag(&self) -> Option<Timestamp> {
        self.bids
            .iter()
            .chain(self.asks.iter())
            .map(|level| level.timestamp)
            .max()
            .map(|newest| self.timestamp - newest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_book() -> BookSnapshot {
        BookSnapshot::new(
            1_000,
            vec![
                BookLevel::new(dec!(250.00), dec!(1.0), 998),
                BookLevel::new(dec!(249.90), dec!(2.0), 990),
                BookLevel::new(dec!(249.80), dec!(3.0), 995),
            ],
            vec![
                BookLevel::new(dec!(250.10), dec!(1.5), 997),
                BookLevel::new(dec!(250.20), dec!(2.5), 999),
            ],
        )
    }

    #[test]
    fn test_width_and_mid() {
        let book = sample_book();
        assert_eq!(book.width(), Some(dec!(0.10)));
        assert_eq!(book.mid(), Some(dec!(250.05)));
    }

    #[test]
    fn test_one_sided_book() {
        let book = BookSnapshot::new(1, vec![BookLevel::new(dec!(10), dec!(1), 1)], vec![]);
        assert!(!book.is_two_sided());
        assert_eq!(book.width(), None);
        assert_eq!(book.mid(), None);
    }

    #[test]
    fn test_top_levels_clamped() {
        let book = sample_book();
        assert_eq!(book.top_bids(2).len(), 2);
        assert_eq!(book.top_bids(10).len(), 3);
        assert_eq!(book.top_asks(10).len(), 2);
        assert_eq!(book.top_asks(1)[0].price, dec!(250.10));
    }

    #[test]
    fn test_collection_lag() {
        let book = sample_book();
        // Newest level was touched at 999
        assert_eq!(book.collection_lag(), Some(1));

        let empty = BookSnapshot::new(5, vec![], vec![]);
        assert_eq!(empty.collection_lag(), None);
    }

    #[test]
    fn test_datetime() {
        let book = BookSnapshot::new(0, vec![], vec![]);
        assert_eq!(book.datetime(), DateTime::from_timestamp(0, 0));
        assert_eq!(book.datetime().unwrap().to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_deserialize_store_document() {
        let json = r#"{
            "_id": 1420070400,
            "bids": [{"price": "315.1", "amount": "2", "timestamp": 1420070399}],
            "asks": [{"price": "315.3", "amount": "1", "timestamp": 1420070398}]
        }"#;
        let book: BookSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(book.timestamp, 1420070400);
        assert_eq!(book.mid(), Some(dec!(315.2)));
    }
}
