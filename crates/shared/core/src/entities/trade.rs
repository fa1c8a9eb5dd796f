use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{Price, Quantity, Timestamp};

/// Exchange-assigned identifier for an execution
pub type TradeId = u64;

/// A single execution as recorded by the trade collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    /// Execution time (seconds)
    pub timestamp: Timestamp,
    pub price: Price,
    pub amount: Quantity,
    /// Aggressor side
    pub side: Side,
}

impl Trade {
    pub fn new(
        id: TradeId,
        timestamp: Timestamp,
        price: Price,
        amount: Quantity,
        side: Side,
    ) -> Self {
        Self {
            id,
            timestamp,
            price,
            amount,
            side,
        }
    }

    /// Returns the notional value of the trade (price * amount)
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }

    /// Amount signed by aggressor: positive for buys, negative for sells
    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.side.sign()
    }
}
