//! bitmicro Core Domain
//!
//! Pure domain types for order-book feature generation.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Depth
    BookLevel,
    BookSnapshot,
    // Executions
    Side,
    // Storage queries
    SortOrder,
    TimeRange,
    Trade,
    TradeId,
};
pub use values::{Price, Quantity, Symbol, Timestamp, to_f64};
