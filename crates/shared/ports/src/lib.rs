//! bitmicro Ports
//!
//! Port definitions (traits) for reading market history.
//! These define the boundary between feature generation and the
//! time-series store. Connection lifecycle belongs to whoever implements
//! them; feature generation only borrows a handle for the duration of a run.

mod error;
mod storage;

pub use error::{StorageError, StorageResult};
pub use storage::{BookSource, TradeSource};
