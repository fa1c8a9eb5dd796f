//! bitmicro Store
//!
//! In-memory implementation of the storage ports. Tables are keyed by
//! symbol and kept sorted by timestamp, mirroring how the collector's
//! time-series collections are indexed. Useful for tests, replays, and
//! callers that already hold history in process.

mod memory;

pub use memory::InMemoryStore;
