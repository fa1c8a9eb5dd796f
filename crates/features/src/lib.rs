//! bitmicro Features - Order Book and Trade Feature Generation
//!
//! Turns stored order-book snapshots and executions for one instrument into a
//! typed feature table, labeled for training or unlabeled for live inference.
//!
//! ## Components
//!
//! - **Alignment**: nearest and range lookups over ascending timestamps
//! - **Book**: width, mid, power imbalance, power-adjusted price
//! - **Trades**: VWAP, aggressor imbalance, trend over trailing windows
//! - **Labels**: forward log-return labels, backward log-return features
//! - **Assembly**: fetches through the storage ports and joins everything
//!
//! ## Usage
//!
//! ```ignore
//! use bitmicro_features::{FeatureConfig, make_data, make_live_features};
//! use bitmicro_store::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // ... load books and trades ...
//!
//! let training = make_data(&store, &store, "btcusd", 100_000)?;
//! let live = make_live_features(&store, &store, "btcusd", 500, &FeatureConfig::default())?;
//! println!("{:?}", training.schema().column_names());
//! ```

pub mod alignment;
pub mod assembly;
pub mod book;
pub mod config;
pub mod error;
pub mod labels;
pub mod table;
pub mod trades;

// Re-export main types
pub use assembly::{FeatureAssembler, RunMode, make_data, make_features, make_live_features};
pub use book::BookFeatures;
pub use config::{ConfigError, FeatureConfig};
pub use error::{FeatureError, FeatureResult};
pub use table::{FeatureRow, FeatureSchema, FeatureTable, PowerFeatures, TradeFeatures};
