use bitmicro_core::Timestamp;
use bitmicro_ports::StorageError;
use thiserror::Error;

use crate::config::ConfigError;

/// Reasons a feature-generation run aborts
///
/// A failed run produces no partial table; the caller restarts it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No book snapshots stored for {symbol}")]
    NoBooks { symbol: String },

    #[error("Book at {timestamp} is missing a side")]
    OneSidedBook { timestamp: Timestamp },
}

pub type FeatureResult<T> = std::result::Result<T, FeatureError>;
