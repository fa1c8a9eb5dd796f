//! Output table
//!
//! One typed row per retained book snapshot. The per-offset and per-tier
//! vectors are indexed by the table's [`FeatureSchema`], which is fixed when
//! the table is built.

use bitmicro_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::config::FeatureConfig;

/// Column layout shared by every row of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub mid_offsets: Vec<Timestamp>,
    pub trade_offsets: Vec<Timestamp>,
    pub power_tiers: Vec<i32>,
}

impl FeatureSchema {
    pub fn from_config(config: &FeatureConfig) -> Self {
        Self {
            mid_offsets: config.mid_offsets.clone(),
            trade_offsets: config.trade_offsets.clone(),
            power_tiers: config.power_tiers.clone(),
        }
    }

    /// Flat column names, in the order [`FeatureRow::values`] yields them
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["width".to_string(), "mid".to_string()];
        for n in &self.mid_offsets {
            names.push(format!("mid{}", n));
            names.push(format!("prev{}", n));
        }
        for p in &self.power_tiers {
            names.push(format!("imbalance{}", p));
            names.push(format!("adjusted_price{}", p));
        }
        for n in &self.trade_offsets {
            names.push(format!("trades{}", n));
            names.push(format!("aggressor{}", n));
            names.push(format!("trend{}", n));
        }
        names
    }
}

/// Distance-weighted book features for one power tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerFeatures {
    /// Weighted bid volume minus weighted ask volume
    pub imbalance: f64,
    /// `ln(adjusted_price / mid)`; `None` when no level carried weight
    pub adjusted_price: Option<f64>,
}

/// Trailing-window trade features for one offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeFeatures {
    /// `ln(mid / vwap)`, 0 for an empty window
    pub average: f64,
    /// Buy volume minus sell volume
    pub aggressor: f64,
    /// Least-squares slope of price against time
    pub trend: f64,
}

impl TradeFeatures {
    pub const EMPTY: TradeFeatures = TradeFeatures {
        average: 0.0,
        aggressor: 0.0,
        trend: 0.0,
    };
}

/// Features and labels for a single book snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub timestamp: Timestamp,
    pub width: f64,
    pub mid: f64,
    /// `ln(mid(t + n) / mid(t))` per mid offset; missing past the end of history
    pub forward: Vec<Option<f64>>,
    /// `ln(mid(t) / mid(t - n))` per mid offset; 0 without history
    pub backward: Vec<f64>,
    /// One entry per power tier
    pub power: Vec<PowerFeatures>,
    /// One entry per trade offset
    pub trades: Vec<TradeFeatures>,
}

impl FeatureRow {
    /// Row values flattened in [`FeatureSchema::column_names`] order
    pub fn values(&self) -> Vec<Option<f64>> {
        let mut values = vec![Some(self.width), Some(self.mid)];
        for (forward, backward) in self.forward.iter().zip(&self.backward) {
            values.push(*forward);
            values.push(Some(*backward));
        }
        for tier in &self.power {
            values.push(Some(tier.imbalance));
            values.push(tier.adjusted_price);
        }
        for trade in &self.trades {
            values.push(Some(trade.average));
            values.push(Some(trade.aggressor));
            values.push(Some(trade.trend));
        }
        values
    }

    /// Check every forward label is present
    pub fn is_labeled(&self) -> bool {
        self.forward.iter().all(Option::is_some)
    }
}

/// Assembled feature table, ready for a training pipeline or live predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    schema: FeatureSchema,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn new(schema: FeatureSchema, rows: Vec<FeatureRow>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FeatureRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in table order
    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.rows.iter().map(|row| row.timestamp).collect()
    }

    /// Row for a given snapshot timestamp
    pub fn row(&self, timestamp: Timestamp) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.timestamp == timestamp)
    }

    /// A single column by name, e.g. `"mid30"` or `"trend120"`
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let position = self
            .schema
            .column_names()
            .iter()
            .position(|column| column == name)?;
        Some(self.rows.iter().map(|row| row.values()[position]).collect())
    }
}
