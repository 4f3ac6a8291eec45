//! FILENAME: analytics-engine/src/lib.rs
//! In-memory model of a multi-dimensional analytics result.
//!
//! The aggregation service answers a query with a table: column headers,
//! string rows, and metadata describing every dimension item. This crate holds
//! that table and provides the two pieces of real logic on top of it:
//! sorting rows by the requested (canonical) item order, and O(1) lookup of a
//! value by its dimension coordinates.
//!
//! Layers:
//! - `metadata`: Item names and canonical per-dimension ordering
//! - `header`: Column descriptors
//! - `data`: The table itself (sort, truncate, index construction)
//! - `index`: Detached composite-key lookup
//! - `options`: Serializable presentation options

pub mod data;
pub mod error;
pub mod header;
pub mod index;
pub mod metadata;
pub mod options;


pub use data::{AnalyticsData, Row};
pub use error::{AnalyticsError, AnalyticsResult};
pub use header::{
    AnalyticsHeader, ValueType, DATA_DIMENSION, ORG_UNIT_DIMENSION, PERIOD_DIMENSION,
    VALUE_COLUMN,
};
pub use index::{to_key, try_to_key, AnalyticsDataIndex, ColumnIndices, KEY_SEPARATOR};
pub use metadata::{AnalyticsMetaData, DimensionKey, ItemId, MetaDataItem};
pub use options::TableOptions;
