//! FILENAME: analytics-engine/src/options.rs
//! Presentation options applied to a freshly loaded table.

use serde::{Deserialize, Serialize};

/// How a table should be prepared for display or paging.
///
/// Serializable so callers can keep it next to the request that produced the
/// table. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Reorder rows by the canonical dimension order from the metadata.
    pub sort_rows: bool,

    /// Keep at most this many rows (applied after sorting).
    pub row_limit: Option<usize>,
}

impl TableOptions {
    pub fn sorted() -> Self {
        TableOptions {
            sort_rows: true,
            row_limit: None,
        }
    }

    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }
}
