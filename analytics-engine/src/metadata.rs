//! FILENAME: analytics-engine/src/metadata.rs
//! PURPOSE: Dimensional metadata attached to an analytics result.
//! CONTEXT: The aggregation service returns, next to the rows, a dictionary of
//! display names for every identifier it mentions and, per dimension, the list
//! of identifiers in the order they were requested. That order is what
//! `AnalyticsData::sort_rows` ranks by.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of a single dimension item (data element, period, org unit...).
pub type ItemId = String;

/// Key of a dimension, e.g. `dx`, `pe`, `ou` or any dynamic dimension id.
pub type DimensionKey = String;

/// Display information for one dimension item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaDataItem {
    /// Human-readable name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MetaDataItem {
    pub fn new(name: impl Into<String>) -> Self {
        MetaDataItem {
            name: name.into(),
            code: None,
            description: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Items and canonical per-dimension ordering for one analytics response.
///
/// Identifiers listed under `dimensions` are expected to have an entry in
/// `items`, but partial metadata is normal: every lookup returns `None` on a
/// miss instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsMetaData {
    /// Identifier -> display item.
    pub items: HashMap<ItemId, MetaDataItem>,

    /// Dimension key -> identifiers in canonical (requested) order.
    pub dimensions: HashMap<DimensionKey, Vec<ItemId>>,
}

impl AnalyticsMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.dimensions.is_empty()
    }

    /// Registers (or replaces) the display item for an identifier.
    pub fn add_item(&mut self, id: impl Into<ItemId>, item: MetaDataItem) {
        self.items.insert(id.into(), item);
    }

    /// Sets the canonical item order of a dimension, replacing any previous one.
    pub fn set_dimension<I, S>(&mut self, key: impl Into<DimensionKey>, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        self.dimensions
            .insert(key.into(), ids.into_iter().map(Into::into).collect());
    }

    pub fn item(&self, id: &str) -> Option<&MetaDataItem> {
        self.items.get(id)
    }

    /// Display name of an identifier, if the metadata knows it.
    pub fn item_name(&self, id: &str) -> Option<&str> {
        self.items.get(id).map(|item| item.name.as_str())
    }

    /// Identifiers of a dimension in canonical order.
    pub fn dimension_items(&self, key: &str) -> Option<&[ItemId]> {
        self.dimensions.get(key).map(Vec::as_slice)
    }

    /// Position of `id` within the canonical order of dimension `key`.
    /// This is a linear scan; bulk callers should build a rank map instead.
    pub fn item_position(&self, key: &str, id: &str) -> Option<usize> {
        self.dimensions
            .get(key)
            .and_then(|ids| ids.iter().position(|candidate| candidate == id))
    }
}
