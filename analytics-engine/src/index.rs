//! FILENAME: analytics-engine/src/index.rs
//! Composite-key lookup over an analytics table.
//!
//! An `AnalyticsDataIndex` is a detached snapshot: it copies keys and values
//! out of the source rows and never sees later changes to the table. Rebuild
//! it after mutating the source.
//!
//! Keys are the dimension-column values of a row joined with `KEY_SEPARATOR`,
//! e.g. `A1::B1::C1`.

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Delimiter between the parts of a composite key. Identifiers must not
/// contain it; index builds and lookups reject values that do.
pub const KEY_SEPARATOR: &str = "::";

/// Positions of the key columns. Tables rarely have more than a handful of
/// dimensions.
pub type ColumnIndices = SmallVec<[usize; 4]>;

// ============================================================================
// KEY CONSTRUCTION
// ============================================================================

/// Joins the cells of `row` at `dimension_column_indices`, in that order.
///
/// # Panics
/// Panics if an index is outside `row`. Use [`try_to_key`] for rows of
/// unknown width.
pub fn to_key<S: AsRef<str>>(row: &[S], dimension_column_indices: &[usize]) -> String {
    join_key(dimension_column_indices.iter().map(|&i| row[i].as_ref()))
}

/// Like [`to_key`], but returns `None` when a column is missing from `row`.
pub fn try_to_key<S: AsRef<str>>(row: &[S], dimension_column_indices: &[usize]) -> Option<String> {
    if dimension_column_indices.iter().any(|&i| i >= row.len()) {
        return None;
    }
    Some(to_key(row, dimension_column_indices))
}

fn join_key<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut key = String::new();
    for (i, part) in parts.enumerate() {
        if i > 0 {
            key.push_str(KEY_SEPARATOR);
        }
        key.push_str(part);
    }
    key
}

// ============================================================================
// INDEX
// ============================================================================

#[derive(Debug, Clone)]
pub struct AnalyticsDataIndex {
    dimension_column_indices: ColumnIndices,
    value_column_index: usize,
    entries: FxHashMap<String, String>,
    /// Rows whose key was already present and got overwritten.
    duplicate_count: usize,
}

impl AnalyticsDataIndex {
    /// Indexes `rows` in a single pass.
    ///
    /// Every row must be wide enough to hold all key columns and the value
    /// column; otherwise the build fails with `IndexOutOfRange` naming the
    /// offending row. A key cell containing `KEY_SEPARATOR` fails with
    /// `InvalidArgument`. When two rows produce the same key the later row
    /// wins.
    pub fn build<S: AsRef<str>>(
        rows: &[Vec<S>],
        dimension_column_indices: &[usize],
        value_column_index: usize,
    ) -> AnalyticsResult<Self> {
        let required_width = dimension_column_indices
            .iter()
            .copied()
            .chain(std::iter::once(value_column_index))
            .max()
            .map_or(0, |max| max + 1);

        let mut entries = FxHashMap::with_capacity_and_hasher(rows.len(), Default::default());
        let mut duplicate_count = 0;

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() < required_width {
                return Err(AnalyticsError::IndexOutOfRange(format!(
                    "row {} has {} cells but column {} is required",
                    row_index,
                    row.len(),
                    required_width - 1
                )));
            }

            if let Some(&column) = dimension_column_indices
                .iter()
                .find(|&&i| row[i].as_ref().contains(KEY_SEPARATOR))
            {
                return Err(AnalyticsError::InvalidArgument(format!(
                    "row {} column {}: value '{}' contains the key separator '{}'",
                    row_index,
                    column,
                    row[column].as_ref(),
                    KEY_SEPARATOR
                )));
            }

            let key = to_key(row, dimension_column_indices);
            let value = row[value_column_index].as_ref().to_string();
            if entries.insert(key, value).is_some() {
                duplicate_count += 1;
            }
        }

        if duplicate_count > 0 {
            warn!(
                "analytics index: {} duplicate composite keys overwritten by later rows",
                duplicate_count
            );
        }
        debug!(
            "analytics index built: rows={} keys={} key_columns={:?} value_column={}",
            rows.len(),
            entries.len(),
            dimension_column_indices,
            value_column_index
        );

        Ok(AnalyticsDataIndex {
            dimension_column_indices: dimension_column_indices.iter().copied().collect(),
            value_column_index,
            entries,
            duplicate_count,
        })
    }

    pub fn dimension_column_indices(&self) -> &[usize] {
        &self.dimension_column_indices
    }

    pub fn value_column_index(&self) -> usize {
        self.value_column_index
    }

    /// Number of distinct composite keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }

    /// Value stored for the given dimension values, one per key column.
    ///
    /// Returns `Ok(None)` when no row has that combination. Fails with
    /// `InvalidArgument` when the number of values differs from the number of
    /// key columns, or when a value contains `KEY_SEPARATOR`.
    pub fn get_value<S: AsRef<str>>(
        &self,
        dimension_values: &[S],
    ) -> AnalyticsResult<Option<&str>> {
        if dimension_values.len() != self.dimension_column_indices.len() {
            return Err(AnalyticsError::InvalidArgument(format!(
                "expected {} dimension values, got {}",
                self.dimension_column_indices.len(),
                dimension_values.len()
            )));
        }
        if let Some(bad) = dimension_values
            .iter()
            .map(AsRef::as_ref)
            .find(|v: &&str| v.contains(KEY_SEPARATOR))
        {
            return Err(AnalyticsError::InvalidArgument(format!(
                "dimension value '{}' contains the key separator '{}'",
                bad, KEY_SEPARATOR
            )));
        }

        let key = join_key(dimension_values.iter().map(AsRef::as_ref));
        Ok(self.get_value_by_key(&key))
    }

    /// Same lookup as [`get_value`](Self::get_value), parsed as `f64`.
    /// A present but non-numeric value is a `Parse` error, not a miss.
    pub fn get_double_value<S: AsRef<str>>(
        &self,
        dimension_values: &[S],
    ) -> AnalyticsResult<Option<f64>> {
        match self.get_value(dimension_values)? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|source| AnalyticsError::Parse {
                    value: raw.to_string(),
                    source,
                }),
        }
    }

    /// Lookup by a key already built with [`to_key`].
    pub fn get_value_by_key(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn key_set(&self) -> FxHashSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
