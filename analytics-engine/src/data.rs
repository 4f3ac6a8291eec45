//! FILENAME: analytics-engine/src/data.rs
//! PURPOSE: The analytics result table (headers + rows + metadata).
//! CONTEXT: Filled once by whatever parses the service response, then read by
//! display/export code. Mutation is permissive: row widths are not checked when
//! rows are added. Column positions are validated lazily, by `sort_rows` and
//! the index builders, which are the places that actually dereference them.

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::header::AnalyticsHeader;
use crate::index::{AnalyticsDataIndex, ColumnIndices};
use crate::metadata::AnalyticsMetaData;
use crate::options::TableOptions;

/// One table row: a cell value per header, in header order.
pub type Row = Vec<String>;

/// Rank given to values missing from a dimension's canonical order.
const UNRANKED: usize = usize::MAX;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsData {
    headers: Vec<AnalyticsHeader>,
    meta_data: AnalyticsMetaData,
    rows: Vec<Row>,
    truncated: bool,
}

impl AnalyticsData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta_data(meta_data: AnalyticsMetaData) -> Self {
        AnalyticsData {
            meta_data,
            ..Self::default()
        }
    }

    // ========================================================================
    // POPULATION
    // ========================================================================

    /// Appends a row. Its width is not checked against the headers.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn set_headers(&mut self, headers: Vec<AnalyticsHeader>) {
        self.headers = headers;
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub fn set_meta_data(&mut self, meta_data: AnalyticsMetaData) {
        self.meta_data = meta_data;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn headers(&self) -> &[AnalyticsHeader] {
        &self.headers
    }

    pub fn header(&self, column: usize) -> Option<&AnalyticsHeader> {
        self.headers.get(column)
    }

    /// Position of the first column with the given dimension key.
    pub fn header_index(&self, dimension_key: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.dimension_key == dimension_key)
    }

    /// Positions of all dimension columns, in header order.
    pub fn dimension_column_indices(&self) -> ColumnIndices {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_dimension_column)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> AnalyticsResult<&Row> {
        self.rows.get(index).ok_or_else(|| {
            AnalyticsError::IndexOutOfRange(format!(
                "row {} requested but table has {} rows",
                index,
                self.rows.len()
            ))
        })
    }

    pub fn meta_data(&self) -> &AnalyticsMetaData {
        &self.meta_data
    }

    pub fn meta_data_mut(&mut self) -> &mut AnalyticsMetaData {
        &mut self.meta_data
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Same as `width`: headers and rows share one column count.
    pub fn header_width(&self) -> usize {
        self.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    // ========================================================================
    // RESHAPING
    // ========================================================================

    /// Keeps only the first `limit` rows. The truncated flag is set only when
    /// rows were actually dropped.
    pub fn truncate(&mut self, limit: usize) {
        let height = self.rows.len();
        if height > limit {
            self.rows.truncate(limit);
            self.truncated = true;
            info!("analytics table truncated from {} to {} rows", height, limit);
        }
    }

    /// Stable in-place sort by the canonical item order of each dimension
    /// column.
    ///
    /// Dimension columns are compared in header order. A cell ranks by its
    /// position in `meta_data.dimensions[header.dimension_key]`; values not in
    /// that list rank after every listed value, and rows that tie keep their
    /// relative order.
    ///
    /// Fails with `IndexOutOfRange`, leaving the rows untouched, if a row is
    /// too short to hold every dimension column.
    pub fn sort_rows(&mut self) -> AnalyticsResult<()> {
        let rank_maps: Vec<(usize, FxHashMap<&str, usize>)> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_dimension_column)
            .map(|(column, h)| {
                let ranks = canonical_ranks(self.meta_data.dimension_items(&h.dimension_key));
                (column, ranks)
            })
            .collect();

        let Some(&(last_column, _)) = rank_maps.last() else {
            return Ok(());
        };
        if let Some((row_index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() <= last_column)
        {
            return Err(AnalyticsError::IndexOutOfRange(format!(
                "row {} has {} cells but dimension column {} is required for sorting",
                row_index,
                row.len(),
                last_column
            )));
        }

        let row_ranks: Vec<SmallVec<[usize; 4]>> = self
            .rows
            .iter()
            .map(|row| {
                rank_maps
                    .iter()
                    .map(|(column, ranks)| {
                        ranks.get(row[*column].as_str()).copied().unwrap_or(UNRANKED)
                    })
                    .collect()
            })
            .collect();

        let mut keyed: Vec<(SmallVec<[usize; 4]>, Row)> = row_ranks
            .into_iter()
            .zip(std::mem::take(&mut self.rows))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        self.rows = keyed.into_iter().map(|(_, row)| row).collect();

        debug!("analytics table sorted: rows={}", self.rows.len());
        Ok(())
    }

    /// Applies sorting then truncation as configured.
    pub fn apply_options(&mut self, options: &TableOptions) -> AnalyticsResult<()> {
        if options.sort_rows {
            self.sort_rows()?;
        }
        if let Some(limit) = options.row_limit {
            self.truncate(limit);
        }
        Ok(())
    }

    // ========================================================================
    // INDEXING
    // ========================================================================

    /// Builds a fresh index keyed by every column left of `value_column_index`.
    pub fn get_index(&self, value_column_index: usize) -> AnalyticsResult<AnalyticsDataIndex> {
        self.check_column(value_column_index, "value column")?;
        let dimension_columns: ColumnIndices = (0..value_column_index).collect();
        AnalyticsDataIndex::build(&self.rows, &dimension_columns, value_column_index)
    }

    /// Builds a fresh index over arbitrary key columns.
    pub fn get_index_for(
        &self,
        dimension_column_indices: &[usize],
        value_column_index: usize,
    ) -> AnalyticsResult<AnalyticsDataIndex> {
        for &column in dimension_column_indices {
            self.check_column(column, "dimension column")?;
        }
        self.check_column(value_column_index, "value column")?;
        AnalyticsDataIndex::build(&self.rows, dimension_column_indices, value_column_index)
    }

    fn check_column(&self, column: usize, role: &str) -> AnalyticsResult<()> {
        if column >= self.width() {
            return Err(AnalyticsError::InvalidArgument(format!(
                "{} {} is outside table width {}",
                role,
                column,
                self.width()
            )));
        }
        Ok(())
    }
}

/// Maps each identifier to its position in the canonical order. The first
/// occurrence wins if a list repeats an identifier.
fn canonical_ranks(ids: Option<&[String]>) -> FxHashMap<&str, usize> {
    let mut ranks = FxHashMap::default();
    for (position, id) in ids.unwrap_or_default().iter().enumerate() {
        ranks.entry(id.as_str()).or_insert(position);
    }
    ranks
}
