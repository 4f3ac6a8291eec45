//! FILENAME: analytics-engine/src/header.rs
//! Column descriptors for an analytics result table.

use serde::{Deserialize, Serialize};

/// Reserved key of the data dimension (indicators, data elements).
pub const DATA_DIMENSION: &str = "dx";

/// Reserved key of the period dimension.
pub const PERIOD_DIMENSION: &str = "pe";

/// Reserved key of the organisation unit dimension.
pub const ORG_UNIT_DIMENSION: &str = "ou";

/// Conventional key of the measurement column.
pub const VALUE_COLUMN: &str = "value";

// ============================================================================
// VALUE TYPE
// ============================================================================

/// Declared type of the values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Text,
    LongText,
    Letter,
    Number,
    Integer,
    IntegerPositive,
    IntegerNegative,
    IntegerZeroOrPositive,
    Percentage,
    UnitInterval,
    Boolean,
    TrueOnly,
    Date,
    Datetime,
    Time,
    Coordinate,
    OrganisationUnit,
    /// Any type this crate does not model (`AGE`, `EMAIL`, `FILE_RESOURCE`...).
    #[serde(other)]
    Unknown,
}

impl Default for ValueType {
    fn default() -> Self {
        ValueType::Text
    }
}

impl ValueType {
    /// Whether cells of this type are expected to parse as numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Number
                | ValueType::Integer
                | ValueType::IntegerPositive
                | ValueType::IntegerNegative
                | ValueType::IntegerZeroOrPositive
                | ValueType::Percentage
                | ValueType::UnitInterval
        )
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Describes one column of an `AnalyticsData` table.
///
/// A dimension column identifies the coordinate of a row (data item, period,
/// org unit, ...); any other column holds a measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsHeader {
    /// Logical dimension key, e.g. `dx` or `value`.
    #[serde(rename = "name")]
    pub dimension_key: String,

    /// Display name of the column.
    #[serde(rename = "column", default)]
    pub column_label: String,

    #[serde(rename = "valueType", default)]
    pub value_type: ValueType,

    /// True when the column identifies a cell rather than holding a value.
    #[serde(rename = "meta", default)]
    pub is_dimension_column: bool,

    #[serde(default)]
    pub hidden: bool,
}

impl AnalyticsHeader {
    /// A text dimension column.
    pub fn dimension(dimension_key: impl Into<String>, column_label: impl Into<String>) -> Self {
        AnalyticsHeader {
            dimension_key: dimension_key.into(),
            column_label: column_label.into(),
            value_type: ValueType::Text,
            is_dimension_column: true,
            hidden: false,
        }
    }

    /// A measurement column.
    pub fn value(
        dimension_key: impl Into<String>,
        column_label: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        AnalyticsHeader {
            dimension_key: dimension_key.into(),
            column_label: column_label.into(),
            value_type,
            is_dimension_column: false,
            hidden: false,
        }
    }
}
