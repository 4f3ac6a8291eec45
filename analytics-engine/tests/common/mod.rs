//! FILENAME: tests/common/mod.rs
//! Fixtures for analytics-engine integration tests.

#![allow(dead_code)]

use analytics_engine::AnalyticsData;

/// A response as returned by the aggregation service: two indicators over
/// three quarters and two org units. Period ids are requested newest first,
/// so canonical order differs from lexical order. Rows arrive unordered and
/// one combination (IND_B, 2024Q1, OU_2) is missing.
pub const RESPONSE_JSON: &str = r#"{
  "headers": [
    { "name": "dx", "column": "Data", "valueType": "TEXT", "type": "java.lang.String", "hidden": false, "meta": true },
    { "name": "pe", "column": "Period", "valueType": "TEXT", "type": "java.lang.String", "hidden": false, "meta": true },
    { "name": "ou", "column": "Organisation unit", "valueType": "TEXT", "type": "java.lang.String", "hidden": false, "meta": true },
    { "name": "value", "column": "Value", "valueType": "NUMBER", "type": "java.lang.Double", "hidden": false, "meta": false }
  ],
  "metaData": {
    "items": {
      "IND_A": { "name": "ANC 1st visit", "code": "ANC1" },
      "IND_B": { "name": "ANC 4th visit" },
      "2024Q3": { "name": "July - September 2024" },
      "2024Q2": { "name": "April - June 2024" },
      "2024Q1": { "name": "January - March 2024" },
      "OU_2": { "name": "Bo" },
      "OU_1": { "name": "Bombali" }
    },
    "dimensions": {
      "dx": ["IND_A", "IND_B"],
      "pe": ["2024Q3", "2024Q2", "2024Q1"],
      "ou": ["OU_2", "OU_1"]
    }
  },
  "rows": [
    ["IND_B", "2024Q1", "OU_1", "7"],
    ["IND_A", "2024Q1", "OU_2", "12.5"],
    ["IND_A", "2024Q3", "OU_1", "31"],
    ["IND_B", "2024Q3", "OU_2", "4"],
    ["IND_A", "2024Q2", "OU_2", "18"],
    ["IND_B", "2024Q2", "OU_1", "9"],
    ["IND_A", "2024Q3", "OU_2", "40"],
    ["IND_A", "2024Q1", "OU_1", "11"],
    ["IND_B", "2024Q2", "OU_2", "3"],
    ["IND_A", "2024Q2", "OU_1", "22"],
    ["IND_B", "2024Q3", "OU_1", "8"]
  ],
  "height": 11,
  "width": 4,
  "headerWidth": 4
}"#;

pub fn load_response() -> AnalyticsData {
    serde_json::from_str(RESPONSE_JSON).expect("fixture response should deserialize")
}

/// `(dx, pe, ou)` of every row, in current order.
pub fn coordinates(data: &AnalyticsData) -> Vec<(String, String, String)> {
    data.rows()
        .iter()
        .map(|r| (r[0].clone(), r[1].clone(), r[2].clone()))
        .collect()
}
