//! Wire types for the lookup/execute contract and the normalized result shapes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two families of named server-side operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Analytics,
    Action,
}

impl OperationKind {
    /// URL path segment used by the backend routes.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Action => "actions",
        }
    }

    /// Human label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of a successful `by-name` lookup. Only `key` matters; everything else
/// in the metadata record is ignored.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub key: Option<String>,
}

/// Error body shape shared by both endpoints on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Execute request body: the caller's parameter bag, passed through unchanged.
#[derive(Debug, Serialize)]
pub struct ExecuteRequest<'a> {
    pub parameters: &'a HashMap<String, Value>,
}

/// Raw execute response. Analytics and action executions share this envelope;
/// missing fields are tolerated (the backend omits what does not apply).
#[derive(Debug, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default, rename = "rowCount")]
    pub row_count: Option<u64>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default, rename = "icebergPath")]
    pub iceberg_path: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Normalized analytics result.
///
/// `iceberg_table` is selected when the backend reports the `spark` engine and
/// supplies a storage path; everything else is a plain `dataframe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnalyticsData {
    #[serde(rename = "iceberg_table", rename_all = "camelCase")]
    IcebergTable {
        rows: Vec<Value>,
        row_count: Option<u64>,
        storage_path: String,
    },
    #[serde(rename = "dataframe", rename_all = "camelCase")]
    DataFrame {
        rows: Vec<Value>,
        row_count: Option<u64>,
    },
}

impl AnalyticsData {
    /// Shape selection from the raw execute envelope. Missing `data` becomes
    /// an empty row set; a missing row count stays absent.
    pub fn from_response(raw: ExecuteResponse) -> Self {
        let rows = raw.data.unwrap_or_default();
        match raw.iceberg_path {
            Some(path) if raw.engine.as_deref() == Some("spark") => Self::IcebergTable {
                rows,
                row_count: raw.row_count,
                storage_path: path,
            },
            _ => Self::DataFrame {
                rows,
                row_count: raw.row_count,
            },
        }
    }

    pub fn rows(&self) -> &[Value] {
        match self {
            Self::IcebergTable { rows, .. } | Self::DataFrame { rows, .. } => rows,
        }
    }

    pub fn row_count(&self) -> Option<u64> {
        match self {
            Self::IcebergTable { row_count, .. } | Self::DataFrame { row_count, .. } => *row_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> ExecuteResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn spark_with_storage_path_selects_iceberg_table() {
        let raw = response(json!({
            "success": true,
            "data": [{"x": 1}],
            "rowCount": 1,
            "engine": "spark",
            "icebergPath": "s3://p"
        }));
        let data = AnalyticsData::from_response(raw);
        assert_eq!(
            data,
            AnalyticsData::IcebergTable {
                rows: vec![json!({"x": 1})],
                row_count: Some(1),
                storage_path: "s3://p".into(),
            }
        );
    }

    #[test]
    fn spark_without_storage_path_falls_back_to_dataframe() {
        let raw = response(json!({
            "success": true,
            "data": [{"x": 1}],
            "rowCount": 1,
            "engine": "spark"
        }));
        assert_eq!(
            AnalyticsData::from_response(raw),
            AnalyticsData::DataFrame {
                rows: vec![json!({"x": 1})],
                row_count: Some(1),
            }
        );
    }

    #[test]
    fn storage_path_without_spark_engine_falls_back_to_dataframe() {
        let raw = response(json!({
            "success": true,
            "data": [],
            "engine": "duckdb",
            "icebergPath": "s3://p"
        }));
        assert!(matches!(
            AnalyticsData::from_response(raw),
            AnalyticsData::DataFrame { .. }
        ));
    }

    #[test]
    fn missing_data_defaults_to_empty_rows() {
        let data = AnalyticsData::from_response(response(json!({"success": true})));
        assert!(data.rows().is_empty());
        assert_eq!(data.row_count(), None);
    }

    #[test]
    fn serialized_shape_uses_wire_field_names() {
        let data = AnalyticsData::IcebergTable {
            rows: vec![json!({"x": 1})],
            row_count: Some(1),
            storage_path: "s3://p".into(),
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "type": "iceberg_table",
                "rows": [{"x": 1}],
                "rowCount": 1,
                "storagePath": "s3://p"
            })
        );

        let frame = AnalyticsData::DataFrame {
            rows: vec![],
            row_count: None,
        };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({"type": "dataframe", "rows": [], "rowCount": null})
        );
    }

    #[test]
    fn operation_kind_segments_and_labels() {
        assert_eq!(OperationKind::Analytics.path_segment(), "analytics");
        assert_eq!(OperationKind::Action.path_segment(), "actions");
        assert_eq!(OperationKind::Analytics.to_string(), "analytics");
        assert_eq!(OperationKind::Action.to_string(), "action");
    }
}
