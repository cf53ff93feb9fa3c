//! Typed success payloads
//!
//! Row and schema data are pass-through: the client types them but never
//! interprets them. Payload fields the server leaves out take their default
//! and fields the client does not know about are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open mapping from column name to any JSON value
pub type TableRow = Map<String, Value>;

/// Payload of `Ping`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `ListTables`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchTablesResponse {
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column description as reported by the server
///
/// `notnull` and `pk` are 0/1 flags on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub cid: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub notnull: u8,
    pub dflt_value: Option<String>,
    pub pk: u8,
}

impl Column {
    pub fn is_not_null(&self) -> bool {
        self.notnull != 0
    }

    pub fn is_primary_key(&self) -> bool {
        self.pk != 0
    }
}

/// Schema metadata returned by `GetTable` when `includeInfo` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub columns: Vec<Column>,
    pub count: u64,
}

impl TableInfo {
    /// Columns flagged as primary key, in `cid` order
    pub fn primary_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key())
    }
}

/// Payload of `GetTable`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTableResponse {
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_info: Option<TableInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `DeleteRows`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowsResponse {
    #[serde(default)]
    pub rows_affected: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `UpdateRow`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRowResponse {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
