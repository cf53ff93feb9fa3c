//! Command names, request bodies and parameter payloads

use super::condition::Condition;
use super::error::{ApiError, Result};
use super::table::TableRow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Page size sent by `GetTable` when the caller does not set one
pub const DEFAULT_LIMIT: u32 = 100;

/// Offset sent by `GetTable` when the caller does not set one
pub const DEFAULT_OFFSET: u32 = 0;

/// Remote operation name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Ping,
    ListTables,
    GetTable,
    DeleteRows,
    UpdateRow,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::ListTables => "ListTables",
            Command::GetTable => "GetTable",
            Command::DeleteRows => "DeleteRows",
            Command::UpdateRow => "UpdateRow",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which revision of the wire protocol the server speaks
///
/// The current protocol names the command field `command` and the error
/// text field `message`. Older servers use `query` and `error`. A server
/// speaks exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireProtocol {
    #[default]
    Command,
    Query,
}

impl WireProtocol {
    /// Body field carrying the command name
    pub fn command_key(&self) -> &'static str {
        match self {
            WireProtocol::Command => "command",
            WireProtocol::Query => "query",
        }
    }

    /// Response field carrying the server's error text
    pub fn message_key(&self) -> &'static str {
        match self {
            WireProtocol::Command => "message",
            WireProtocol::Query => "error",
        }
    }
}

impl FromStr for WireProtocol {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "command" | "" => Ok(WireProtocol::Command),
            "query" | "legacy" => Ok(WireProtocol::Query),
            other => Err(ApiError::Config(format!(
                "Unknown wire protocol '{}', expected 'command' or 'query'",
                other
            ))),
        }
    }
}

/// Serialize `{ <command_key>: command, params? }`
///
/// `params` is omitted entirely when `None`, so parameterless commands
/// produce exactly `{"command":"Ping"}`.
pub fn request_body<P: Serialize>(
    protocol: WireProtocol,
    command: Command,
    params: Option<&P>,
) -> Result<String> {
    let mut body = Map::new();
    body.insert(
        protocol.command_key().to_string(),
        Value::String(command.as_str().to_string()),
    );
    if let Some(params) = params {
        body.insert("params".to_string(), serde_json::to_value(params)?);
    }
    Ok(serde_json::to_string(&Value::Object(body))?)
}

/// Parameters of `GetTable` as sent on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTableParams {
    pub table_name: String,
    pub include_info: bool,
    pub condition: Condition,
    pub limit: u32,
    pub offset: u32,
}

/// Caller-facing arguments of `fetch_table_data`
///
/// `limit` and `offset` stay optional here; the defaults are filled in by
/// [`into_params`](Self::into_params) before anything is sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchTableDataRequest {
    pub table_name: String,
    pub include_info: bool,
    pub condition: Condition,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl FetchTableDataRequest {
    pub fn new(table_name: impl Into<String>) -> Self {
        FetchTableDataRequest {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    pub fn include_info(mut self, include_info: bool) -> Self {
        self.include_info = include_info;
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn into_params(self) -> GetTableParams {
        GetTableParams {
            table_name: self.table_name,
            include_info: self.include_info,
            condition: self.condition,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(DEFAULT_OFFSET),
        }
    }
}

/// Parameters of `DeleteRows`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowsParams {
    pub table_name: String,
    pub ids: Vec<String>,
}

/// Parameters of `UpdateRow`; `row` may hold only the changed columns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRowParams {
    pub table_name: String,
    pub row: TableRow,
}
