//! Client for the remote tabular-data command API
//!
//! Structure:
//! - `condition.rs`: Filter/Condition tree sent with `GetTable`
//! - `envelope.rs`: Success/error result wrapper
//! - `interceptor.rs`: Response interceptor chain
//! - `logger.rs`: Logging interceptor
//! - `command.rs`: Command names, protocol revisions, request parameters
//! - `table.rs`: Typed response payloads
//! - `transport.rs`: HTTP transport
//! - `client.rs`: The client and its shared request primitive
//! - `error.rs`: Error types

pub mod client;
pub mod command;
pub mod condition;
pub mod envelope;
pub mod error;
pub mod interceptor;
pub mod logger;
pub mod table;
pub mod transport;

// Re-exports for convenience
pub use client::ApiClient;
pub use command::{Command, FetchTableDataRequest, WireProtocol, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use condition::{Case, Condition, Filter, LogicalOperator, Operator, EMPTY_CONDITION};
pub use envelope::{Envelope, UNEXPECTED_ERROR_MESSAGE, UNEXPECTED_ERROR_STATUS};
pub use error::{ApiError, Result};
pub use interceptor::{Interceptor, InterceptorChain};
pub use logger::RequestLogger;
pub use table::{
    Column, DeleteRowsResponse, FetchTableResponse, FetchTablesResponse, PingResponse, TableInfo,
    TableRow, UpdateRowResponse,
};
pub use transport::{HttpTransport, RequestDescription, Transport, TransportResponse};
