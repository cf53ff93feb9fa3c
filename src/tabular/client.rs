use super::command::{
    request_body, Command, DeleteRowsParams, FetchTableDataRequest, UpdateRowParams,
    WireProtocol,
};
use super::envelope::Envelope;
use super::error::Result;
use super::interceptor::{Interceptor, InterceptorChain};
use super::table::{
    DeleteRowsResponse, FetchTableResponse, FetchTablesResponse, PingResponse, TableRow,
    UpdateRowResponse,
};
use super::transport::{HttpTransport, RequestDescription, Transport, TransportResponse};
use crate::config::{ClientConfig, Credentials};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

/// Main client for the tabular-data command API
///
/// Every operation resolves to an [`Envelope`]; nothing is returned as
/// `Err` and nothing panics on network or server failure.
pub struct ApiClient {
    credentials: Credentials,
    protocol: WireProtocol,
    transport: Arc<dyn Transport>,
    interceptors: InterceptorChain,
}

impl ApiClient {
    /// Create a client that talks HTTP to `credentials.endpoint`
    pub fn new(credentials: Credentials) -> Self {
        Self::with_transport(credentials, HttpTransport::new())
    }

    /// Create a client over a custom transport
    pub fn with_transport(credentials: Credentials, transport: impl Transport + 'static) -> Self {
        ApiClient {
            credentials,
            protocol: WireProtocol::default(),
            transport: Arc::new(transport),
            interceptors: InterceptorChain::new(),
        }
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(config.credentials).with_protocol(config.protocol)
    }

    /// Create a client from environment variables
    ///
    /// Required environment variables:
    /// - `TABULAR_ENDPOINT`: The service URL (e.g., http://localhost:8080/api)
    /// - `TABULAR_USERNAME`, `TABULAR_PASSWORD`: Credentials
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Select the wire protocol revision the server speaks
    pub fn with_protocol(mut self, protocol: WireProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn protocol(&self) -> WireProtocol {
        self.protocol
    }

    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    /// Register a response interceptor after all existing ones
    ///
    /// Returns the same client so registrations can be chained.
    pub fn add_interceptor(&mut self, interceptor: impl Interceptor + 'static) -> &mut Self {
        self.interceptors.push(interceptor);
        self
    }

    pub async fn ping(&self) -> Envelope<PingResponse> {
        self.request::<(), _>(Command::Ping, None, HeaderMap::new())
            .await
    }

    pub async fn fetch_tables(&self) -> Envelope<FetchTablesResponse> {
        self.request::<(), _>(Command::ListTables, None, HeaderMap::new())
            .await
    }

    /// Fetch rows of one table
    ///
    /// `limit` and `offset` default to 100 and 0 when unset. `tableInfo`
    /// is only present in the payload when `include_info` was set.
    pub async fn fetch_table_data(
        &self,
        request: FetchTableDataRequest,
    ) -> Envelope<FetchTableResponse> {
        let params = request.into_params();
        self.request(Command::GetTable, Some(&params), HeaderMap::new())
            .await
    }

    pub async fn delete_rows<I, S>(
        &self,
        table_name: impl Into<String>,
        ids: I,
    ) -> Envelope<DeleteRowsResponse>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = DeleteRowsParams {
            table_name: table_name.into(),
            ids: ids.into_iter().map(Into::into).collect(),
        };
        self.request(Command::DeleteRows, Some(&params), HeaderMap::new())
            .await
    }

    /// Update one row; `row` only needs the changed columns plus whatever
    /// the server uses to identify the row
    pub async fn update_row(
        &self,
        table_name: impl Into<String>,
        row: TableRow,
    ) -> Envelope<UpdateRowResponse> {
        let params = UpdateRowParams {
            table_name: table_name.into(),
            row,
        };
        self.request(Command::UpdateRow, Some(&params), HeaderMap::new())
            .await
    }

    /// Shared request primitive behind every operation
    ///
    /// Sends `command` with optional `params`, classifies the response,
    /// runs the interceptor chain and decodes the payload into `T`.
    /// `headers` are merged under the mandatory `Authorization` and
    /// `Content-Type` headers, which always win.
    pub async fn request<P, T>(
        &self,
        command: Command,
        params: Option<&P>,
        headers: HeaderMap,
    ) -> Envelope<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let span = tracing::debug_span!(
            "tabular_request",
            request_id = %uuid::Uuid::new_v4(),
            %command
        );

        async move {
            let classified = match self.dispatch(command, params, headers).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    tracing::error!(error = %e, "request failed before a response was classified");
                    Envelope::unexpected()
                }
            };

            decode(self.interceptors.apply(classified))
        }
        .instrument(span)
        .await
    }

    /// Build the request description for `command` without sending it
    pub fn build_request<P: Serialize>(
        &self,
        command: Command,
        params: Option<&P>,
        headers: HeaderMap,
    ) -> Result<RequestDescription> {
        let body = request_body(self.protocol, command, params)?;

        let mut headers = headers;
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.credentials.authorization())?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(RequestDescription {
            method: Method::POST,
            headers,
            body,
        })
    }

    async fn dispatch<P: Serialize>(
        &self,
        command: Command,
        params: Option<&P>,
        headers: HeaderMap,
    ) -> Result<Envelope<Value>> {
        let request = self.build_request(command, params, headers)?;

        tracing::debug!(endpoint = %self.credentials.endpoint, "dispatching");
        let response = self
            .transport
            .send(&self.credentials.endpoint, request)
            .await?;
        tracing::debug!(status = response.status, "response received");

        self.classify(response)
    }

    /// Turn a raw transport response into a success or error envelope
    ///
    /// The body is parsed as JSON whatever the status, since error
    /// responses may carry a structured message. A body that is not JSON,
    /// including an empty one, is a parse failure.
    fn classify(&self, response: TransportResponse) -> Result<Envelope<Value>> {
        let body: Value = serde_json::from_str(&response.body)?;

        if response.is_success() {
            return Ok(Envelope::success(body, response.status));
        }

        let message = body
            .get(self.protocol.message_key())
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(Envelope::error(message, response.status))
    }
}

/// Decode the intercepted payload into the operation's type
fn decode<T: DeserializeOwned>(envelope: Envelope<Value>) -> Envelope<T> {
    match envelope {
        Envelope::Success { data, status_code } => match serde_json::from_value(data) {
            Ok(data) => Envelope::success(data, status_code),
            Err(e) => {
                tracing::warn!(error = %e, status_code, "response payload did not match the expected shape");
                Envelope::unexpected()
            }
        },
        Envelope::Error {
            message,
            status_code,
        } => Envelope::error(message, status_code),
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("credentials", &self.credentials)
            .field("protocol", &self.protocol)
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}
