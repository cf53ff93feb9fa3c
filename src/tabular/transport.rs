//! The fetch-like collaborator behind [`ApiClient`](super::ApiClient)
//!
//! A [`Transport`] takes a fully built request description and an endpoint,
//! and returns the status code and raw body. It reports failure only for
//! dispatch problems (network, TLS, body read). HTTP error statuses are
//! normal responses.

use super::error::Result;
use futures::future::BoxFuture;
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::sync::Arc;

/// Method, headers and serialized JSON body of one request
#[derive(Debug, Clone)]
pub struct RequestDescription {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: String,
}

/// Status and raw body returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        TransportResponse {
            status,
            body: body.into(),
        }
    }

    /// The fetch `ok` flag: status in 200..=299
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request description to an endpoint
pub trait Transport: Send + Sync {
    fn send<'a>(
        &'a self,
        endpoint: &'a str,
        request: RequestDescription,
    ) -> BoxFuture<'a, Result<TransportResponse>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send<'a>(
        &'a self,
        endpoint: &'a str,
        request: RequestDescription,
    ) -> BoxFuture<'a, Result<TransportResponse>> {
        (**self).send(endpoint, request)
    }
}

/// [`Transport`] over HTTP using a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (connection pool, proxy, TLS settings)
    pub fn with_client(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        endpoint: &'a str,
        request: RequestDescription,
    ) -> BoxFuture<'a, Result<TransportResponse>> {
        Box::pin(async move {
            let response = self
                .client
                .request(request.method, endpoint)
                .headers(request.headers)
                .body(request.body)
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;

            Ok(TransportResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(300, "").is_success());
        assert!(!TransportResponse::new(404, "").is_success());
    }
}
