//! Typed client for a remote tabular-data service
//!
//! Every operation resolves to an [`Envelope`](tabular::Envelope): transport
//! and server failures are normalized into the error variant instead of
//! being returned as `Err`.

pub mod config;
pub mod tabular;

pub use config::{ClientConfig, Credentials};
pub use tabular::ApiClient;
