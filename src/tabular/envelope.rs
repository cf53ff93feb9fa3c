//! Uniform result wrapper returned by every client operation
//!
//! On the wire an envelope is either
//! `{ "ok": true, "data": ..., "statusCode": 200 }` or
//! `{ "ok": false, "message": "...", "statusCode": 404 }`.
//! As a Rust enum the two shapes are separate variants, so an envelope can
//! never carry both `data` and `message`, nor neither.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Message used when a request fails below the application level
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Status code paired with [`UNEXPECTED_ERROR_MESSAGE`]
pub const UNEXPECTED_ERROR_STATUS: u16 = 500;

/// Discriminated success/error result
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success { data: T, status_code: u16 },
    Error { message: String, status_code: u16 },
}

impl<T> Envelope<T> {
    /// Wrap a successful payload
    pub fn success(data: T, status_code: u16) -> Self {
        Envelope::Success { data, status_code }
    }

    /// Wrap a failure message
    pub fn error(message: impl Into<String>, status_code: u16) -> Self {
        Envelope::Error {
            message: message.into(),
            status_code,
        }
    }

    /// The fixed error returned when dispatch or decoding fails
    pub fn unexpected() -> Self {
        Self::error(UNEXPECTED_ERROR_MESSAGE, UNEXPECTED_ERROR_STATUS)
    }

    /// The `ok` discriminant
    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Envelope::Success { status_code, .. } | Envelope::Error { status_code, .. } => {
                *status_code
            }
        }
    }

    /// Payload, present only on success
    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success { data, .. } => Some(data),
            Envelope::Error { .. } => None,
        }
    }

    /// Error message, present only on failure
    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Error { message, .. } => Some(message),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Envelope::Success { data, .. } => Some(data),
            Envelope::Error { .. } => None,
        }
    }

    /// Convert into a `Result`, keeping the status code on both sides
    pub fn into_result(self) -> std::result::Result<(T, u16), (String, u16)> {
        match self {
            Envelope::Success { data, status_code } => Ok((data, status_code)),
            Envelope::Error {
                message,
                status_code,
            } => Err((message, status_code)),
        }
    }

    /// Transform the success payload, leaving errors untouched
    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Envelope::Success { data, status_code } => Envelope::Success {
                data: f(data),
                status_code,
            },
            Envelope::Error {
                message,
                status_code,
            } => Envelope::Error {
                message,
                status_code,
            },
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Envelope", 3)?;
        match self {
            Envelope::Success { data, status_code } => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("data", data)?;
                state.serialize_field("statusCode", status_code)?;
            }
            Envelope::Error {
                message,
                status_code,
            } => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("message", message)?;
                state.serialize_field("statusCode", status_code)?;
            }
        }
        state.end()
    }
}

/// Wire shape before the discriminant is checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    ok: bool,
    #[serde(default)]
    data: Option<Value>,
    // Older servers named this field `error`
    #[serde(default, alias = "error")]
    message: Option<String>,
    status_code: u16,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawEnvelope::deserialize(deserializer)?;
        match (raw.ok, raw.message) {
            (true, None) => {
                let data = serde_json::from_value(raw.data.unwrap_or(Value::Null))
                    .map_err(D::Error::custom)?;
                Ok(Envelope::success(data, raw.status_code))
            }
            (false, Some(message)) if raw.data.is_none() => {
                Ok(Envelope::error(message, raw.status_code))
            }
            (true, Some(_)) => Err(D::Error::custom(
                "envelope with ok=true must not carry a message",
            )),
            (false, _) => Err(D::Error::custom(
                "envelope with ok=false must carry a message and no data",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discriminant_matches_payload() {
        let ok = Envelope::success(json!({ "status": "pong" }), 200);
        assert!(ok.is_ok());
        assert!(ok.data().is_some());
        assert!(ok.message().is_none());

        let err: Envelope<Value> = Envelope::error("boom", 400);
        assert!(err.is_err());
        assert!(err.data().is_none());
        assert_eq!(err.message(), Some("boom"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_wire_shape() {
        let ok = Envelope::success(json!({ "tables": ["a"] }), 200);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "ok": true, "data": { "tables": ["a"] }, "statusCode": 200 })
        );

        let err: Envelope<Value> = Envelope::unexpected();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "ok": false, "message": "An unexpected error occurred", "statusCode": 500 })
        );
    }

    #[test]
    fn test_deserialize_accepts_legacy_error_field() {
        let env: Envelope<Value> =
            serde_json::from_value(json!({ "ok": false, "error": "denied", "statusCode": 401 }))
                .unwrap();
        assert_eq!(env, Envelope::error("denied", 401));
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_envelopes() {
        let both = json!({ "ok": true, "data": 1, "message": "x", "statusCode": 200 });
        assert!(serde_json::from_value::<Envelope<Value>>(both).is_err());

        let neither = json!({ "ok": false, "statusCode": 500 });
        assert!(serde_json::from_value::<Envelope<Value>>(neither).is_err());

        let err_with_data = json!({ "ok": false, "data": 1, "message": "x", "statusCode": 500 });
        assert!(serde_json::from_value::<Envelope<Value>>(err_with_data).is_err());
    }

    #[test]
    fn test_map_keeps_status_and_errors() {
        let ok = Envelope::success(2, 201).map(|n| n * 10);
        assert_eq!(ok, Envelope::success(20, 201));

        let err: Envelope<i32> = Envelope::error("nope", 404);
        assert_eq!(err.map(|n| n * 10), Envelope::error("nope", 404));
    }
}
