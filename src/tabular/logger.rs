use super::envelope::Envelope;
use super::interceptor::Interceptor;
use serde_json::Value;

/// Interceptor that logs every response envelope and passes it through
///
/// Successes are logged at `debug`, errors at `warn`. The `label` field is
/// attached to each event so several clients can share one subscriber.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    label: String,
}

impl RequestLogger {
    /// Create a new logger for a specific client
    pub fn new(label: impl Into<String>) -> Self {
        RequestLogger {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new("tabular")
    }
}

impl Interceptor for RequestLogger {
    fn intercept(&self, envelope: Envelope<Value>) -> Envelope<Value> {
        match &envelope {
            Envelope::Success { status_code, .. } => {
                tracing::debug!(label = %self.label, status_code, "response ok");
            }
            Envelope::Error {
                message,
                status_code,
            } => {
                tracing::warn!(label = %self.label, status_code, %message, "response error");
            }
        }
        envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_logger_passes_envelopes_through() {
        let logger = RequestLogger::new("test");
        let ok = Envelope::success(json!({ "status": "ok" }), 200);
        assert_eq!(logger.intercept(ok.clone()), ok);

        let err: Envelope<Value> = Envelope::error("nope", 418);
        assert_eq!(logger.intercept(err.clone()), err);
        assert_eq!(logger.label(), "test");
    }
}
