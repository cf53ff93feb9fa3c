//! Response interceptors
//!
//! Interceptors see every classified response before it is decoded into
//! the operation's payload type. They operate on the raw JSON payload so a
//! single interceptor applies to all five operations alike.

use super::envelope::Envelope;
use serde_json::Value;
use std::sync::Arc;

/// Pure, synchronous transform over a response envelope
///
/// An interceptor may rewrite data, turn an error into a success or the
/// other way round, change the status or message, or pass the envelope
/// through unchanged. The client does not re-validate the result.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, envelope: Envelope<Value>) -> Envelope<Value>;
}

impl<F> Interceptor for F
where
    F: Fn(Envelope<Value>) -> Envelope<Value> + Send + Sync,
{
    fn intercept(&self, envelope: Envelope<Value>) -> Envelope<Value> {
        self(envelope)
    }
}

/// Append-only, ordered list of interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interceptor after all existing ones
    pub fn push(&mut self, interceptor: impl Interceptor + 'static) {
        self.interceptors.push(Arc::new(interceptor));
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Left-to-right fold: `[f1, f2]` yields `f2(f1(envelope))`
    pub fn apply(&self, envelope: Envelope<Value>) -> Envelope<Value> {
        self.interceptors
            .iter()
            .fold(envelope, |acc, interceptor| interceptor.intercept(acc))
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}
