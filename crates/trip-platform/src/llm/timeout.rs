//! Deadline for model calls.

use async_trait::async_trait;
use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;

use trip_core::ports::{ChatRequest, ChatResponse, LlmPort};
use trip_types::{Result, TripError};

/// Wraps a model port and fails with [`TripError::Timeout`] when a call
/// outlives `timeout_ms`. The abandoned request is dropped.
pub struct TimeoutLlm<P> {
    inner: P,
    timeout_ms: u64,
}

impl<P: LlmPort> TimeoutLlm<P> {
    pub fn new(inner: P, timeout_ms: u64) -> Self {
        Self { inner, timeout_ms }
    }
}

#[async_trait(?Send)]
impl<P: LlmPort> LlmPort for TimeoutLlm<P> {
    async fn complete(&self, req: ChatRequest) -> Result<ChatResponse> {
        let millis = u32::try_from(self.timeout_ms).unwrap_or(u32::MAX);
        let call = self.inner.complete(req);
        match select(call, TimeoutFuture::new(millis)).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                log::warn!("Model call timed out after {}ms", self.timeout_ms);
                Err(TripError::Timeout(self.timeout_ms))
            }
        }
    }
}
