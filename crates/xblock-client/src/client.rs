//! Counter client trait

use crate::types::{CountResponse, IncrementRequest};
use async_trait::async_trait;

/// Client for the block's `increment_count` handler
///
/// Implementations can talk to a real LMS or emulate the handler locally.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared with
/// thunk actions running on the tokio runtime.
#[async_trait]
pub trait CounterClient: Send + Sync {
    /// Post `request` to the handler at `url`
    ///
    /// # Returns
    ///
    /// The block data after the increment, or an error if the request fails
    /// or the response does not carry a `count`.
    async fn increment_count(
        &self,
        url: &str,
        request: &IncrementRequest,
    ) -> anyhow::Result<CountResponse>;
}
