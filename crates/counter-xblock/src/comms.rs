//! Requests made to the block's backend

use crate::thunk::MakeUrl;
use crate::uris;
use anyhow::Context;
use xblock_client::{CounterClient, CountResponse, IncrementRequest};

/// POST the increment request to the block's `increment_count` handler
pub async fn update_count(
    client: &dyn CounterClient,
    make_url: &MakeUrl,
) -> anyhow::Result<CountResponse> {
    let url = make_url(uris::counter::INCREMENT);
    client
        .increment_count(&url, &IncrementRequest::default())
        .await
        .with_context(|| format!("Failed to increment count at {}", url))
}
