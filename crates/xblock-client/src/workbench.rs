//! In-memory stand-in for the block's `increment_count` handler
//!
//! Behaves like the server side of the block: the body must say
//! `hello: world`, and every call increments the stored count.

use crate::client::CounterClient;
use crate::types::{CountResponse, IncrementRequest};
use anyhow::ensure;
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Default)]
pub struct WorkbenchCounter {
    count: AtomicI64,
}

impl WorkbenchCounter {
    pub fn new(count: i64) -> Self {
        Self {
            count: AtomicI64::new(count),
        }
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterClient for WorkbenchCounter {
    async fn increment_count(
        &self,
        url: &str,
        request: &IncrementRequest,
    ) -> anyhow::Result<CountResponse> {
        ensure!(
            request.hello == "world",
            "unexpected request body for {}: hello = {:?}",
            url,
            request.hello
        );
        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Workbench handler {} incremented count to {}", url, count);
        Ok(CountResponse { count })
    }
}
