//! Client for the counter XBlock's JSON handlers
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │        CounterClient trait       │
//! │  - increment_count()             │
//! └──────────────────────────────────┘
//!                  │
//!        ┌─────────┴──────────┐
//!        ▼                    ▼
//! ┌────────────────┐  ┌──────────────────┐
//! │ HttpClient     │  │ WorkbenchCounter │
//! │ (LMS handler)  │  │ (in memory)      │
//! └────────────────┘  └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use xblock_client::{CounterClient, HttpClient, IncrementRequest};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpClient::new(Some("csrf-token".to_string()));
//! let response = client
//!     .increment_count("http://localhost:8000/handler/block/increment_count/", &IncrementRequest::default())
//!     .await?;
//! println!("count is now {}", response.count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod http_client;
pub mod types;
pub mod workbench;

pub use client::CounterClient;
pub use http_client::HttpClient;
pub use types::{CountResponse, IncrementRequest};
pub use workbench::WorkbenchCounter;
