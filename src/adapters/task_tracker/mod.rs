//! Task tracker adapters.
//!
//! - `HttpTaskTracker` - reqwest client for the task-tracking REST API

mod http_client;

pub use http_client::{HttpTaskTracker, HttpTaskTrackerConfig};
