//! HTTP clients for the third-party enrichment vendors.
//!
//! Three vendors feed the pipeline: traffic analytics, technology-stack
//! detection, and job listings. Each client wraps `reqwest` with typed
//! response deserialization and an API-level error check on the JSON
//! envelope. The [`normalize`] module is the parsing boundary between raw
//! vendor payloads and the clean signal lists `pf-scoring` consumes.

mod error;
mod http;
mod jobs;
mod normalize;
mod retry;
mod stack;
mod traffic;
mod types;

pub use error::VendorError;
pub use jobs::JobsClient;
pub use normalize::{normalize_job_titles, normalize_technologies};
pub use retry::retry_with_backoff;
pub use stack::StackClient;
pub use traffic::TrafficClient;
pub use types::{RawJobPosting, RawTechnology, TrafficEstimate};
