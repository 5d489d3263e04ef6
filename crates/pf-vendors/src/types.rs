//! Typed vendor response payloads.
//!
//! These mirror what the vendors actually send, optional fields and all.
//! Nothing outside this crate consumes them directly; [`crate::normalize`]
//! turns them into the clean shapes the scoring core takes.

use serde::{Deserialize, Serialize};

/// Envelope shared by all three vendor APIs.
#[derive(Debug, Deserialize)]
pub(crate) struct VendorEnvelope<T> {
    #[allow(dead_code)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

/// Monthly traffic estimate for a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficEstimate {
    #[serde(default)]
    pub monthly_visits: i64,
    #[serde(default)]
    pub pages_per_visit: f64,
    #[serde(default)]
    pub bounce_rate: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrafficBody {
    pub traffic: TrafficEstimate,
}

/// One technology detection as the stack vendor reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTechnology {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub first_detected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StackBody {
    #[serde(default)]
    pub technologies: Vec<RawTechnology>,
}

/// One job posting as the hiring vendor reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawJobPosting {
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsBody {
    #[serde(default)]
    pub jobs: Vec<RawJobPosting>,
}
