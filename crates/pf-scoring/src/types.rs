//! Signal shapes shared across the scoring core.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::classifier::{Category, JobTier, TierBreakdown};
use crate::score::SignalStrength;

/// A clean, already-normalized technology observation for one company.
///
/// Produced by the vendor normalization boundary in `pf-vendors`; the
/// detectors never see raw vendor JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTechnology {
    pub name: String,
    /// Vendor-reported category, when present (e.g. "Site Search").
    pub category: Option<String>,
    /// Which detection source reported it (e.g. "builtwith", "wappalyzer").
    pub source: String,
}

impl DetectedTechnology {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: None,
            source: String::new(),
        }
    }
}

/// A company judged similar to a target, used transiently to compute
/// displacement urgency and competitive-pressure narratives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorSnapshot {
    pub domain: String,
    pub name: String,
    pub search_provider: Option<String>,
    /// Whether this competitor already uses our own product.
    pub uses_own_product: bool,
    /// External similarity score to the owning target, 0 to 100.
    pub similarity: u8,
}

/// One classified job posting: title plus derived tier and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSignal {
    pub title: String,
    pub tier: JobTier,
    pub categories: BTreeSet<Category>,
}

/// Company-level aggregate of one hiring-data fetch. Individual postings
/// are ephemeral; only this aggregate and the capped top-N list persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringSignalSummary {
    pub total_jobs_found: usize,
    /// Jobs with an above-default tier or at least one topical category.
    pub relevant_jobs: usize,
    pub tier_breakdown: TierBreakdown,
    pub category_counts: BTreeMap<Category, i64>,
    pub top_jobs: Vec<JobSignal>,
    pub signal_score: u8,
    pub strength: SignalStrength,
}

impl HiringSignalSummary {
    /// The zero-jobs aggregate: all counts zero, score 0, strength none.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_jobs_found: 0,
            relevant_jobs: 0,
            tier_breakdown: TierBreakdown::default(),
            category_counts: BTreeMap::new(),
            top_jobs: Vec::new(),
            signal_score: 0,
            strength: SignalStrength::None,
        }
    }
}
