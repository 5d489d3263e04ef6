//! Raw row to canonical scored-entity transforms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::{classify_categories, classify_tier, JobTier, TierBreakdown};
use crate::rules::ScoringRules;
use crate::score::{hiring_signal_score, lead_status, signal_strength, LeadStatus};
use crate::types::{HiringSignalSummary, JobSignal};

/// A heterogeneous raw row as it comes back from the data store or a
/// vendor merge. Every field is optional; the transform substitutes safe
/// defaults for all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTargetRow {
    pub domain: Option<String>,
    pub company_name: Option<String>,
    pub hq_city: Option<String>,
    pub hq_state: Option<String>,
    pub hq_country: Option<String>,
    pub vertical: Option<String>,
    pub employee_count: Option<i64>,
    pub founded_year: Option<i32>,
    pub is_public: Option<bool>,
    pub ticker: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub search_provider: Option<String>,
    pub monthly_traffic: Option<i64>,
    pub revenue_estimate: Option<i64>,
    pub icp_score: Option<i64>,
    pub signal_score: Option<i64>,
    pub priority_score: Option<i64>,
}

/// The canonical scored-entity shape consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCompany {
    pub domain: String,
    pub company_name: String,
    pub hq_city: String,
    pub hq_state: String,
    pub hq_country: String,
    pub vertical: String,
    pub employee_count: i64,
    pub founded_year: Option<i32>,
    pub is_public: bool,
    pub ticker: Option<String>,
    pub technologies: Vec<String>,
    pub search_provider: Option<String>,
    pub monthly_traffic: i64,
    pub revenue_estimate: i64,
    pub icp_score: u8,
    pub signal_score: u8,
    pub priority_score: u8,
    pub status: LeadStatus,
}

/// Maps a raw row into the canonical [`TargetCompany`].
///
/// Total over any well-typed row: missing strings become empty, missing
/// numerics become 0, and out-of-range scores are clamped. `status` is
/// derived from the ICP score; when no independent signal score is stored,
/// `signal_score` falls back to the configured proportion of the ICP score.
#[must_use]
pub fn transform_target(rules: &ScoringRules, raw: RawTargetRow) -> TargetCompany {
    let icp = raw.icp_score.unwrap_or(0).clamp(0, 100);
    let signal_score = match raw.signal_score {
        Some(s) => s.clamp(0, 100),
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        None => (icp as f64 * rules.signal_score_ratio).round() as i64,
    };

    TargetCompany {
        domain: raw.domain.unwrap_or_default(),
        company_name: raw.company_name.unwrap_or_default(),
        hq_city: raw.hq_city.unwrap_or_default(),
        hq_state: raw.hq_state.unwrap_or_default(),
        hq_country: raw.hq_country.unwrap_or_default(),
        vertical: raw.vertical.unwrap_or_default(),
        employee_count: raw.employee_count.unwrap_or(0).max(0),
        founded_year: raw.founded_year,
        is_public: raw.is_public.unwrap_or(false),
        ticker: raw.ticker.filter(|t| !t.is_empty()),
        technologies: raw.technologies.unwrap_or_default(),
        search_provider: raw.search_provider.filter(|p| !p.is_empty()),
        monthly_traffic: raw.monthly_traffic.unwrap_or(0).max(0),
        revenue_estimate: raw.revenue_estimate.unwrap_or(0).max(0),
        icp_score: u8::try_from(icp).unwrap_or(100),
        signal_score: u8::try_from(signal_score.clamp(0, 100)).unwrap_or(100),
        priority_score: u8::try_from(raw.priority_score.unwrap_or(0).clamp(0, 100)).unwrap_or(100),
        status: lead_status(rules, icp),
    }
}

/// Classifies and aggregates one fetch's worth of job titles into the
/// company-level hiring summary.
///
/// Relevant jobs are those with an above-default tier or at least one
/// topical category. The persisted top-N list keeps relevant jobs ordered
/// by tier (stable within a tier), capped at `rules.top_jobs_cap`.
/// An empty title list produces the all-zero summary with strength none.
#[must_use]
pub fn summarize_hiring(rules: &ScoringRules, titles: &[String]) -> HiringSignalSummary {
    if titles.is_empty() {
        return HiringSignalSummary::empty();
    }

    let mut breakdown = TierBreakdown::default();
    let mut category_counts: BTreeMap<_, i64> = BTreeMap::new();
    let mut relevant: Vec<JobSignal> = Vec::new();

    for title in titles {
        let tier = classify_tier(rules, title);
        let categories = classify_categories(rules, title);
        breakdown.record(tier);
        for &c in &categories {
            *category_counts.entry(c).or_default() += 1;
        }
        if tier != JobTier::Tier3 || !categories.is_empty() {
            relevant.push(JobSignal {
                title: title.clone(),
                tier,
                categories,
            });
        }
    }

    let relevant_jobs = relevant.len();
    relevant.sort_by_key(|j| j.tier.rank());
    relevant.truncate(rules.top_jobs_cap);

    let signal_score = hiring_signal_score(rules, &breakdown, &category_counts);
    HiringSignalSummary {
        total_jobs_found: titles.len(),
        relevant_jobs,
        tier_breakdown: breakdown,
        category_counts,
        top_jobs: relevant,
        signal_score,
        strength: signal_strength(rules, signal_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::score::SignalStrength;

    fn rules() -> ScoringRules {
        ScoringRules::standard()
    }

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn transform_is_total_over_the_empty_row() {
        let t = transform_target(&rules(), RawTargetRow::default());
        assert_eq!(t.domain, "");
        assert_eq!(t.employee_count, 0);
        assert_eq!(t.icp_score, 0);
        assert_eq!(t.signal_score, 0);
        assert_eq!(t.status, LeadStatus::Cold);
        assert!(t.technologies.is_empty());
    }

    #[test]
    fn transform_derives_status_from_icp() {
        let r = rules();
        let row = |icp: i64| RawTargetRow {
            icp_score: Some(icp),
            ..RawTargetRow::default()
        };
        assert_eq!(transform_target(&r, row(80)).status, LeadStatus::Hot);
        assert_eq!(transform_target(&r, row(79)).status, LeadStatus::Warm);
        assert_eq!(transform_target(&r, row(40)).status, LeadStatus::Cool);
        assert_eq!(transform_target(&r, row(39)).status, LeadStatus::Cold);
    }

    #[test]
    fn transform_falls_back_to_proportional_signal_score() {
        let t = transform_target(
            &rules(),
            RawTargetRow {
                icp_score: Some(80),
                ..RawTargetRow::default()
            },
        );
        assert_eq!(t.signal_score, 64);
    }

    #[test]
    fn transform_prefers_stored_signal_score() {
        let t = transform_target(
            &rules(),
            RawTargetRow {
                icp_score: Some(80),
                signal_score: Some(33),
                ..RawTargetRow::default()
            },
        );
        assert_eq!(t.signal_score, 33);
    }

    #[test]
    fn transform_clamps_out_of_range_scores() {
        let t = transform_target(
            &rules(),
            RawTargetRow {
                icp_score: Some(900),
                signal_score: Some(-3),
                priority_score: Some(101),
                employee_count: Some(-40),
                ..RawTargetRow::default()
            },
        );
        assert_eq!(t.icp_score, 100);
        assert_eq!(t.signal_score, 0);
        assert_eq!(t.priority_score, 100);
        assert_eq!(t.employee_count, 0);
    }

    #[test]
    fn transform_deserializes_sparse_json() {
        let raw: RawTargetRow =
            serde_json::from_str(r#"{"domain":"shop.example","icp_score":62}"#)
                .expect("sparse row should deserialize");
        let t = transform_target(&rules(), raw);
        assert_eq!(t.domain, "shop.example");
        assert_eq!(t.status, LeadStatus::Warm);
    }

    #[test]
    fn scenario_one_end_to_end() {
        let r = rules();
        let summary = summarize_hiring(&r, &titles(&["VP of Search", "Product Manager, Search"]));
        assert_eq!(summary.total_jobs_found, 2);
        assert_eq!(summary.relevant_jobs, 2);
        assert_eq!(summary.tier_breakdown.tier1, 1);
        assert_eq!(summary.tier_breakdown.tier2, 1);
        assert_eq!(summary.category_counts.get(&Category::Search), Some(&2));
        assert_eq!(summary.signal_score, 70);
        assert_eq!(summary.strength, SignalStrength::Strong);
    }

    #[test]
    fn scenario_two_zero_jobs() {
        let summary = summarize_hiring(&rules(), &[]);
        assert_eq!(summary.total_jobs_found, 0);
        assert_eq!(summary.relevant_jobs, 0);
        assert_eq!(summary.tier_breakdown, TierBreakdown::default());
        assert_eq!(summary.signal_score, 0);
        assert_eq!(summary.strength, SignalStrength::None);
    }

    #[test]
    fn irrelevant_titles_are_counted_but_not_kept() {
        let summary = summarize_hiring(&rules(), &titles(&["Warehouse Associate", "Janitor"]));
        assert_eq!(summary.total_jobs_found, 2);
        assert_eq!(summary.relevant_jobs, 0);
        assert_eq!(summary.tier_breakdown.tier3, 2);
        assert!(summary.top_jobs.is_empty());
        // Two tier-3 jobs still earn the per-job floor: min(20, 2*5) = 10.
        assert_eq!(summary.signal_score, 10);
        assert_eq!(summary.strength, SignalStrength::None);
    }

    #[test]
    fn top_jobs_are_capped_and_tier_ordered() {
        let r = rules();
        let mut list = vec!["Search Engineer".to_string(); 12];
        list.push("VP of Engineering".to_string());
        let summary = summarize_hiring(&r, &list);
        assert_eq!(summary.top_jobs.len(), r.top_jobs_cap);
        assert_eq!(summary.top_jobs[0].tier, JobTier::Tier1);
    }
}
