//! Composite score calculators and their qualitative buckets.
//!
//! Every calculator is pure and clamps its output to `[0, 100]` no matter
//! how large or negative the caller-supplied counts are, so an upstream
//! bug can never push a nonsensical score into the dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::{Category, TierBreakdown};
use crate::rules::ScoringRules;
use crate::types::CompetitorSnapshot;

/// Qualitative bucket for the hiring signal score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStrength {
    Strong,
    Moderate,
    Weak,
    None,
}

impl std::fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SignalStrength::Strong => "strong",
            SignalStrength::Moderate => "moderate",
            SignalStrength::Weak => "weak",
            SignalStrength::None => "none",
        };
        write!(f, "{s}")
    }
}

/// Qualitative bucket for the ICP/lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LeadStatus::Hot => "hot",
            LeadStatus::Warm => "warm",
            LeadStatus::Cool => "cool",
            LeadStatus::Cold => "cold",
        };
        write!(f, "{s}")
    }
}

/// Qualitative bucket for competitor adoption pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitivePressure {
    High,
    Moderate,
    Low,
    None,
}

impl std::fmt::Display for CompetitivePressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompetitivePressure::High => "high",
            CompetitivePressure::Moderate => "moderate",
            CompetitivePressure::Low => "low",
            CompetitivePressure::None => "none",
        };
        write!(f, "{s}")
    }
}

/// Policy for producing the ICP score integer. The surrounding system
/// computes this number in more than one way; the bucket boundaries in
/// [`lead_status`] are the only hard contract, so the weighting itself is
/// pluggable.
pub trait IcpPolicy {
    fn icp_score(&self, stored: Option<i64>) -> i64;
}

/// Default policy: pass the stored column through unchanged, clamped to
/// the valid range; missing values score 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredScore;

impl IcpPolicy for StoredScore {
    fn icp_score(&self, stored: Option<i64>) -> i64 {
        stored.unwrap_or(0).clamp(0, 100)
    }
}

/// Computes the hiring signal score from tier counts and category counts.
///
/// `min(60, t1*30) + min(45, t2*15) + min(20, t3*5)` plus flat bonuses of
/// 25/15/10 when any job fell in the search, e-commerce, or merchandising
/// category. Negative counts clamp to zero before use.
#[must_use]
pub fn hiring_signal_score(
    rules: &ScoringRules,
    breakdown: &TierBreakdown,
    category_counts: &BTreeMap<Category, i64>,
) -> u8 {
    let w = rules.hiring;
    let capped = |count: i64, weight: i64, cap: i64| count.max(0).saturating_mul(weight).min(cap);

    let mut score = capped(breakdown.tier1, w.tier1_weight, w.tier1_cap)
        .saturating_add(capped(breakdown.tier2, w.tier2_weight, w.tier2_cap))
        .saturating_add(capped(breakdown.tier3, w.tier3_weight, w.tier3_cap));

    let has = |c: Category| category_counts.get(&c).copied().unwrap_or(0) > 0;
    if has(Category::Search) {
        score = score.saturating_add(w.search_bonus);
    }
    if has(Category::Ecommerce) {
        score = score.saturating_add(w.ecommerce_bonus);
    }
    if has(Category::Merchandising) {
        score = score.saturating_add(w.merchandising_bonus);
    }

    clamp_score(score)
}

/// Buckets a hiring signal score. Boundaries are closed on the lower end.
#[must_use]
pub fn signal_strength(rules: &ScoringRules, score: u8) -> SignalStrength {
    let t = rules.thresholds;
    if score >= t.strong {
        SignalStrength::Strong
    } else if score >= t.moderate {
        SignalStrength::Moderate
    } else if score >= t.weak {
        SignalStrength::Weak
    } else {
        SignalStrength::None
    }
}

/// Buckets an ICP score into hot/warm/cool/cold. Out-of-range inputs are
/// clamped first, so a negative score is simply cold.
#[must_use]
pub fn lead_status(rules: &ScoringRules, icp_score: i64) -> LeadStatus {
    let t = rules.thresholds;
    let score = clamp_score(icp_score);
    if score >= t.hot {
        LeadStatus::Hot
    } else if score >= t.warm {
        LeadStatus::Warm
    } else if score >= t.cool {
        LeadStatus::Cool
    } else {
        LeadStatus::Cold
    }
}

/// Market competitiveness: `min(50, competitor_count*5) + avg_similarity/2`.
#[must_use]
pub fn market_competitiveness(
    rules: &ScoringRules,
    competitor_count: i64,
    avg_similarity: f64,
) -> u8 {
    let w = rules.market;
    let base = competitor_count
        .max(0)
        .saturating_mul(w.competitor_weight)
        .min(w.competitor_cap);
    let similarity_half = avg_similarity.clamp(0.0, 100.0) / 2.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = (base as f64 + similarity_half).round() as i64;
    clamp_score(total)
}

/// Share of competitors already using our own product, as a rounded
/// percentage. An empty competitor list returns exactly 0.
#[must_use]
pub fn adoption_rate(competitors: &[CompetitorSnapshot]) -> u8 {
    let total = i64::try_from(competitors.len()).unwrap_or(i64::MAX);
    if total == 0 {
        return 0;
    }
    let adopters =
        i64::try_from(competitors.iter().filter(|c| c.uses_own_product).count()).unwrap_or(0);
    clamp_score((adopters * 100 + total / 2) / total)
}

/// Displacement urgency: base 50, plus capped adoption-rate and
/// competitor-count terms, plus a first-mover bonus when no competitor
/// has adopted yet but at least one exists.
#[must_use]
pub fn displacement_urgency(rules: &ScoringRules, competitors: &[CompetitorSnapshot]) -> u8 {
    let w = rules.displacement;
    let rate = i64::from(adoption_rate(competitors));
    let count = i64::try_from(competitors.len()).unwrap_or(i64::MAX);

    let mut score = w
        .base
        .saturating_add(rate.min(w.adoption_cap))
        .saturating_add(count.saturating_mul(w.competitor_weight).min(w.competitor_cap));
    if rate == 0 && count > 0 {
        score = score.saturating_add(w.first_mover_bonus);
    }
    clamp_score(score)
}

/// Buckets a competitor adoption rate into a pressure level.
#[must_use]
pub fn competitive_pressure(rules: &ScoringRules, rate: u8) -> CompetitivePressure {
    let t = rules.thresholds;
    if rate >= t.pressure_high {
        CompetitivePressure::High
    } else if rate >= t.pressure_moderate {
        CompetitivePressure::Moderate
    } else if rate > 0 {
        CompetitivePressure::Low
    } else {
        CompetitivePressure::None
    }
}

fn clamp_score(score: i64) -> u8 {
    u8::try_from(score.clamp(0, 100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoringRules {
        ScoringRules::standard()
    }

    fn competitor(uses_own_product: bool) -> CompetitorSnapshot {
        CompetitorSnapshot {
            domain: "rival.example".to_string(),
            name: "Rival".to_string(),
            search_provider: None,
            uses_own_product,
            similarity: 60,
        }
    }

    #[test]
    fn scenario_one_vp_of_search_plus_product_manager() {
        // One tier-1 and one tier-2 job, search category present twice.
        let r = rules();
        let breakdown = TierBreakdown {
            tier1: 1,
            tier2: 1,
            tier3: 0,
        };
        let counts = BTreeMap::from([(Category::Search, 2)]);
        let score = hiring_signal_score(&r, &breakdown, &counts);
        assert_eq!(score, 70);
        assert_eq!(signal_strength(&r, score), SignalStrength::Strong);
    }

    #[test]
    fn hiring_score_caps_each_tier_term() {
        let r = rules();
        let breakdown = TierBreakdown {
            tier1: 10,
            tier2: 10,
            tier3: 10,
        };
        // 60 + 45 + 20 = 125, clamped to 100.
        assert_eq!(hiring_signal_score(&r, &breakdown, &BTreeMap::new()), 100);
    }

    #[test]
    fn hiring_score_survives_adversarial_counts() {
        let r = rules();
        let breakdown = TierBreakdown {
            tier1: i64::MAX,
            tier2: i64::MAX,
            tier3: i64::MAX,
        };
        let counts = BTreeMap::from([
            (Category::Search, i64::MAX),
            (Category::Ecommerce, i64::MAX),
            (Category::Merchandising, i64::MAX),
        ]);
        assert_eq!(hiring_signal_score(&r, &breakdown, &counts), 100);
    }

    #[test]
    fn hiring_score_clamps_negative_counts_to_zero() {
        let r = rules();
        let breakdown = TierBreakdown {
            tier1: -5,
            tier2: -5,
            tier3: -5,
        };
        let counts = BTreeMap::from([(Category::Search, -3)]);
        assert_eq!(hiring_signal_score(&r, &breakdown, &counts), 0);
    }

    #[test]
    fn signal_strength_boundaries_are_exact() {
        let r = rules();
        assert_eq!(signal_strength(&r, 69), SignalStrength::Moderate);
        assert_eq!(signal_strength(&r, 70), SignalStrength::Strong);
        assert_eq!(signal_strength(&r, 39), SignalStrength::Weak);
        assert_eq!(signal_strength(&r, 40), SignalStrength::Moderate);
        assert_eq!(signal_strength(&r, 14), SignalStrength::None);
        assert_eq!(signal_strength(&r, 15), SignalStrength::Weak);
    }

    #[test]
    fn lead_status_boundaries_are_exact() {
        let r = rules();
        assert_eq!(lead_status(&r, 79), LeadStatus::Warm);
        assert_eq!(lead_status(&r, 80), LeadStatus::Hot);
        assert_eq!(lead_status(&r, 59), LeadStatus::Cool);
        assert_eq!(lead_status(&r, 60), LeadStatus::Warm);
        assert_eq!(lead_status(&r, 39), LeadStatus::Cold);
        assert_eq!(lead_status(&r, 40), LeadStatus::Cool);
    }

    #[test]
    fn lead_status_clamps_out_of_range_input() {
        let r = rules();
        assert_eq!(lead_status(&r, -50), LeadStatus::Cold);
        assert_eq!(lead_status(&r, 10_000), LeadStatus::Hot);
    }

    #[test]
    fn adoption_rate_empty_list_is_zero() {
        assert_eq!(adoption_rate(&[]), 0);
    }

    #[test]
    fn adoption_rate_rounds_to_nearest_percent() {
        let list = vec![competitor(true), competitor(false), competitor(false)];
        // 1 of 3 = 33.3%, rounds to 33.
        assert_eq!(adoption_rate(&list), 33);
    }

    #[test]
    fn adoption_rate_all_adopters_is_one_hundred() {
        let list = vec![competitor(true), competitor(true)];
        assert_eq!(adoption_rate(&list), 100);
    }

    #[test]
    fn scenario_three_first_mover_bonus() {
        // 5 competitors, none adopting: 50 + 0 + min(20, 10) + 10 = 70.
        let r = rules();
        let list = vec![competitor(false); 5];
        assert_eq!(displacement_urgency(&r, &list), 70);
    }

    #[test]
    fn displacement_urgency_no_competitors_is_base() {
        let r = rules();
        assert_eq!(displacement_urgency(&r, &[]), 50);
    }

    #[test]
    fn displacement_urgency_caps_at_one_hundred() {
        let r = rules();
        let list = vec![competitor(true); 50];
        assert_eq!(displacement_urgency(&r, &list), 100);
    }

    #[test]
    fn no_first_mover_bonus_once_anyone_adopts() {
        let r = rules();
        let mut list = vec![competitor(false); 4];
        list.push(competitor(true));
        // rate = 20, count = 5: 50 + 20 + 10 = 80, no bonus.
        assert_eq!(displacement_urgency(&r, &list), 80);
    }

    #[test]
    fn competitive_pressure_buckets() {
        let r = rules();
        assert_eq!(competitive_pressure(&r, 30), CompetitivePressure::High);
        assert_eq!(competitive_pressure(&r, 29), CompetitivePressure::Moderate);
        assert_eq!(competitive_pressure(&r, 15), CompetitivePressure::Moderate);
        assert_eq!(competitive_pressure(&r, 14), CompetitivePressure::Low);
        assert_eq!(competitive_pressure(&r, 1), CompetitivePressure::Low);
        assert_eq!(competitive_pressure(&r, 0), CompetitivePressure::None);
    }

    #[test]
    fn market_competitiveness_formula() {
        let r = rules();
        // min(50, 4*5) + 80/2 = 20 + 40 = 60.
        assert_eq!(market_competitiveness(&r, 4, 80.0), 60);
        // Count term caps at 50.
        assert_eq!(market_competitiveness(&r, 100, 0.0), 50);
    }

    #[test]
    fn market_competitiveness_clamps_garbage_input() {
        let r = rules();
        assert_eq!(market_competitiveness(&r, -10, -500.0), 0);
        assert_eq!(market_competitiveness(&r, i64::MAX, 1e9), 100);
    }

    #[test]
    fn stored_score_policy_passes_through_clamped() {
        let policy = StoredScore;
        assert_eq!(policy.icp_score(Some(85)), 85);
        assert_eq!(policy.icp_score(Some(-12)), 0);
        assert_eq!(policy.icp_score(Some(250)), 100);
        assert_eq!(policy.icp_score(None), 0);
    }

    #[test]
    fn calculators_are_idempotent() {
        let r = rules();
        let list = vec![competitor(true), competitor(false)];
        assert_eq!(displacement_urgency(&r, &list), displacement_urgency(&r, &list));
        assert_eq!(adoption_rate(&list), adoption_rate(&list));
    }
}
