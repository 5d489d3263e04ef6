//! Job title classification: seniority tier and topical categories.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::rules::ScoringRules;

/// Seniority tier of a job title, 1 (exec) to 3 (individual contributor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobTier {
    Tier1,
    Tier2,
    Tier3,
}

impl JobTier {
    /// Numeric rank, 1 to 3.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            JobTier::Tier1 => 1,
            JobTier::Tier2 => 2,
            JobTier::Tier3 => 3,
        }
    }
}

impl std::fmt::Display for JobTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier{}", self.rank())
    }
}

/// Topical category of a job title. Independent of tier; a title may
/// match any number of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Search,
    Ecommerce,
    Product,
    Engineering,
    Data,
    DigitalCx,
    Merchandising,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Search => "search",
            Category::Ecommerce => "e-commerce",
            Category::Product => "product",
            Category::Engineering => "engineering",
            Category::Data => "data",
            Category::DigitalCx => "digital-cx",
            Category::Merchandising => "merchandising",
        };
        write!(f, "{s}")
    }
}

/// Per-tier job counts for one company's posting set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub tier1: i64,
    pub tier2: i64,
    pub tier3: i64,
}

impl TierBreakdown {
    /// Increments the count for the given tier.
    pub fn record(&mut self, tier: JobTier) {
        match tier {
            JobTier::Tier1 => self.tier1 += 1,
            JobTier::Tier2 => self.tier2 += 1,
            JobTier::Tier3 => self.tier3 += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.tier1.saturating_add(self.tier2).saturating_add(self.tier3)
    }
}

/// Classifies a job title into a seniority tier.
///
/// Tier-1 patterns are checked first; tier-2 patterns only run when no
/// tier-1 pattern matched, so a title can never be both. Blank or
/// unmatched titles default to [`JobTier::Tier3`].
#[must_use]
pub fn classify_tier(rules: &ScoringRules, title: &str) -> JobTier {
    let title = title.trim();
    if title.is_empty() {
        return JobTier::Tier3;
    }
    if rules.tier1_patterns().iter().any(|p| p.is_match(title)) {
        return JobTier::Tier1;
    }
    if rules.tier2_patterns().iter().any(|p| p.is_match(title)) {
        return JobTier::Tier2;
    }
    JobTier::Tier3
}

/// Classifies a job title into zero or more topical categories by
/// case-insensitive substring containment against the keyword table.
#[must_use]
pub fn classify_categories(rules: &ScoringRules, title: &str) -> BTreeSet<Category> {
    let lower = title.to_lowercase();
    let mut out = BTreeSet::new();
    if lower.trim().is_empty() {
        return out;
    }
    for &(category, keywords) in rules.category_keywords() {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            out.insert(category);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoringRules {
        ScoringRules::standard()
    }

    #[test]
    fn vp_of_search_is_tier1_search() {
        let r = rules();
        assert_eq!(classify_tier(&r, "VP of Search"), JobTier::Tier1);
        let cats = classify_categories(&r, "VP of Search");
        assert_eq!(cats, BTreeSet::from([Category::Search]));
    }

    #[test]
    fn product_manager_is_tier2() {
        assert_eq!(
            classify_tier(&rules(), "Product Manager, Search"),
            JobTier::Tier2
        );
    }

    #[test]
    fn tier1_takes_precedence_over_tier2() {
        // "Director" (tier 1) and "Manager" (tier 2) in one title.
        let r = rules();
        assert_eq!(
            classify_tier(&r, "Director of Engineering Managers"),
            JobTier::Tier1
        );
        assert_eq!(classify_tier(&r, "VP, Engineering Lead"), JobTier::Tier1);
    }

    #[test]
    fn unmatched_title_defaults_to_tier3() {
        assert_eq!(
            classify_tier(&rules(), "Barista and Latte Artist"),
            JobTier::Tier3
        );
    }

    #[test]
    fn empty_title_defaults_to_tier3() {
        let r = rules();
        assert_eq!(classify_tier(&r, ""), JobTier::Tier3);
        assert_eq!(classify_tier(&r, "   "), JobTier::Tier3);
    }

    #[test]
    fn classification_is_case_insensitive() {
        let r = rules();
        assert_eq!(classify_tier(&r, "HEAD OF ECOMMERCE"), JobTier::Tier1);
        assert!(classify_categories(&r, "ECOMMERCE ANALYST").contains(&Category::Ecommerce));
    }

    #[test]
    fn title_can_match_multiple_categories() {
        let cats = classify_categories(&rules(), "Search and Merchandising Analyst");
        assert!(cats.contains(&Category::Search));
        assert!(cats.contains(&Category::Merchandising));
    }

    #[test]
    fn empty_title_has_no_categories() {
        assert!(classify_categories(&rules(), "").is_empty());
    }

    #[test]
    fn classification_is_idempotent() {
        let r = rules();
        let title = "Head of Search and Discovery";
        assert_eq!(classify_tier(&r, title), classify_tier(&r, title));
        assert_eq!(
            classify_categories(&r, title),
            classify_categories(&r, title)
        );
    }

    #[test]
    fn breakdown_record_and_total() {
        let mut b = TierBreakdown::default();
        b.record(JobTier::Tier1);
        b.record(JobTier::Tier2);
        b.record(JobTier::Tier2);
        b.record(JobTier::Tier3);
        assert_eq!(b.tier1, 1);
        assert_eq!(b.tier2, 2);
        assert_eq!(b.tier3, 1);
        assert_eq!(b.total(), 4);
    }
}
