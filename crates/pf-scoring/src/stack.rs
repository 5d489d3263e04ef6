//! Technology signal detection: which search provider a company runs.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rules::ScoringRules;
use crate::types::DetectedTechnology;

/// Outcome of scanning a company's detected technology list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStack {
    /// Our own product was detected. The company is already converted and
    /// must be excluded from the target and displacement pools. This
    /// outcome wins over any competitor match.
    OwnCustomer,
    /// A known competitor/search provider was detected.
    Provider { name: String },
    /// Nothing recognizable in the list.
    Unknown,
}

impl SearchStack {
    /// The provider name, when one was detected.
    #[must_use]
    pub fn provider_name(&self) -> Option<&str> {
        match self {
            SearchStack::Provider { name } => Some(name),
            SearchStack::OwnCustomer | SearchStack::Unknown => None,
        }
    }
}

/// Detects the search stack for a company from its technology list.
///
/// The own-product check runs first over every name and short-circuits:
/// an already-converted company is never classified as a prospect, even
/// if a competitor pattern also matches. After that, technologies whose
/// vendor category is the dedicated search category are checked before
/// falling back to a scan of all names. First matching provider wins.
/// An empty list yields [`SearchStack::Unknown`].
#[must_use]
pub fn detect_search_stack(rules: &ScoringRules, techs: &[DetectedTechnology]) -> SearchStack {
    if techs.iter().any(|t| {
        rules
            .own_product_patterns()
            .iter()
            .any(|p| p.is_match(&t.name))
    }) {
        return SearchStack::OwnCustomer;
    }

    let in_search_category = |t: &&DetectedTechnology| {
        t.category
            .as_deref()
            .is_some_and(ScoringRules::is_search_category)
    };

    if let Some(name) = first_provider_match(rules, techs.iter().filter(in_search_category)) {
        return SearchStack::Provider { name };
    }
    if let Some(name) = first_provider_match(rules, techs.iter()) {
        return SearchStack::Provider { name };
    }
    SearchStack::Unknown
}

/// Whether the company already uses our own product.
#[must_use]
pub fn is_own_customer(rules: &ScoringRules, techs: &[DetectedTechnology]) -> bool {
    matches!(detect_search_stack(rules, techs), SearchStack::OwnCustomer)
}

fn first_provider_match<'a, I>(rules: &ScoringRules, techs: I) -> Option<String>
where
    I: Iterator<Item = &'a DetectedTechnology>,
{
    let matches_any = |patterns: &[Regex], name: &str| patterns.iter().any(|p| p.is_match(name));
    for tech in techs {
        for (provider, patterns) in rules.provider_patterns() {
            if matches_any(patterns, &tech.name) {
                return Some((*provider).to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoringRules {
        ScoringRules::standard()
    }

    fn techs(names: &[&str]) -> Vec<DetectedTechnology> {
        names.iter().map(|n| DetectedTechnology::named(n)).collect()
    }

    #[test]
    fn empty_list_is_unknown() {
        assert_eq!(detect_search_stack(&rules(), &[]), SearchStack::Unknown);
    }

    #[test]
    fn detects_elasticsearch_by_name() {
        let stack = detect_search_stack(&rules(), &techs(&["Elasticsearch", "React"]));
        assert_eq!(stack.provider_name(), Some("Elasticsearch"));
    }

    #[test]
    fn detects_provider_by_domain_pattern() {
        let stack = detect_search_stack(&rules(), &techs(&["widgets from elastic.co"]));
        assert_eq!(stack.provider_name(), Some("Elasticsearch"));
    }

    #[test]
    fn own_product_wins_over_competitor_match() {
        let stack = detect_search_stack(&rules(), &techs(&["Algolia", "Elasticsearch"]));
        assert_eq!(stack, SearchStack::OwnCustomer);
    }

    #[test]
    fn own_product_wins_regardless_of_order() {
        let stack = detect_search_stack(&rules(), &techs(&["Elasticsearch", "Algolia"]));
        assert_eq!(stack, SearchStack::OwnCustomer);
    }

    #[test]
    fn is_own_customer_flags_converted_companies() {
        let r = rules();
        assert!(is_own_customer(&r, &techs(&["Algolia"])));
        assert!(!is_own_customer(&r, &techs(&["Coveo"])));
    }

    #[test]
    fn search_category_is_checked_before_all_names() {
        // Coveo appears first in the list, but the Klevu entry carries the
        // dedicated search category and must win.
        let list = vec![
            DetectedTechnology::named("Coveo"),
            DetectedTechnology {
                name: "Klevu".to_string(),
                category: Some("Site Search".to_string()),
                source: "builtwith".to_string(),
            },
        ];
        let stack = detect_search_stack(&rules(), &list);
        assert_eq!(stack.provider_name(), Some("Klevu"));
    }

    #[test]
    fn unmatched_names_are_unknown() {
        let stack = detect_search_stack(&rules(), &techs(&["React", "Shopify", "Cloudflare"]));
        assert_eq!(stack, SearchStack::Unknown);
    }

    #[test]
    fn detection_is_idempotent() {
        let r = rules();
        let list = techs(&["Searchspring", "Shopify"]);
        assert_eq!(detect_search_stack(&r, &list), detect_search_stack(&r, &list));
    }
}
