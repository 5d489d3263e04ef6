//! The rules table: every pattern, keyword, weight, and threshold the
//! scoring core consults.
//!
//! Rules are an explicit immutable value rather than scattered module
//! constants so they can be overridden in tests and versioned as a unit.
//! [`ScoringRules::standard`] builds the production vocabulary; every
//! classifier and calculator takes `&ScoringRules` as its first argument.

use regex::Regex;

use crate::classifier::Category;

/// Executive/director title patterns (tier 1), ordered; first match wins.
const TIER1_TITLE_PATTERNS: &[&str] = &[
    r"(?i)\bvp\b",
    r"(?i)vice president",
    r"(?i)\bsvp\b",
    r"(?i)\bevp\b",
    r"(?i)\bceo\b",
    r"(?i)\bcto\b",
    r"(?i)\bcmo\b",
    r"(?i)\bcpo\b",
    r"(?i)\bcio\b",
    r"(?i)\bcdo\b",
    r"(?i)\bchief\b",
    r"(?i)head of",
    r"(?i)\bdirector\b",
    r"(?i)\bprincipal\b",
    r"(?i)co[-\s]?founder",
    r"(?i)\bfounder\b",
];

/// Manager/lead-level title patterns (tier 2), checked only when no
/// tier-1 pattern matched.
const TIER2_TITLE_PATTERNS: &[&str] = &[
    r"(?i)\bmanager\b",
    r"(?i)\blead\b",
    r"(?i)\barchitect\b",
    r"(?i)product owner",
    r"(?i)\bsupervisor\b",
];

/// Topical category keywords, matched by case-insensitive substring
/// containment. A title may land in any number of categories.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Search,
        &["search", "discovery", "findability", "relevance"],
    ),
    (
        Category::Ecommerce,
        &[
            "ecommerce",
            "e-commerce",
            "online store",
            "digital commerce",
            "marketplace",
        ],
    ),
    (
        Category::Product,
        &[
            "product manager",
            "product management",
            "product owner",
            "product lead",
        ],
    ),
    (
        Category::Engineering,
        &["engineer", "developer", "software", "devops", "sre"],
    ),
    (
        Category::Data,
        &["data", "analytics", "machine learning", "data science"],
    ),
    (
        Category::DigitalCx,
        &[
            "customer experience",
            "digital experience",
            "personalization",
            "personalisation",
        ],
    ),
    (Category::Merchandising, &["merchandis"]),
];

/// Patterns that identify our own product in a detected-technology list.
/// A match here is an absolute exclusion from the prospect pool.
const OWN_PRODUCT_PATTERNS: &[&str] = &[r"(?i)algolia", r"(?i)docsearch"];

/// Canonical competitor/search-provider names and the technology-name
/// patterns that identify them.
const PROVIDER_PATTERNS: &[(&str, &[&str])] = &[
    (
        "Elasticsearch",
        &[r"(?i)elasticsearch", r"(?i)elastic\.co", r"(?i)elastic cloud"],
    ),
    ("Coveo", &[r"(?i)coveo"]),
    ("Bloomreach", &[r"(?i)bloomreach"]),
    ("Constructor", &[r"(?i)constructor\.io", r"(?i)constructor io"]),
    ("Searchspring", &[r"(?i)searchspring"]),
    ("Klevu", &[r"(?i)klevu"]),
    ("Lucidworks", &[r"(?i)lucidworks"]),
    ("Swiftype", &[r"(?i)swiftype"]),
    ("Solr", &[r"(?i)\bsolr\b"]),
    ("Typesense", &[r"(?i)typesense"]),
    ("Meilisearch", &[r"(?i)meilisearch"]),
    ("Doofinder", &[r"(?i)doofinder"]),
    ("Attraqt", &[r"(?i)attraqt"]),
];

/// Caps and weights for the hiring signal score formula.
#[derive(Debug, Clone, Copy)]
pub struct HiringWeights {
    pub tier1_weight: i64,
    pub tier1_cap: i64,
    pub tier2_weight: i64,
    pub tier2_cap: i64,
    pub tier3_weight: i64,
    pub tier3_cap: i64,
    pub search_bonus: i64,
    pub ecommerce_bonus: i64,
    pub merchandising_bonus: i64,
}

/// Caps and weights for the displacement urgency formula.
#[derive(Debug, Clone, Copy)]
pub struct DisplacementWeights {
    pub base: i64,
    pub adoption_cap: i64,
    pub competitor_weight: i64,
    pub competitor_cap: i64,
    pub first_mover_bonus: i64,
}

/// Weights for the market competitiveness formula. The similarity half
/// (`avg_similarity / 2`) is structural and not configurable.
#[derive(Debug, Clone, Copy)]
pub struct MarketWeights {
    pub competitor_weight: i64,
    pub competitor_cap: i64,
}

/// Lower bounds of each named score bucket. Buckets are contiguous and
/// closed on the lower end; these boundaries are a hard contract with the
/// dashboard UI.
#[derive(Debug, Clone, Copy)]
pub struct BucketThresholds {
    pub hot: u8,
    pub warm: u8,
    pub cool: u8,
    pub strong: u8,
    pub moderate: u8,
    pub weak: u8,
    pub pressure_high: u8,
    pub pressure_moderate: u8,
}

/// Immutable rules value consumed by every classifier and calculator.
pub struct ScoringRules {
    pub version: &'static str,
    tier1: Vec<Regex>,
    tier2: Vec<Regex>,
    categories: Vec<(Category, &'static [&'static str])>,
    own_product: Vec<Regex>,
    providers: Vec<(&'static str, Vec<Regex>)>,
    pub hiring: HiringWeights,
    pub displacement: DisplacementWeights,
    pub market: MarketWeights,
    pub thresholds: BucketThresholds,
    /// Fallback ratio applied to the ICP score when no independent signal
    /// score is stored.
    pub signal_score_ratio: f64,
    /// Cap on the persisted top-N relevant job list.
    pub top_jobs_cap: usize,
}

impl ScoringRules {
    /// Builds the production rules table.
    ///
    /// All patterns are static literals verified by the
    /// `standard_rules_compile` test, so compilation cannot fail at runtime.
    #[must_use]
    pub fn standard() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid static rules regex"))
                .collect()
        };

        Self {
            version: "2025.1",
            tier1: compile(TIER1_TITLE_PATTERNS),
            tier2: compile(TIER2_TITLE_PATTERNS),
            categories: CATEGORY_KEYWORDS.to_vec(),
            own_product: compile(OWN_PRODUCT_PATTERNS),
            providers: PROVIDER_PATTERNS
                .iter()
                .map(|&(name, patterns)| (name, compile(patterns)))
                .collect(),
            hiring: HiringWeights {
                tier1_weight: 30,
                tier1_cap: 60,
                tier2_weight: 15,
                tier2_cap: 45,
                tier3_weight: 5,
                tier3_cap: 20,
                search_bonus: 25,
                ecommerce_bonus: 15,
                merchandising_bonus: 10,
            },
            displacement: DisplacementWeights {
                base: 50,
                adoption_cap: 30,
                competitor_weight: 2,
                competitor_cap: 20,
                first_mover_bonus: 10,
            },
            market: MarketWeights {
                competitor_weight: 5,
                competitor_cap: 50,
            },
            thresholds: BucketThresholds {
                hot: 80,
                warm: 60,
                cool: 40,
                strong: 70,
                moderate: 40,
                weak: 15,
                pressure_high: 30,
                pressure_moderate: 15,
            },
            signal_score_ratio: 0.8,
            top_jobs_cap: 10,
        }
    }

    pub(crate) fn tier1_patterns(&self) -> &[Regex] {
        &self.tier1
    }

    pub(crate) fn tier2_patterns(&self) -> &[Regex] {
        &self.tier2
    }

    pub(crate) fn category_keywords(&self) -> &[(Category, &'static [&'static str])] {
        &self.categories
    }

    pub(crate) fn own_product_patterns(&self) -> &[Regex] {
        &self.own_product
    }

    pub(crate) fn provider_patterns(&self) -> &[(&'static str, Vec<Regex>)] {
        &self.providers
    }

    /// Whether a vendor-reported technology category is the prioritized
    /// search category.
    pub(crate) fn is_search_category(category: &str) -> bool {
        category.to_lowercase().contains("search")
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}
