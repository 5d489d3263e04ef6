//! Pure classification and scoring logic for `PartnerForge`.
//!
//! Everything in this crate is synchronous, side-effect-free, and total:
//! malformed input produces safe defaults (tier 3, empty category set,
//! [`SearchStack::Unknown`], score 0) rather than errors. Vendor I/O and
//! persistence live in `pf-vendors` and `pf-db`; this crate only consumes
//! already-fetched, already-normalized signal lists.

pub mod classifier;
pub mod narrative;
pub mod rules;
pub mod score;
pub mod stack;
pub mod transform;
pub mod types;

pub use classifier::{classify_categories, classify_tier, Category, JobTier, TierBreakdown};
pub use narrative::{competitive_landscape, displacement_narrative, market_position};
pub use rules::ScoringRules;
pub use score::{
    adoption_rate, competitive_pressure, displacement_urgency, hiring_signal_score, lead_status,
    market_competitiveness, signal_strength, CompetitivePressure, IcpPolicy, LeadStatus,
    SignalStrength, StoredScore,
};
pub use stack::{detect_search_stack, is_own_customer, SearchStack};
pub use transform::{summarize_hiring, transform_target, RawTargetRow, TargetCompany};
pub use types::{CompetitorSnapshot, DetectedTechnology, HiringSignalSummary, JobSignal};
