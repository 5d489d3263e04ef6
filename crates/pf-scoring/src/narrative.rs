//! Deterministic one-sentence summaries of computed scores for UI display.
//!
//! Pure string templates over already-computed counts and rates. The
//! zero-competitor case always gets its own wording, and every rate used
//! here comes from [`crate::score::adoption_rate`], which guards the
//! empty-list division.

use crate::rules::ScoringRules;
use crate::score::{adoption_rate, competitive_pressure, CompetitivePressure};
use crate::types::CompetitorSnapshot;

/// One-sentence market position summary from the competitive landscape.
#[must_use]
pub fn market_position(rules: &ScoringRules, competitors: &[CompetitorSnapshot]) -> String {
    if competitors.is_empty() {
        return "No close competitors identified yet; market position unclear.".to_string();
    }
    let rate = adoption_rate(competitors);
    match competitive_pressure(rules, rate) {
        CompetitivePressure::High => format!(
            "Operates in a crowded space where {rate}% of tracked competitors have already modernized search."
        ),
        CompetitivePressure::Moderate => format!(
            "Faces growing pressure: {rate}% of tracked competitors have already modernized search."
        ),
        CompetitivePressure::Low | CompetitivePressure::None => format!(
            "Competes against {} similar companies with little search modernization so far.",
            competitors.len()
        ),
    }
}

/// One-sentence breakdown of competitor adoption of our own product.
#[must_use]
pub fn competitive_landscape(competitors: &[CompetitorSnapshot]) -> String {
    let total = competitors.len();
    if total == 0 {
        return "No close competitors identified yet.".to_string();
    }
    let adopters = competitors.iter().filter(|c| c.uses_own_product).count();
    if adopters == 0 {
        return format!(
            "None of {total} tracked competitors use Algolia yet; greenfield category."
        );
    }
    format!("{adopters} of {total} competitors use Algolia; falling behind on search experience.")
}

/// One-sentence displacement narrative for the current provider and
/// competitor adoption rate.
#[must_use]
pub fn displacement_narrative(
    rules: &ScoringRules,
    current_provider: Option<&str>,
    competitors: &[CompetitorSnapshot],
) -> String {
    let rate = adoption_rate(competitors);
    match (current_provider, competitive_pressure(rules, rate)) {
        (Some(provider), CompetitivePressure::High) => format!(
            "Runs {provider} while {rate}% of competitors have switched; strong displacement window."
        ),
        (Some(provider), CompetitivePressure::Moderate | CompetitivePressure::Low) => format!(
            "Runs {provider} and early competitor movement ({rate}%) suggests an opening."
        ),
        (Some(provider), CompetitivePressure::None) => {
            format!("Runs {provider} with no competitor adoption yet; first-mover opportunity.")
        }
        (None, _) => "No incumbent search provider detected; greenfield opportunity.".to_string(),
    }
}
