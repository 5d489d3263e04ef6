//! `score` command: recompute scores and status buckets from stored
//! signals. No vendor calls; safe to run after a rules change.

use pf_scoring::{transform_target, RawTargetRow, ScoringRules};

/// Recomputes the score columns for one target or the whole pool.
///
/// # Errors
///
/// Returns an error if the domain filter resolves to nothing or a
/// database write fails.
pub(crate) async fn run_score(
    pool: &sqlx::PgPool,
    domain_filter: Option<&str>,
) -> anyhow::Result<()> {
    let targets = if let Some(raw) = domain_filter {
        let domain = pf_core::normalize_domain(raw);
        let target = pf_db::get_target_by_domain(pool, &domain)
            .await?
            .ok_or_else(|| anyhow::anyhow!("target '{domain}' not found"))?;
        vec![target]
    } else {
        pf_db::list_targets(pool, None, i64::from(i32::MAX)).await?
    };

    let rules = ScoringRules::standard();
    let mut rescored = 0usize;

    for target in &targets {
        let company = transform_target(&rules, raw_row_from(target));
        pf_db::update_target_scores(
            pool,
            &target.domain,
            i32::from(company.icp_score),
            i32::from(company.signal_score),
            i32::from(company.priority_score),
            &company.status.to_string(),
        )
        .await?;
        tracing::info!(
            domain = %target.domain,
            icp = company.icp_score,
            signal = company.signal_score,
            status = %company.status,
            "rescored target"
        );
        rescored += 1;
    }

    println!("rescored {rescored} targets");
    Ok(())
}

/// Maps a stored row into the all-optional raw shape the transform takes.
///
/// Enrichment always writes a hiring summary alongside the signal score,
/// so a zero with a summary is a real measurement (zero jobs found) and
/// must survive a rescore. A zero without one is the unscored column
/// default and reads as absent, letting the transform fall back to its
/// proportional estimate.
fn raw_row_from(target: &pf_db::TargetRow) -> RawTargetRow {
    let technologies: Option<Vec<String>> =
        serde_json::from_value(target.technologies.clone()).ok();
    let signal_measured = target.hiring_summary.is_some() || target.signal_score > 0;

    RawTargetRow {
        domain: Some(target.domain.clone()),
        company_name: Some(target.company_name.clone()),
        hq_city: target.hq_city.clone(),
        hq_state: target.hq_state.clone(),
        hq_country: target.hq_country.clone(),
        vertical: target.vertical.clone(),
        employee_count: target.employee_count,
        founded_year: target.founded_year,
        is_public: Some(target.is_public),
        ticker: target.ticker.clone(),
        technologies,
        search_provider: target.search_provider.clone(),
        monthly_traffic: target.monthly_traffic,
        revenue_estimate: target.revenue_estimate,
        icp_score: Some(i64::from(target.icp_score)),
        signal_score: signal_measured.then_some(i64::from(target.signal_score)),
        priority_score: Some(i64::from(target.priority_score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn stored_target(icp: i32, signal: i32) -> pf_db::TargetRow {
        pf_db::TargetRow {
            id: 1,
            public_id: Uuid::new_v4(),
            domain: "shop.example".to_string(),
            company_name: "Shop Example".to_string(),
            hq_city: None,
            hq_state: None,
            hq_country: None,
            vertical: Some("ecommerce".to_string()),
            employee_count: Some(500),
            founded_year: None,
            is_public: false,
            ticker: None,
            technologies: serde_json::json!(["Solr"]),
            search_provider: Some("Solr".to_string()),
            monthly_traffic: Some(10_000),
            revenue_estimate: None,
            icp_score: icp,
            signal_score: signal,
            priority_score: 0,
            status: "cold".to_string(),
            hiring_summary: None,
            last_enriched_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn raw_row_carries_stored_fields() {
        let raw = raw_row_from(&stored_target(72, 58));
        assert_eq!(raw.domain.as_deref(), Some("shop.example"));
        assert_eq!(raw.icp_score, Some(72));
        assert_eq!(raw.signal_score, Some(58));
        assert_eq!(raw.technologies.as_deref(), Some(&["Solr".to_string()][..]));
    }

    #[test]
    fn unenriched_zero_signal_reads_as_absent() {
        // No hiring summary stored, so the zero is the column default.
        let raw = raw_row_from(&stored_target(80, 0));
        assert!(raw.signal_score.is_none());
        // The transform then falls back to the proportional estimate.
        let company = transform_target(&ScoringRules::standard(), raw);
        assert_eq!(company.signal_score, 64);
    }

    #[test]
    fn enriched_zero_signal_survives_rescore() {
        // A zero-jobs enrichment writes signal 0 with an all-zero summary.
        let rules = ScoringRules::standard();
        let summary = pf_scoring::summarize_hiring(&rules, &[]);
        assert_eq!(summary.signal_score, 0);

        let mut target = stored_target(80, 0);
        target.hiring_summary = Some(serde_json::to_value(&summary).expect("summary json"));

        let raw = raw_row_from(&target);
        assert_eq!(raw.signal_score, Some(0));
        let company = transform_target(&rules, raw);
        assert_eq!(company.signal_score, 0);
    }
}
