//! `enrich` command: sequential per-target vendor fetch, classification,
//! and score write-back.
//!
//! Per-target vendor failures are logged and recorded rather than
//! propagated, so a single bad target does not abort the batch. The run
//! only fails outright when every target fails.

use std::time::Duration;

use pf_scoring::{detect_search_stack, summarize_hiring, ScoringRules, SearchStack};
use pf_vendors::{
    normalize_job_titles, normalize_technologies, retry_with_backoff, JobsClient, StackClient,
    TrafficClient,
};

use crate::fail_run_best_effort;

/// The three vendor clients, each present only when its API key is
/// configured. A missing key downgrades that signal to empty rather than
/// blocking enrichment entirely.
struct VendorClients {
    traffic: Option<TrafficClient>,
    stack: Option<StackClient>,
    jobs: Option<JobsClient>,
}

impl VendorClients {
    fn build(config: &pf_core::AppConfig) -> anyhow::Result<Self> {
        let key_for = |key: &Option<String>, vendor: &str| -> Option<String> {
            if key.is_none() {
                tracing::warn!(vendor, "no API key configured; signal will be empty");
            }
            key.clone()
        };

        let timeout = config.vendor_request_timeout_secs;
        let ua = &config.vendor_user_agent;

        let traffic = key_for(&config.traffic_api_key, "traffic")
            .map(|k| TrafficClient::new(&k, timeout, ua))
            .transpose()?;
        let stack = key_for(&config.stack_api_key, "stack")
            .map(|k| StackClient::new(&k, timeout, ua))
            .transpose()?;
        let jobs = key_for(&config.jobs_api_key, "jobs")
            .map(|k| JobsClient::new(&k, timeout, ua))
            .transpose()?;

        Ok(Self {
            traffic,
            stack,
            jobs,
        })
    }
}

/// Outcome of processing a single target.
enum TargetOutcome {
    /// Enrichment was written. `vendor_failures` lists any vendors that
    /// failed; their signals were written as empty.
    Enriched { vendor_failures: Vec<String> },
    /// The target was found to already run our own product. The caller
    /// records the outcome and then removes the target from the pool.
    Converted,
}

/// Per-batch counters accumulated by [`process_targets`].
#[derive(Debug, Default)]
struct BatchStats {
    processed: i32,
    failed: usize,
    converted: usize,
}

/// Load the targets to process for an enrich run.
///
/// With a domain filter, fetches that single target and errors if absent.
/// Without one, returns the full pool.
async fn load_targets_for_enrich(
    pool: &sqlx::PgPool,
    domain_filter: Option<&str>,
) -> anyhow::Result<Vec<pf_db::TargetRow>> {
    if let Some(raw) = domain_filter {
        let domain = pf_core::normalize_domain(raw);
        let target = pf_db::get_target_by_domain(pool, &domain)
            .await?
            .ok_or_else(|| anyhow::anyhow!("target '{domain}' not found; run `pf-cli seed` first"))?;
        Ok(vec![target])
    } else {
        Ok(pf_db::list_targets(pool, None, i64::from(i32::MAX)).await?)
    }
}

/// Run a full enrichment batch: create → start → sequential loop → complete.
///
/// # Errors
///
/// Returns an error if the target filter resolves to nothing, a vendor
/// client cannot be constructed, the run cannot be created, or every
/// target in the batch fails.
pub(crate) async fn run_enrich(
    pool: &sqlx::PgPool,
    config: &pf_core::AppConfig,
    domain_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let targets = load_targets_for_enrich(pool, domain_filter).await?;

    if dry_run {
        let domains: Vec<&str> = targets.iter().map(|t| t.domain.as_str()).collect();
        println!(
            "dry-run: would enrich {} targets: [{}]",
            targets.len(),
            domains.join(", ")
        );
        return Ok(());
    }

    let clients = VendorClients::build(config)?;
    let rules = ScoringRules::standard();

    let run = pf_db::create_enrichment_run(pool, "enrich", "cli").await?;
    if let Err(e) = pf_db::start_enrichment_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }

    let target_count = targets.len();
    let stats = match process_targets(pool, &clients, config, &rules, run.id, &targets).await {
        Ok(stats) => stats,
        Err(e) => {
            // Bookkeeping failures must not leave the run stuck in `running`.
            fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
            return Err(e);
        }
    };

    if stats.failed > 0 {
        tracing::warn!(
            failed_targets = stats.failed,
            total_targets = target_count,
            "some targets failed during enrichment"
        );
    }

    if target_count > 0 && stats.failed == target_count {
        let message = format!("all {} targets failed enrichment", stats.failed);
        fail_run_best_effort(pool, run.id, message.clone()).await;
        anyhow::bail!("{message}");
    }

    if let Err(err) = pf_db::complete_enrichment_run(pool, run.id, stats.processed).await {
        let message = format!("{err:#}");
        fail_run_best_effort(pool, run.id, message).await;
        return Err(err.into());
    }

    println!(
        "enriched {} targets ({} converted, {} with failures)",
        stats.processed, stats.converted, stats.failed
    );
    Ok(())
}

/// Sequential per-target loop. Vendor trouble is recorded per target and
/// the loop continues; only database errors propagate.
async fn process_targets(
    pool: &sqlx::PgPool,
    clients: &VendorClients,
    config: &pf_core::AppConfig,
    rules: &ScoringRules,
    run_id: i64,
    targets: &[pf_db::TargetRow],
) -> anyhow::Result<BatchStats> {
    let mut stats = BatchStats::default();

    for (i, target) in targets.iter().enumerate() {
        if i > 0 && config.enrich_inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.enrich_inter_request_delay_ms)).await;
        }

        match enrich_target(pool, clients, config, rules, target).await {
            Ok(TargetOutcome::Enriched { vendor_failures }) => {
                stats.processed = stats.processed.saturating_add(1);
                if vendor_failures.is_empty() {
                    pf_db::upsert_enrichment_run_target(
                        pool,
                        run_id,
                        target.id,
                        &target.domain,
                        "succeeded",
                        None,
                    )
                    .await?;
                } else {
                    stats.failed += 1;
                    let message = vendor_failures.join("; ");
                    tracing::warn!(
                        domain = %target.domain,
                        error = %message,
                        "target enriched with partial vendor failures"
                    );
                    pf_db::upsert_enrichment_run_target(
                        pool,
                        run_id,
                        target.id,
                        &target.domain,
                        "failed",
                        Some(&message),
                    )
                    .await?;
                }
            }
            Ok(TargetOutcome::Converted) => {
                stats.processed = stats.processed.saturating_add(1);
                stats.converted += 1;
                tracing::info!(
                    domain = %target.domain,
                    "own product detected; target removed from prospect pool"
                );
                // The outcome row must exist before the target row goes
                // away; the FK nulls target_id on delete and the domain
                // keeps the ledger attributable.
                pf_db::upsert_enrichment_run_target(
                    pool,
                    run_id,
                    target.id,
                    &target.domain,
                    "converted",
                    None,
                )
                .await?;
                pf_db::delete_converted_target(pool, &target.domain).await?;
            }
            Err(e) => {
                stats.failed += 1;
                let message = format!("{e:#}");
                tracing::error!(
                    domain = %target.domain,
                    error = %message,
                    "unexpected error enriching target"
                );
                pf_db::upsert_enrichment_run_target(
                    pool,
                    run_id,
                    target.id,
                    &target.domain,
                    "failed",
                    Some(&message),
                )
                .await?;
            }
        }
    }

    Ok(stats)
}

/// Enrich a single target: stack → traffic → jobs, then write everything
/// back in one statement.
///
/// Vendor failures degrade that signal to empty and are reported in the
/// outcome; only database errors propagate.
async fn enrich_target(
    pool: &sqlx::PgPool,
    clients: &VendorClients,
    config: &pf_core::AppConfig,
    rules: &ScoringRules,
    target: &pf_db::TargetRow,
) -> anyhow::Result<TargetOutcome> {
    let mut vendor_failures: Vec<String> = Vec::new();
    let retries = config.vendor_max_retries;
    let backoff = config.vendor_retry_backoff_base_ms;

    let techs = match &clients.stack {
        Some(client) => {
            match retry_with_backoff(retries, backoff, || client.fetch_stack(&target.domain)).await
            {
                Ok(raw) => {
                    archive_payload(pool, target.id, "stack", &raw).await;
                    normalize_technologies(raw)
                }
                Err(e) => {
                    vendor_failures.push(format!("stack: {e}"));
                    Vec::new()
                }
            }
        }
        None => Vec::new(),
    };

    // The exclusion check runs before anything else is written: an existing
    // customer must never be scored as a prospect. Removal from the pool
    // happens in the caller, after the run ledger has the outcome.
    let stack = detect_search_stack(rules, &techs);
    if stack == SearchStack::OwnCustomer {
        return Ok(TargetOutcome::Converted);
    }

    let monthly_traffic = match &clients.traffic {
        Some(client) => {
            match retry_with_backoff(retries, backoff, || client.fetch_traffic(&target.domain))
                .await
            {
                Ok(estimate) => {
                    archive_payload(pool, target.id, "traffic", &estimate).await;
                    Some(estimate.monthly_visits)
                }
                Err(e) => {
                    vendor_failures.push(format!("traffic: {e}"));
                    None
                }
            }
        }
        None => None,
    };

    let titles = match &clients.jobs {
        Some(client) => {
            match retry_with_backoff(retries, backoff, || client.fetch_jobs(&target.company_name))
                .await
            {
                Ok(raw) => {
                    archive_payload(pool, target.id, "jobs", &raw).await;
                    normalize_job_titles(raw)
                }
                Err(e) => {
                    vendor_failures.push(format!("jobs: {e}"));
                    Vec::new()
                }
            }
        }
        None => Vec::new(),
    };

    let summary = summarize_hiring(rules, &titles);
    let technologies: Vec<&str> = techs.iter().map(|t| t.name.as_str()).collect();

    pf_db::update_target_enrichment(
        pool,
        &target.domain,
        stack.provider_name(),
        &serde_json::to_value(&technologies)?,
        monthly_traffic,
        Some(&serde_json::to_value(&summary)?),
        i32::from(summary.signal_score),
    )
    .await?;

    Ok(TargetOutcome::Enriched { vendor_failures })
}

/// Archive one raw vendor response on a best-effort basis. Audit storage
/// must never fail an enrichment.
async fn archive_payload<T: serde::Serialize>(
    pool: &sqlx::PgPool,
    target_id: i64,
    vendor: &str,
    payload: &T,
) {
    let value = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target_id, vendor, error = %e, "could not serialize vendor payload");
            return;
        }
    };
    if let Err(e) = pf_db::insert_vendor_payload(pool, target_id, vendor, &value).await {
        tracing::warn!(target_id, vendor, error = %e, "could not archive vendor payload");
    }
}
