//! Live-database tests for the enrichment run ledger. These use
//! `#[sqlx::test]` and require `DATABASE_URL` to point at a Postgres
//! instance; each test runs against its own freshly-migrated database.

use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn converted_outcome_survives_pool_removal(pool: PgPool) {
    let target = pf_db::upsert_target(&pool, "converted.example", "Converted Co", Some("ecommerce"))
        .await
        .expect("upsert target");
    let run = pf_db::create_enrichment_run(&pool, "enrich", "test")
        .await
        .expect("create run");
    pf_db::start_enrichment_run(&pool, run.id)
        .await
        .expect("start run");

    // Outcome is recorded first, then the target leaves the pool.
    pf_db::upsert_enrichment_run_target(&pool, run.id, target.id, &target.domain, "converted", None)
        .await
        .expect("record converted outcome");
    assert!(pf_db::delete_converted_target(&pool, &target.domain)
        .await
        .expect("delete converted target"));

    let rows = pf_db::list_enrichment_run_targets(&pool, run.id)
        .await
        .expect("list run targets");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].domain, "converted.example");
    assert_eq!(rows[0].status, "converted");
    assert_eq!(rows[0].target_id, None);

    // The run still completes normally afterwards.
    pf_db::complete_enrichment_run(&pool, run.id, 1)
        .await
        .expect("complete run");
    let run = pf_db::get_enrichment_run(&pool, run.id)
        .await
        .expect("get run");
    assert_eq!(run.status, "succeeded");
    assert_eq!(run.targets_processed, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn run_target_outcome_upsert_overwrites_by_domain(pool: PgPool) {
    let target = pf_db::upsert_target(&pool, "retry.example", "Retry Co", None)
        .await
        .expect("upsert target");
    let run = pf_db::create_enrichment_run(&pool, "enrich", "test")
        .await
        .expect("create run");

    pf_db::upsert_enrichment_run_target(
        &pool,
        run.id,
        target.id,
        &target.domain,
        "failed",
        Some("stack: timeout"),
    )
    .await
    .expect("record first outcome");
    pf_db::upsert_enrichment_run_target(&pool, run.id, target.id, &target.domain, "succeeded", None)
        .await
        .expect("record retried outcome");

    let rows = pf_db::list_enrichment_run_targets(&pool, run.id)
        .await
        .expect("list run targets");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "succeeded");
    assert!(rows[0].error_message.is_none());
    assert_eq!(rows[0].target_id, Some(target.id));
}
