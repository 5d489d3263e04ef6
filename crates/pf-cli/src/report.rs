//! `report` command: print the scored target table to stdout.

/// Prints targets ordered by ICP score, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_report(
    pool: &sqlx::PgPool,
    status: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    let targets = pf_db::list_targets(pool, status, limit).await?;

    if targets.is_empty() {
        println!("no targets match");
        return Ok(());
    }

    println!(
        "{:<28} {:<24} {:>4} {:>6} {:>8}  {:<6} {}",
        "DOMAIN", "COMPANY", "ICP", "SIGNAL", "PRIORITY", "STATUS", "PROVIDER"
    );
    for t in &targets {
        println!(
            "{:<28} {:<24} {:>4} {:>6} {:>8}  {:<6} {}",
            t.domain,
            t.company_name,
            t.icp_score,
            t.signal_score,
            t.priority_score,
            t.status,
            t.search_provider.as_deref().unwrap_or("-"),
        );
    }
    println!("{} targets", targets.len());
    Ok(())
}
