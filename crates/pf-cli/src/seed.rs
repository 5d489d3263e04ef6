//! `seed` command: load the YAML target list and upsert every entry.

/// Upserts each seed target from `config/targets.yaml` into the database.
///
/// The file is validated (non-empty names, unique normalized domains)
/// before anything is written, so a bad file changes nothing.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or any upsert fails.
pub(crate) async fn run_seed(
    pool: &sqlx::PgPool,
    config: &pf_core::AppConfig,
) -> anyhow::Result<()> {
    let file = pf_core::load_targets(&config.targets_path)?;

    let mut created_or_updated = 0usize;
    for seed in &file.targets {
        let domain = pf_core::normalize_domain(&seed.domain);
        let row = pf_db::upsert_target(pool, &domain, &seed.name, seed.vertical.as_deref()).await?;
        tracing::info!(domain = %row.domain, name = %row.company_name, "seeded target");
        created_or_updated += 1;
    }

    println!(
        "seeded {created_or_updated} targets from {}",
        config.targets_path.display()
    );
    Ok(())
}
