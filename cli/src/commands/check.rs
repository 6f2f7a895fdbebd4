use std::path::Path;

use anyhow::{Context, Result};
use chain_ops_lib::consistency::{check, check_uniqueness, CheckPolicy};
use chain_ops_lib::deployments::DeploymentConfig;
use chain_ops_lib::snapshots::{ProverSnapshot, RouterSnapshot};

pub fn run(
    router: &str,
    coordinator: &str,
    multisig: &str,
    config: Option<&str>,
    flag_router_gaps: bool,
) -> Result<()> {
    let router_snapshot =
        RouterSnapshot::from_file(Path::new(router)).context("Failed to load router snapshot")?;
    let coordinator_snapshot = ProverSnapshot::from_file(Path::new(coordinator))
        .context("Failed to load coordinator snapshot")?;
    let multisig_snapshot = ProverSnapshot::from_file(Path::new(multisig))
        .context("Failed to load multisig snapshot")?;

    let policy = CheckPolicy { flag_router_gaps };
    let mut report = check(
        &router_snapshot.chains,
        &coordinator_snapshot.provers,
        &multisig_snapshot.provers,
        &policy,
    );

    if let Some(config) = config {
        let config =
            DeploymentConfig::from_file(Path::new(config)).context("Failed to load config")?;
        report.record_duplicates(check_uniqueness(&config.contract_sets()));
    }

    for chain in &report.missing_in_multisig {
        println!("✗ {chain}: registered with coordinator but missing from multisig");
    }
    for mismatch in &report.prover_mismatches {
        println!("✗ {}: prover mismatch", mismatch.chain);
        println!("  Expected: {}", mismatch.expected);
        println!("  Actual:   {}", mismatch.actual);
    }
    for violation in &report.duplicate_violations {
        println!(
            "✗ {} address {} shared by chains: {}",
            violation.role,
            violation.address,
            violation.chains.join(", ")
        );
    }
    for chain in &report.router_only {
        if flag_router_gaps {
            println!("✗ {chain}: known to router but not to coordinator");
        } else {
            println!("  {chain}: known to router only, not yet onboarded to coordinator");
        }
    }

    if !report.is_consistent() {
        anyhow::bail!("Consistency check failed");
    }

    println!(
        "✓ Chain contracts consistent ({} coordinator chains checked)",
        coordinator_snapshot.provers.len()
    );

    Ok(())
}
