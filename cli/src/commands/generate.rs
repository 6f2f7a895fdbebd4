use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chain_ops_lib::builder::{build_unsigned_transaction, TxOptions};
use chain_ops_lib::payload::CallSpec;
use chain_ops_lib::persistence;
use chain_ops_lib::transaction::{ResourceBounds, ResourceBoundsMapping, TxType};

#[allow(clippy::too_many_arguments)]
pub fn run(
    calls_file: &str,
    sender: &str,
    nonce: &str,
    tx_type: &str,
    l1_gas: &str,
    l2_gas: &str,
    l1_data: &str,
    tip: &str,
    output_dir: &str,
    filename: Option<&str>,
) -> Result<()> {
    let content = fs::read_to_string(calls_file)
        .with_context(|| format!("Failed to read calls file {calls_file}"))?;
    let specs: Vec<CallSpec> = serde_json::from_str(&content)
        .with_context(|| format!("Calls file {calls_file} is not a valid calls array"))?;

    let calls = specs
        .into_iter()
        .map(CallSpec::into_call)
        .collect::<chain_ops_lib::Result<Vec<_>>>()
        .context("Failed to compile call payloads")?;

    let options = TxOptions {
        tx_type: parse_tx_type(tx_type)?,
        tip: tip.to_string(),
        ..TxOptions::default()
    };
    let resource_bounds = ResourceBoundsMapping {
        l1_gas: parse_bounds("--l1-gas", l1_gas)?,
        l2_gas: parse_bounds("--l2-gas", l2_gas)?,
        l1_data: parse_bounds("--l1-data", l1_data)?,
    };

    let tx = build_unsigned_transaction(sender, calls, nonce, resource_bounds, options)
        .context("Failed to build unsigned transaction")?;
    println!("✓ Built unsigned transaction ({} calls)", tx.calls.len());

    let path = persistence::save_transaction(&tx, Path::new(output_dir), filename)
        .context("Failed to save unsigned transaction")?;
    println!("✓ Saved: {}", path.display());
    println!("  Payload digest: {}", tx.canonical_digest());

    Ok(())
}

fn parse_tx_type(value: &str) -> Result<TxType> {
    match value {
        "invoke" => Ok(TxType::Invoke),
        "declare" => Ok(TxType::Declare),
        other => anyhow::bail!("Unknown tx type {other:?}, expected invoke or declare"),
    }
}

fn parse_bounds(flag: &str, value: &str) -> Result<ResourceBounds> {
    let (max_amount, max_price) = value
        .split_once(',')
        .with_context(|| format!("{flag} must be max_amount,max_price_per_unit, got {value:?}"))?;
    Ok(ResourceBounds::new(max_amount.trim(), max_price.trim()))
}
