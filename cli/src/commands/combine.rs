use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chain_ops_lib::combiner;
use chain_ops_lib::persistence;

pub fn run(
    unsigned: &str,
    signed: &[String],
    signers: &[String],
    output_dir: Option<&str>,
    filename: Option<&str>,
) -> Result<()> {
    let unsigned_path = Path::new(unsigned);
    let signed_paths: Vec<PathBuf> = signed.iter().map(PathBuf::from).collect();

    let combined = combiner::combine_files(unsigned_path, &signed_paths, signers)
        .context("Failed to combine signed artifacts")?;

    for (path, signer) in signed_paths.iter().zip(signers) {
        println!("✓ {} ({signer})", path.display());
    }

    let output_dir = match output_dir {
        Some(dir) => PathBuf::from(dir),
        None => unsigned_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let path = persistence::save_combined(&combined, &output_dir, filename)
        .context("Failed to save combined transaction")?;

    println!(
        "✓ Combined {} signatures: {}",
        combined.signatures.len(),
        path.display()
    );
    println!(
        "  Payload digest: {}",
        combined.transaction.canonical_digest()
    );

    Ok(())
}
