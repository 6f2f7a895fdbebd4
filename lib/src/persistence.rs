use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::transaction::{CombinedTransaction, SignedTransaction, UnsignedTransaction};

/// Saves an unsigned transaction as pretty-printed JSON under `output_dir`,
/// creating the directory if needed. Returns the path written.
///
/// The filename always carries a timestamp so repeated runs into the same
/// directory never overwrite an earlier artifact: a caller-supplied base
/// name gets the stamp inserted before its extension, otherwise the file is
/// named `unsigned_tx_<timestamp>.json`.
pub fn save_transaction(
    tx: &UnsignedTransaction,
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf> {
    write_json(tx, output_dir, filename, "unsigned_tx")
}

/// Saves a combined transaction; same naming policy as [`save_transaction`]
/// with default base `combined_tx`.
pub fn save_combined(
    tx: &CombinedTransaction,
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf> {
    write_json(tx, output_dir, filename, "combined_tx")
}

pub fn load_unsigned(path: &Path) -> Result<UnsignedTransaction> {
    read_json(path)
}

pub fn load_signed(path: &Path) -> Result<SignedTransaction> {
    read_json(path)
}

fn write_json<T: Serialize>(
    value: &T,
    output_dir: &Path,
    filename: Option<&str>,
    default_prefix: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let path = output_dir.join(stamped_filename(filename, default_prefix));
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::parse(&path, e))?;
    fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::parse(path, e))
}

/// ISO-8601 timestamp with colons and dots replaced, safe for filenames.
fn timestamp_slug() -> String {
    chrono::Utc::now()
        .to_rfc3339()
        .replace([':', '.'], "-")
}

fn stamped_filename(base: Option<&str>, default_prefix: &str) -> String {
    let stamp = timestamp_slug();
    match base {
        Some(name) => match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}_{stamp}.{ext}"),
            None => format!("{name}_{stamp}"),
        },
        None => format!("{default_prefix}_{stamp}.json"),
    }
}
