use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::persistence;
use crate::transaction::{
    CombinedTransaction, SignedTransaction, SignerSignature, UnsignedTransaction,
    CANONICAL_FIELDS,
};

/// One signer's artifact together with an operator-facing label (usually
/// the file it was loaded from), used in mismatch reports.
#[derive(Debug, Clone)]
pub struct SignedArtifact {
    pub source: String,
    pub transaction: SignedTransaction,
}

/// Merges independently produced signatures over the same unsigned payload
/// into one multisig-ready transaction.
///
/// `signer_addresses[i]` is the signer of `artifacts[i]`; the output keeps
/// exactly that order, since multisig accounts verify signatures against a
/// fixed, pre-registered signer ordering. Any artifact whose canonical
/// payload diverges from the reference fails the whole combine; the error
/// names the first divergent field and the offending artifact so the
/// operator knows which signer to go back to. Signatures are not verified
/// cryptographically here, the chain does that at broadcast time.
pub fn combine(
    reference: &UnsignedTransaction,
    artifacts: &[SignedArtifact],
    signer_addresses: &[String],
) -> Result<CombinedTransaction> {
    if artifacts.is_empty() {
        return Err(Error::validation("at least one signed artifact is required"));
    }
    if artifacts.len() != signer_addresses.len() {
        return Err(Error::validation(format!(
            "got {} signed artifacts but {} signer addresses",
            artifacts.len(),
            signer_addresses.len()
        )));
    }

    let reference_payload = reference.canonical_value();
    for artifact in artifacts {
        if artifact.transaction.signature.is_empty() {
            return Err(Error::validation(format!(
                "artifact {} carries no signature",
                artifact.source
            )));
        }

        let candidate = artifact.transaction.transaction.canonical_value();
        if let Some(field) = first_divergent_field(&reference_payload, &candidate) {
            return Err(Error::mismatch(field, artifact.source.clone()));
        }
    }

    let signatures = signer_addresses
        .iter()
        .zip(artifacts)
        .map(|(signer, artifact)| SignerSignature {
            signer_address: signer.clone(),
            signature: artifact.transaction.signature.clone(),
        })
        .collect();

    Ok(CombinedTransaction {
        transaction: reference.clone(),
        signatures,
    })
}

/// File-level convenience: loads the reference and every signed artifact,
/// then delegates to [`combine`].
pub fn combine_files(
    unsigned_tx_file: &Path,
    signed_files: &[impl AsRef<Path>],
    signer_addresses: &[String],
) -> Result<CombinedTransaction> {
    if signed_files.len() != signer_addresses.len() {
        return Err(Error::validation(format!(
            "got {} signed files but {} signer addresses",
            signed_files.len(),
            signer_addresses.len()
        )));
    }

    let reference = persistence::load_unsigned(unsigned_tx_file)?;
    let artifacts = signed_files
        .iter()
        .map(|path| {
            let path = path.as_ref();
            Ok(SignedArtifact {
                source: path.display().to_string(),
                transaction: persistence::load_signed(path)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    combine(&reference, &artifacts, signer_addresses)
}

fn first_divergent_field(reference: &Value, candidate: &Value) -> Option<String> {
    CANONICAL_FIELDS
        .iter()
        .find(|field| reference.get(**field) != candidate.get(**field))
        .map(|field| field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_unsigned_transaction, TxOptions};
    use crate::transaction::{Call, ResourceBoundsMapping};

    fn call(entry_point: &str) -> Call {
        Call {
            contract_address: "0xdef".to_string(),
            entry_point: entry_point.to_string(),
            calldata: vec!["0x1".to_string()],
        }
    }

    fn unsigned() -> UnsignedTransaction {
        build_unsigned_transaction(
            "0xabc",
            vec![call("transfer"), call("approve")],
            "0x9",
            ResourceBoundsMapping::default(),
            TxOptions::default(),
        )
        .unwrap()
    }

    fn artifact(source: &str, tx: &UnsignedTransaction, sig: &str) -> SignedArtifact {
        SignedArtifact {
            source: source.to_string(),
            transaction: SignedTransaction {
                transaction: tx.clone(),
                signature: vec![sig.to_string(), format!("{sig}f")],
            },
        }
    }

    #[test]
    fn preserves_caller_signer_order() {
        let tx = unsigned();
        let artifacts = vec![
            artifact("alice.json", &tx, "0xa1"),
            artifact("bob.json", &tx, "0xb1"),
            artifact("carol.json", &tx, "0xc1"),
        ];
        let signers = vec![
            "0xalice".to_string(),
            "0xbob".to_string(),
            "0xcarol".to_string(),
        ];

        let combined = combine(&tx, &artifacts, &signers).unwrap();

        let order: Vec<_> = combined
            .signatures
            .iter()
            .map(|s| s.signer_address.as_str())
            .collect();
        assert_eq!(order, vec!["0xalice", "0xbob", "0xcarol"]);
        assert_eq!(combined.signatures[1].signature[0], "0xb1");
    }

    #[test]
    fn signer_timestamp_differences_are_ignored() {
        let tx = unsigned();
        let mut re_stamped = tx.clone();
        re_stamped.timestamp += 5_000;

        let artifacts = vec![artifact("alice.json", &re_stamped, "0xa1")];
        let combined = combine(&tx, &artifacts, &["0xalice".to_string()]).unwrap();

        assert_eq!(combined.signatures.len(), 1);
    }

    #[test]
    fn nonce_divergence_fails_with_mismatch() {
        let tx = unsigned();
        let mut altered = tx.clone();
        altered.nonce = "0xa".to_string();

        let artifacts = vec![
            artifact("alice.json", &tx, "0xa1"),
            artifact("bob.json", &altered, "0xb1"),
        ];
        let err = combine(
            &tx,
            &artifacts,
            &["0xalice".to_string(), "0xbob".to_string()],
        )
        .unwrap_err();

        match err {
            Error::Mismatch { field, artifact } => {
                assert_eq!(field, "nonce");
                assert_eq!(artifact, "bob.json");
            }
            other => panic!("expected mismatch, got {other}"),
        }
    }

    #[test]
    fn reordered_calls_fail_naming_calls() {
        let tx = unsigned();
        let mut reordered = tx.clone();
        reordered.calls.reverse();

        let artifacts = vec![artifact("alice.json", &reordered, "0xa1")];
        let err = combine(&tx, &artifacts, &["0xalice".to_string()]).unwrap_err();

        match err {
            Error::Mismatch { field, .. } => assert_eq!(field, "calls"),
            other => panic!("expected mismatch, got {other}"),
        }
    }

    #[test]
    fn length_mismatch_is_validation_error() {
        let tx = unsigned();
        let artifacts = vec![artifact("alice.json", &tx, "0xa1")];

        let err = combine(&tx, &artifacts, &[]).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn empty_signature_is_rejected() {
        let tx = unsigned();
        let mut bad = artifact("alice.json", &tx, "0xa1");
        bad.transaction.signature.clear();

        let err = combine(&tx, &[bad], &["0xalice".to_string()]).unwrap_err();
        assert!(err.to_string().contains("alice.json"));
    }

    #[test]
    fn combine_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let tx = unsigned();

        let unsigned_path = persistence::save_transaction(&tx, dir.path(), None).unwrap();

        let signed = SignedTransaction {
            transaction: tx.clone(),
            signature: vec!["0xa1".to_string(), "0xa2".to_string()],
        };
        let signed_path = dir.path().join("signed_alice.json");
        std::fs::write(&signed_path, serde_json::to_string_pretty(&signed).unwrap()).unwrap();

        let combined = combine_files(
            &unsigned_path,
            &[signed_path],
            &["0xalice".to_string()],
        )
        .unwrap();

        assert_eq!(combined.signatures[0].signer_address, "0xalice");
        assert_eq!(
            combined.transaction.canonical_digest(),
            tx.canonical_digest()
        );
    }
}
