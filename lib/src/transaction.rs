use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transaction version the offline workflow targets. V3 carries resource
/// bounds and data-availability modes instead of a flat max fee.
pub const TX_VERSION: &str = "0x3";

/// Canonical (hash-relevant) fields of a transaction, in comparison order.
/// `timestamp` and `signature` are deliberately absent: downstream hash
/// computation never sees them.
pub const CANONICAL_FIELDS: [&str; 11] = [
    "type",
    "version",
    "sender_address",
    "nonce",
    "calls",
    "resource_bounds",
    "tip",
    "paymaster_data",
    "account_deployment_data",
    "nonce_data_availability_mode",
    "fee_data_availability_mode",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    #[serde(rename = "INVOKE")]
    Invoke,
    #[serde(rename = "DECLARE")]
    Declare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataAvailabilityMode {
    #[serde(rename = "L1")]
    L1,
    #[serde(rename = "L2")]
    L2,
}

/// Fee-market ceiling for one resource: amount and price per unit, both hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBounds {
    pub max_amount: String,
    pub max_price_per_unit: String,
}

impl ResourceBounds {
    pub fn new(max_amount: impl Into<String>, max_price_per_unit: impl Into<String>) -> Self {
        Self {
            max_amount: max_amount.into(),
            max_price_per_unit: max_price_per_unit.into(),
        }
    }

    pub fn zero() -> Self {
        Self::new("0x0", "0x0")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBoundsMapping {
    pub l1_gas: ResourceBounds,
    pub l2_gas: ResourceBounds,
    pub l1_data: ResourceBounds,
}

impl Default for ResourceBoundsMapping {
    fn default() -> Self {
        Self {
            l1_gas: ResourceBounds::zero(),
            l2_gas: ResourceBounds::zero(),
            l1_data: ResourceBounds::zero(),
        }
    }
}

/// One contract call. Calldata is pre-compiled by the caller; ABI encoding
/// happens before the envelope is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub contract_address: String,
    pub entry_point: String,
    pub calldata: Vec<String>,
}

/// Canonical unsigned-transaction envelope, produced before any signing.
///
/// Every field except `timestamp` feeds the transaction hash that signers
/// commit to. `timestamp` records creation time for operator audit only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub version: String,
    pub sender_address: String,
    pub nonce: String,
    pub calls: Vec<Call>,
    pub resource_bounds: ResourceBoundsMapping,
    pub tip: String,
    pub paymaster_data: Vec<String>,
    pub account_deployment_data: Vec<String>,
    pub nonce_data_availability_mode: DataAvailabilityMode,
    pub fee_data_availability_mode: DataAvailabilityMode,
    pub timestamp: i64,
}

impl UnsignedTransaction {
    /// The canonical payload as a JSON object: all hash-relevant fields,
    /// `timestamp` stripped. Two transactions are interchangeable for
    /// signing purposes iff their canonical payloads are equal.
    pub fn canonical_value(&self) -> Value {
        let mut value =
            serde_json::to_value(self).expect("transaction is plain data and serializes");
        if let Value::Object(map) = &mut value {
            map.remove("timestamp");
        }
        value
    }

    /// Hex sha256 digest of the canonical payload. Printed by the CLI so
    /// signers can compare envelopes out of band before committing.
    pub fn canonical_digest(&self) -> String {
        use sha2::{Digest, Sha256};
        let bytes = serde_json::to_vec(&self.canonical_value())
            .expect("canonical payload is plain data and serializes");
        let hash = Sha256::digest(&bytes);
        format!("{hash:x}")
    }
}

/// An unsigned transaction plus one signer's signature, as written by an
/// external signing tool. The unsigned payload is embedded whole so the
/// combine step can re-verify it offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: UnsignedTransaction,
    pub signature: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSignature {
    pub signer_address: String,
    pub signature: Vec<String>,
}

/// The multisig-ready result of combining independently signed artifacts.
/// Signature order is the caller-supplied signer order, which must match
/// the ordering the target multisig account verifies against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedTransaction {
    #[serde(flatten)]
    pub transaction: UnsignedTransaction,
    pub signatures: Vec<SignerSignature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> UnsignedTransaction {
        UnsignedTransaction {
            tx_type: TxType::Invoke,
            version: TX_VERSION.to_string(),
            sender_address: "0xabc".to_string(),
            nonce: "0x1".to_string(),
            calls: vec![Call {
                contract_address: "0xdef".to_string(),
                entry_point: "transfer".to_string(),
                calldata: vec!["0x1".to_string(), "0x2".to_string()],
            }],
            resource_bounds: ResourceBoundsMapping::default(),
            tip: "0x0".to_string(),
            paymaster_data: vec![],
            account_deployment_data: vec![],
            nonce_data_availability_mode: DataAvailabilityMode::L1,
            fee_data_availability_mode: DataAvailabilityMode::L1,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn digest_ignores_timestamp() {
        let tx = sample_tx();
        let mut later = tx.clone();
        later.timestamp += 60_000;

        assert_eq!(tx.canonical_digest(), later.canonical_digest());
    }

    #[test]
    fn digest_tracks_canonical_fields() {
        let tx = sample_tx();
        let mut other = tx.clone();
        other.nonce = "0x2".to_string();

        assert_ne!(tx.canonical_digest(), other.canonical_digest());
    }

    #[test]
    fn canonical_value_strips_timestamp_only() {
        let value = sample_tx().canonical_value();
        let map = value.as_object().unwrap();

        assert!(map.get("timestamp").is_none());
        for field in CANONICAL_FIELDS {
            assert!(map.get(field).is_some(), "missing canonical field {field}");
        }
    }

    #[test]
    fn tx_type_uses_wire_names() {
        let json = serde_json::to_value(TxType::Invoke).unwrap();
        assert_eq!(json, serde_json::json!("INVOKE"));
        let json = serde_json::to_value(TxType::Declare).unwrap();
        assert_eq!(json, serde_json::json!("DECLARE"));
    }

    #[test]
    fn signed_transaction_flattens_unsigned_payload() {
        let signed = SignedTransaction {
            transaction: sample_tx(),
            signature: vec!["0xaa".to_string(), "0xbb".to_string()],
        };

        let value = serde_json::to_value(&signed).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.get("sender_address").unwrap(), "0xabc");
        assert_eq!(
            map.get("signature").unwrap(),
            &serde_json::json!(["0xaa", "0xbb"])
        );

        let back: SignedTransaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, signed);
    }
}
