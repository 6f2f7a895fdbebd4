use crate::error::{Error, Result};
use crate::transaction::{
    Call, DataAvailabilityMode, ResourceBoundsMapping, TxType, UnsignedTransaction, TX_VERSION,
};

/// Auxiliary envelope fields. The defaults match what account contracts
/// expect for a plain invoke with no paymaster involvement.
#[derive(Debug, Clone)]
pub struct TxOptions {
    pub tx_type: TxType,
    pub tip: String,
    pub paymaster_data: Vec<String>,
    pub account_deployment_data: Vec<String>,
    pub nonce_data_availability_mode: DataAvailabilityMode,
    pub fee_data_availability_mode: DataAvailabilityMode,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            tx_type: TxType::Invoke,
            tip: "0x0".to_string(),
            paymaster_data: vec![],
            account_deployment_data: vec![],
            nonce_data_availability_mode: DataAvailabilityMode::L1,
            fee_data_availability_mode: DataAvailabilityMode::L1,
        }
    }
}

/// Builds the canonical unsigned-transaction envelope.
///
/// Pure: no I/O, no chain queries. The nonce in particular must be supplied
/// by the caller; fetching it would require network access this component
/// does not have.
pub fn build_unsigned_transaction(
    sender_address: &str,
    calls: Vec<Call>,
    nonce: &str,
    resource_bounds: ResourceBoundsMapping,
    options: TxOptions,
) -> Result<UnsignedTransaction> {
    if sender_address.is_empty() {
        return Err(Error::validation("sender_address must not be empty"));
    }
    if nonce.is_empty() {
        return Err(Error::validation(
            "nonce must be set explicitly, it is never fetched from the chain",
        ));
    }
    if calls.is_empty() {
        return Err(Error::validation("at least one call is required"));
    }

    Ok(UnsignedTransaction {
        tx_type: options.tx_type,
        version: TX_VERSION.to_string(),
        sender_address: sender_address.to_string(),
        nonce: nonce.to_string(),
        calls,
        resource_bounds,
        tip: options.tip,
        paymaster_data: options.paymaster_data,
        account_deployment_data: options.account_deployment_data,
        nonce_data_availability_mode: options.nonce_data_availability_mode,
        fee_data_availability_mode: options.fee_data_availability_mode,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}
