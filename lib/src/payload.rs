use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transaction::Call;

/// Chain-specific call encodings behind one calldata interface.
///
/// Starknet calls carry felt hex strings natively; CosmWasm execute
/// messages are JSON and Stellar invocations are base64 XDR, both packed
/// into a single hex calldata element. The core only ever sees the flat
/// calldata, so chain-specific structs stop at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chain", content = "payload", rename_all = "lowercase")]
pub enum CallPayload {
    Starknet(Vec<String>),
    Cosmwasm(serde_json::Value),
    Stellar(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Starknet,
    Cosmwasm,
    Stellar,
}

impl CallPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Starknet(_) => PayloadKind::Starknet,
            Self::Cosmwasm(_) => PayloadKind::Cosmwasm,
            Self::Stellar(_) => PayloadKind::Stellar,
        }
    }

    /// Compiles the payload into flat calldata.
    pub fn compile(&self) -> Result<Vec<String>> {
        match self {
            Self::Starknet(felts) => {
                for (index, felt) in felts.iter().enumerate() {
                    if !is_hex_felt(felt) {
                        return Err(Error::validation(format!(
                            "starknet calldata element {index} is not a 0x-prefixed hex felt: {felt:?}"
                        )));
                    }
                }
                Ok(felts.clone())
            }
            Self::Cosmwasm(msg) => {
                let bytes = serde_json::to_vec(msg).map_err(|e| {
                    Error::validation(format!("cosmwasm message does not serialize: {e}"))
                })?;
                Ok(vec![format!("0x{}", hex::encode(bytes))])
            }
            Self::Stellar(xdr) => {
                if xdr.is_empty() {
                    return Err(Error::validation("stellar payload must not be empty"));
                }
                Ok(vec![format!("0x{}", hex::encode(xdr.as_bytes()))])
            }
        }
    }

    /// Recovers a payload from flat calldata produced by [`Self::compile`].
    pub fn decode(kind: PayloadKind, calldata: &[String]) -> Result<Self> {
        match kind {
            PayloadKind::Starknet => {
                let payload = Self::Starknet(calldata.to_vec());
                payload.compile()?;
                Ok(payload)
            }
            PayloadKind::Cosmwasm => {
                let bytes = single_element_bytes(calldata)?;
                let msg = serde_json::from_slice(&bytes).map_err(|e| {
                    Error::validation(format!("calldata does not hold a cosmwasm JSON message: {e}"))
                })?;
                Ok(Self::Cosmwasm(msg))
            }
            PayloadKind::Stellar => {
                let bytes = single_element_bytes(calldata)?;
                let xdr = String::from_utf8(bytes).map_err(|e| {
                    Error::validation(format!("calldata does not hold a stellar payload: {e}"))
                })?;
                Ok(Self::Stellar(xdr))
            }
        }
    }
}

fn single_element_bytes(calldata: &[String]) -> Result<Vec<u8>> {
    let [element] = calldata else {
        return Err(Error::validation(format!(
            "expected exactly one packed calldata element, got {}",
            calldata.len()
        )));
    };
    let stripped = element.strip_prefix("0x").ok_or_else(|| {
        Error::validation(format!("calldata element is not 0x-prefixed: {element:?}"))
    })?;
    hex::decode(stripped)
        .map_err(|e| Error::validation(format!("calldata element is not valid hex: {e}")))
}

fn is_hex_felt(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()))
}

/// One entry of a CLI calls file: target plus chain-tagged payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSpec {
    pub contract_address: String,
    pub entry_point: String,
    #[serde(flatten)]
    pub payload: CallPayload,
}

impl CallSpec {
    pub fn into_call(self) -> Result<Call> {
        let calldata = self.payload.compile()?;
        Ok(Call {
            contract_address: self.contract_address,
            entry_point: self.entry_point,
            calldata,
        })
    }
}
