use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consistency::ChainContractSet;
use crate::error::{Error, Result};
use crate::persistence::read_json;

/// Immutable snapshot of a deployment environment file: which contracts are
/// live on which chain. Loaded by value; updates produce a new snapshot and
/// the caller decides whether to persist it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub chains: BTreeMap<String, ChainDeployment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDeployment {
    pub chain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc: Option<String>,
    pub contracts: ChainContracts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContracts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multisig_prover: Option<ContractDeployment>,
    pub voting_verifier: ContractDeployment,
    pub gateway: ContractDeployment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDeployment {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_id: Option<u64>,
}

impl DeploymentConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Unknown chains are a caller bug; the error lists what is known so an
    /// operator can spot a typo without opening the config.
    pub fn get_chain(&self, name: &str) -> Result<&ChainDeployment> {
        self.chains.get(name).ok_or_else(|| {
            let known: Vec<_> = self.chains.keys().collect();
            Error::validation(format!("unknown chain {name:?}, known chains: {known:?}"))
        })
    }

    /// Adapts the snapshot into the per-chain contract sets the uniqueness
    /// check consumes.
    pub fn contract_sets(&self) -> Vec<ChainContractSet> {
        self.chains
            .iter()
            .map(|(chain_name, deployment)| ChainContractSet {
                chain_name: chain_name.clone(),
                prover_address: deployment
                    .contracts
                    .multisig_prover
                    .as_ref()
                    .map(|c| c.address.clone()),
                verifier_address: deployment.contracts.voting_verifier.address.clone(),
                gateway_address: deployment.contracts.gateway.address.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> DeploymentConfig {
        serde_json::from_value(serde_json::json!({
            "chains": {
                "avax": {
                    "chain_id": "43114",
                    "contracts": {
                        "multisig_prover": {"address": "0xPA", "code_id": 12},
                        "voting_verifier": {"address": "0xVA"},
                        "gateway": {"address": "0xGA"}
                    }
                },
                "eth": {
                    "chain_id": "1",
                    "rpc": "https://eth.example",
                    "contracts": {
                        "voting_verifier": {"address": "0xVE"},
                        "gateway": {"address": "0xGE"}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn get_chain_resolves_known_chain() {
        let config = sample_config();
        let chain = config.get_chain("eth").unwrap();
        assert_eq!(chain.chain_id, "1");
        assert_eq!(chain.rpc.as_deref(), Some("https://eth.example"));
    }

    #[test]
    fn unknown_chain_error_lists_known_chains() {
        let config = sample_config();
        let err = config.get_chain("optimism").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("optimism"));
        assert!(message.contains("avax"));
        assert!(message.contains("eth"));
    }

    #[test]
    fn contract_sets_carry_optional_prover() {
        let sets = sample_config().contract_sets();

        assert_eq!(sets.len(), 2);
        let avax = sets.iter().find(|s| s.chain_name == "avax").unwrap();
        assert_eq!(avax.prover_address.as_deref(), Some("0xPA"));
        let eth = sets.iter().find(|s| s.chain_name == "eth").unwrap();
        assert_eq!(eth.prover_address, None);
        assert_eq!(eth.gateway_address, "0xGE");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = sample_config();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: DeploymentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
