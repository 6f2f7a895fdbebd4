use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Per-chain contract roles. Each chain must have exactly one of each, so
/// an address shared across chains for the same role is always a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractRole {
    Prover,
    Verifier,
    Gateway,
}

impl std::fmt::Display for ContractRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prover => write!(f, "prover"),
            Self::Verifier => write!(f, "verifier"),
            Self::Gateway => write!(f, "gateway"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverMismatch {
    pub chain: String,
    pub expected: String,
    pub actual: String,
}

/// One address registered for the same role by two or more distinct chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateViolation {
    pub role: ContractRole,
    pub address: String,
    pub chains: Vec<String>,
}

/// The per-chain contract addresses a deployment advertises. Prover is
/// optional: chains onboard before a prover is instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContractSet {
    pub chain_name: String,
    pub prover_address: Option<String>,
    pub verifier_address: String,
    pub gateway_address: String,
}

/// A chain registered with the router but unknown to the coordinator is
/// normal during incremental rollout, so it is informational by default.
/// Set `flag_router_gaps` to treat it as a violation instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckPolicy {
    pub flag_router_gaps: bool,
}

/// Point-in-time divergence report across the three snapshots. Divergence
/// is data, not a fault: the checker never errors for it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsistencyReport {
    pub missing_in_multisig: Vec<String>,
    pub prover_mismatches: Vec<ProverMismatch>,
    pub duplicate_violations: Vec<DuplicateViolation>,
    pub router_only: Vec<String>,
    #[serde(skip)]
    router_gaps_flagged: bool,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_in_multisig.is_empty()
            && self.prover_mismatches.is_empty()
            && self.duplicate_violations.is_empty()
            && (!self.router_gaps_flagged || self.router_only.is_empty())
    }

    /// Folds address-uniqueness findings into the report, so
    /// [`Self::is_consistent`] covers them.
    pub fn record_duplicates(&mut self, violations: Vec<DuplicateViolation>) {
        self.duplicate_violations.extend(violations);
    }
}

/// Cross-references the router chain list against the coordinator's and the
/// multisig's per-chain prover registrations.
///
/// Every chain the coordinator knows must be registered with the multisig,
/// and with the same prover address. The reverse direction (router knows a
/// chain the coordinator does not) follows `policy`.
pub fn check(
    router_chains: &BTreeSet<String>,
    coordinator: &BTreeMap<String, String>,
    multisig: &BTreeMap<String, String>,
    policy: &CheckPolicy,
) -> ConsistencyReport {
    let mut report = ConsistencyReport {
        router_gaps_flagged: policy.flag_router_gaps,
        ..Default::default()
    };

    for (chain, expected) in coordinator {
        match multisig.get(chain) {
            None => report.missing_in_multisig.push(chain.clone()),
            Some(actual) if actual != expected => report.prover_mismatches.push(ProverMismatch {
                chain: chain.clone(),
                expected: expected.clone(),
                actual: actual.clone(),
            }),
            Some(_) => {}
        }
    }

    for chain in router_chains {
        if !coordinator.contains_key(chain) {
            report.router_only.push(chain.clone());
        }
    }

    report
}

/// Flags any prover/verifier/gateway address registered by two or more
/// distinct chains. Chains without a prover address never group with each
/// other. Output is deterministic: roles in declaration order, addresses
/// sorted, chain lists sorted.
pub fn check_uniqueness(sets: &[ChainContractSet]) -> Vec<DuplicateViolation> {
    let mut violations = Vec::new();

    for role in [
        ContractRole::Prover,
        ContractRole::Verifier,
        ContractRole::Gateway,
    ] {
        let mut by_address: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for set in sets {
            let address = match role {
                ContractRole::Prover => match set.prover_address.as_deref() {
                    Some(address) => address,
                    None => continue,
                },
                ContractRole::Verifier => set.verifier_address.as_str(),
                ContractRole::Gateway => set.gateway_address.as_str(),
            };
            by_address
                .entry(address)
                .or_default()
                .insert(set.chain_name.as_str());
        }

        for (address, chains) in by_address {
            if chains.len() > 1 {
                violations.push(DuplicateViolation {
                    role,
                    address: address.to_string(),
                    chains: chains.into_iter().map(str::to_string).collect(),
                });
            }
        }
    }

    violations
}
