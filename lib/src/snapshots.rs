use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::read_json;

/// Materialized result of a router `chains` query. The RPC round-trip
/// happens upstream; the checker only ever sees this plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSnapshot {
    pub chains: BTreeSet<String>,
}

/// Materialized chain → prover-address map, as answered by either the
/// coordinator or the multisig contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverSnapshot {
    pub provers: BTreeMap<String, String>,
}

impl RouterSnapshot {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

impl ProverSnapshot {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_json(path)
    }
}
