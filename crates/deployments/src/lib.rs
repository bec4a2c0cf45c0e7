//! Persisted mapping from logical deployment names to on-chain addresses.
//!
//! The store is a JSON file shared with other tooling, keyed by chain id and
//! then by the logical name a contract was deployed under. Deployments only
//! ever append to it or overwrite an existing name; nothing deletes entries.

use {
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        io,
        path::{Path, PathBuf},
    },
    web3::types::{H160, H256},
};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read deployments file {path:?}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write deployments file {path:?}")]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed deployments file {path:?}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One recorded deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub address: H160,
    /// Creation transaction, when the deploying toolchain reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<H256>,
}

/// All recorded deployments of one file: chain id -> logical name -> entry.
type Networks = BTreeMap<String, BTreeMap<String, Deployment>>;

/// Handle on the deployments file for one chain.
#[derive(Clone, Debug)]
pub struct DeploymentStore {
    path: PathBuf,
    chain_id: u64,
}

impl DeploymentStore {
    pub fn new(path: impl Into<PathBuf>, chain_id: u64) -> Self {
        Self {
            path: path.into(),
            chain_id,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up the current address recorded under a logical name.
    pub fn address_of(&self, name: &str) -> Result<Option<H160>, RegistryError> {
        Ok(self
            .load()?
            .get(&self.chain_id.to_string())
            .and_then(|network| network.get(name))
            .map(|deployment| deployment.address))
    }

    /// Looks up several logical names at once, with a per-name absent
    /// indication for entries that were never recorded.
    pub fn addresses_of(&self, names: &[&str]) -> Result<Vec<Option<H160>>, RegistryError> {
        let networks = self.load()?;
        let network = networks.get(&self.chain_id.to_string());
        Ok(names
            .iter()
            .map(|name| {
                network
                    .and_then(|network| network.get(*name))
                    .map(|deployment| deployment.address)
            })
            .collect())
    }

    /// Records a deployment under a logical name. An existing entry for the
    /// same name is overwritten (last writer wins).
    pub fn record(&self, name: &str, deployment: Deployment) -> Result<(), RegistryError> {
        let mut networks = self.load()?;
        networks
            .entry(self.chain_id.to_string())
            .or_default()
            .insert(name.to_string(), deployment);
        let json =
            serde_json::to_string_pretty(&networks).map_err(|source| RegistryError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, json).map_err(|source| RegistryError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// A missing file reads as an empty store so that the first deployment
    /// against a fresh network does not need a seed file.
    fn load(&self) -> Result<Networks, RegistryError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Networks::default()),
            Err(source) => {
                return Err(RegistryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&json).map_err(|source| RegistryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}
