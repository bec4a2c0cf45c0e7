//! The network and signer context a deployment runs against.
//!
//! Built once from the command line in `main` and passed by parameter
//! through every layer; tasks never reach for ambient global state.

use {
    std::path::PathBuf,
    url::Url,
    web3::types::{H160, U256},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployEnv {
    /// The node the creation transaction is submitted to.
    pub rpc_url: Url,
    pub sender: Sender,
    /// Gas price in wei; the node's estimate is used when unset.
    pub gas_price: Option<U256>,
    /// Directory holding the Solidity sources and toolchain configuration.
    pub contracts_root: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    /// Sign the creation transaction with a raw private key.
    PrivateKey(String),
    /// Send from an impersonated unlocked account. Only works against a
    /// development node; the account is impersonated (and optionally funded)
    /// right before the deployment.
    Unlocked { address: H160, fund: Option<U256> },
}
