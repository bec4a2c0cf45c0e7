use {
    crate::env::{DeployEnv, Sender},
    anyhow::{Result, bail},
    clap::Parser,
    std::path::PathBuf,
    tracing::level_filters::LevelFilter,
    url::Url,
    web3::types::{H160, U256},
};

#[derive(Parser)]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Private key of the deploying account.
    #[clap(long, env, conflicts_with = "impersonate")]
    pub sender_key: Option<String>,

    /// Deploy from this impersonated account instead of signing with a
    /// private key. Only works against a development node.
    #[clap(long, env)]
    pub impersonate: Option<H160>,

    /// Balance in wei to give the impersonated account before deploying.
    #[clap(long, env, requires = "impersonate")]
    pub fund: Option<u128>,

    /// Gas price in wei for the creation transaction. Uses the node's
    /// estimate when unset.
    #[clap(long, env)]
    pub gas_price: Option<u128>,

    /// Directory containing the Solidity sources and the toolchain
    /// configuration.
    #[clap(long, env, default_value = ".")]
    pub contracts_root: PathBuf,

    /// Path of the persisted logical-name-to-address mapping.
    #[clap(long, env, default_value = "deployments.json")]
    pub deployments_file: PathBuf,

    /// The forge binary used to create contracts.
    #[clap(long, env, default_value = "forge")]
    pub forge: PathBuf,

    #[clap(long, env, default_value = "warn,deployer=debug")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// The deployment task to run: the task name followed by the task's
    /// own options, e.g. `bonding-share -m 0x...`.
    #[clap(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
    pub task: Vec<String>,
}

impl Arguments {
    /// Builds the explicit deployment context threaded through every layer.
    pub fn deploy_env(&self) -> Result<DeployEnv> {
        let sender = match (&self.sender_key, self.impersonate) {
            (Some(key), None) => Sender::PrivateKey(key.clone()),
            (None, Some(address)) => Sender::Unlocked {
                address,
                fund: self.fund.map(U256::from),
            },
            (None, None) => bail!("either --sender-key or --impersonate is required"),
            // clap already rejects the combination.
            (Some(_), Some(_)) => unreachable!(),
        };
        Ok(DeployEnv {
            rpc_url: self.node_url.clone(),
            sender,
            gas_price: self.gas_price.map(U256::from),
            contracts_root: self.contracts_root.clone(),
        })
    }
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "node_url: {}", self.node_url)?;
        writeln!(
            f,
            "sender_key: {}",
            self.sender_key.as_deref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "impersonate: {:?}", self.impersonate)?;
        writeln!(f, "fund: {:?}", self.fund)?;
        writeln!(f, "gas_price: {:?}", self.gas_price)?;
        writeln!(f, "contracts_root: {:?}", self.contracts_root)?;
        writeln!(f, "deployments_file: {:?}", self.deployments_file)?;
        writeln!(f, "forge: {:?}", self.forge)?;
        writeln!(f, "log_filter: {}", self.log_filter)?;
        writeln!(f, "log_stderr_threshold: {}", self.log_stderr_threshold)?;
        writeln!(f, "task: {:?}", self.task)?;
        Ok(())
    }
}
