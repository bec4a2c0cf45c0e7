//! The single primitive that performs an on-chain contract deployment.
//!
//! The production implementation shells out to `forge create` and captures
//! its output verbatim. The outcome deliberately stays an opaque
//! pass-through of the toolchain's streams: callers derive success from the
//! captured stderr alone and treat the diagnostic text as operator-facing,
//! never parsed.

use {
    crate::{
        env::{DeployEnv, Sender},
        tasks::Artifact,
    },
    anyhow::{Context as _, Result},
    async_trait::async_trait,
    devnode::DevNodeApi,
    serde::Deserialize,
    std::path::PathBuf,
    web3::types::{H160, H256, U256},
};

/// A fully resolved deployment: the environment merged with the fields the
/// task contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub env: DeployEnv,
    /// Logical name the resulting address is recorded under. Distinct from
    /// the artifact symbol so one contract type can live under several
    /// names.
    pub name: String,
    pub artifact: Artifact,
    /// Ordered to match the contract's constructor signature; not validated
    /// here, a mismatch fails at execution time.
    pub constructor_args: Vec<String>,
}

/// Raw result of one deployment attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentOutcome {
    /// Success payload decoded from the toolchain's stdout, when present.
    pub result: Option<Deployed>,
    /// Captured diagnostics; non-empty exactly when the underlying call
    /// signaled failure.
    pub stderr: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Deployed {
    #[serde(rename = "deployedTo")]
    pub address: H160,
    #[serde(rename = "transactionHash")]
    pub transaction: H256,
}

#[async_trait]
pub trait Create: Send + Sync {
    async fn create(&self, request: &DeploymentRequest) -> Result<DeploymentOutcome>;
}

/// Deploys contracts by invoking `forge create`.
pub struct ForgeCreate {
    forge: PathBuf,
}

impl ForgeCreate {
    pub fn new(forge: impl Into<PathBuf>) -> Self {
        Self {
            forge: forge.into(),
        }
    }
}

#[async_trait]
impl Create for ForgeCreate {
    async fn create(&self, request: &DeploymentRequest) -> Result<DeploymentOutcome> {
        let env = &request.env;
        if let Sender::Unlocked { address, fund } = &env.sender {
            prepare_dev_account(env, address, *fund).await?;
        }

        let mut command = tokio::process::Command::new(&self.forge);
        command
            .current_dir(&env.contracts_root)
            .arg("create")
            .arg(request.artifact.reference())
            .arg("--json")
            .arg("--rpc-url")
            .arg(env.rpc_url.as_str());
        match &env.sender {
            Sender::PrivateKey(key) => {
                command.arg("--private-key").arg(key);
            }
            Sender::Unlocked { address, .. } => {
                command
                    .arg("--unlocked")
                    .arg("--from")
                    .arg(format!("{address:#x}"));
            }
        }
        if let Some(gas_price) = env.gas_price {
            command.arg("--gas-price").arg(gas_price.to_string());
        }
        if !request.constructor_args.is_empty() {
            command
                .arg("--constructor-args")
                .args(&request.constructor_args);
        }

        tracing::debug!(
            name = %request.name,
            artifact = %request.artifact.reference(),
            "submitting contract creation"
        );
        let output = command
            .output()
            .await
            .with_context(|| format!("failed to run {:?}", self.forge))?;
        Ok(outcome(
            output.status.success(),
            &output.stdout,
            &output.stderr,
        ))
    }
}

fn outcome(exited_ok: bool, stdout: &[u8], stderr: &[u8]) -> DeploymentOutcome {
    let mut stderr = String::from_utf8_lossy(stderr).trim().to_string();
    if stderr.is_empty() && !exited_ok {
        // The toolchain failed without diagnostics; the empty-stderr success
        // predicate still has to see a failure.
        stderr = "toolchain exited unsuccessfully without diagnostics".to_string();
    }
    DeploymentOutcome {
        result: parse_deployed(&String::from_utf8_lossy(stdout)),
        stderr,
    }
}

/// Picks the deployment payload out of the toolchain's stdout. Compiler
/// progress lines precede the JSON object, so every line is tried.
fn parse_deployed(stdout: &str) -> Option<Deployed> {
    stdout
        .lines()
        .find_map(|line| serde_json::from_str(line.trim()).ok())
}

async fn prepare_dev_account(env: &DeployEnv, address: &H160, fund: Option<U256>) -> Result<()> {
    let transport = web3::transports::Http::new(env.rpc_url.as_str())
        .context("failed to create node transport")?;
    let api = web3::Web3::new(transport).api::<DevNodeApi<_>>();
    api.impersonate_account(address)
        .await
        .context("node must support hardhat_impersonateAccount")?;
    if let Some(balance) = fund {
        api.set_balance(address, balance)
            .await
            .context("node must support hardhat_setBalance")?;
    }
    Ok(())
}
