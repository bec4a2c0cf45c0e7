//! Deployment tasks for the core dollar contracts.
//!
//! All of them take the protocol manager as their single constructor
//! argument, so they share one option schema and one request shape.

use {
    super::{Artifact, TaskDescriptor},
    crate::{
        env::DeployEnv,
        executor::DeploymentRequest,
        resolver::{OptionSpec, ResolvedArgs},
    },
    anyhow::{Context as _, Result},
};

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::positional("task"),
    OptionSpec::flag("manager", 'm'),
];

pub const BONDING_SHARE: TaskDescriptor = TaskDescriptor {
    name: "bonding-share",
    artifact: Artifact {
        file: "src/dollar/BondingShare.sol",
        name: "BondingShare",
    },
    options: OPTIONS,
    build: bonding_share,
};

pub const EXCESS_DOLLAR_DISTRIBUTOR: TaskDescriptor = TaskDescriptor {
    name: "excess-dollar-distributor",
    artifact: Artifact {
        file: "src/dollar/ExcessDollarDistributor.sol",
        name: "ExcessDollarDistributor",
    },
    options: OPTIONS,
    build: excess_dollar_distributor,
};

pub const DOLLAR_MINTING_CALCULATOR: TaskDescriptor = TaskDescriptor {
    name: "dollar-minting-calculator",
    artifact: Artifact {
        file: "src/dollar/DollarMintingCalculator.sol",
        name: "DollarMintingCalculator",
    },
    options: OPTIONS,
    build: dollar_minting_calculator,
};

fn bonding_share(env: &DeployEnv, args: &ResolvedArgs) -> Result<DeploymentRequest> {
    managed(env, args, BONDING_SHARE.artifact)
}

fn excess_dollar_distributor(env: &DeployEnv, args: &ResolvedArgs) -> Result<DeploymentRequest> {
    managed(env, args, EXCESS_DOLLAR_DISTRIBUTOR.artifact)
}

fn dollar_minting_calculator(env: &DeployEnv, args: &ResolvedArgs) -> Result<DeploymentRequest> {
    managed(env, args, DOLLAR_MINTING_CALCULATOR.artifact)
}

/// Request shape shared by every manager-constructed dollar contract.
fn managed(env: &DeployEnv, args: &ResolvedArgs, artifact: Artifact) -> Result<DeploymentRequest> {
    let task = args.get("task").context("task option not resolved")?;
    let manager = args.get("manager").context("manager option not resolved")?;
    Ok(DeploymentRequest {
        env: env.clone(),
        name: task.to_string(),
        artifact,
        constructor_args: vec![manager.to_string()],
    })
}
