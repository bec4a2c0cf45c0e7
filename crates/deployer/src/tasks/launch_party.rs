//! Deployment tasks for the launch-party contract set.
//!
//! The names here line up with the logical names the on-chain read side
//! resolves, so a deployment becomes visible to downstream consumers
//! without any renaming step.

use {
    super::{Artifact, TaskDescriptor},
    crate::{
        env::DeployEnv,
        executor::DeploymentRequest,
        resolver::{OptionSpec, ResolvedArgs},
    },
    anyhow::{Context as _, Result},
};

const PLAIN_OPTIONS: &[OptionSpec] = &[OptionSpec::positional("task")];

const BOND_OPTIONS: &[OptionSpec] = &[
    OptionSpec::positional("task"),
    OptionSpec::flag("reward-token", 'r'),
];

pub const UBIQUI_STICK: TaskDescriptor = TaskDescriptor {
    name: "ubiqui-stick",
    artifact: Artifact {
        file: "src/launch-party/UbiquiStick.sol",
        name: "UbiquiStick",
    },
    options: PLAIN_OPTIONS,
    build: ubiqui_stick,
};

pub const UBIQUI_STICK_SALE: TaskDescriptor = TaskDescriptor {
    name: "ubiqui-stick-sale",
    artifact: Artifact {
        file: "src/launch-party/UbiquiStickSale.sol",
        name: "UbiquiStickSale",
    },
    options: PLAIN_OPTIONS,
    build: ubiqui_stick_sale,
};

pub const SIMPLE_BOND: TaskDescriptor = TaskDescriptor {
    name: "simple-bond",
    artifact: Artifact {
        file: "src/launch-party/SimpleBond.sol",
        name: "SimpleBond",
    },
    options: BOND_OPTIONS,
    build: simple_bond,
};

fn ubiqui_stick(env: &DeployEnv, args: &ResolvedArgs) -> Result<DeploymentRequest> {
    plain(env, args, UBIQUI_STICK.artifact)
}

fn ubiqui_stick_sale(env: &DeployEnv, args: &ResolvedArgs) -> Result<DeploymentRequest> {
    plain(env, args, UBIQUI_STICK_SALE.artifact)
}

fn simple_bond(env: &DeployEnv, args: &ResolvedArgs) -> Result<DeploymentRequest> {
    let task = args.get("task").context("task option not resolved")?;
    let reward_token = args
        .get("reward-token")
        .context("reward-token option not resolved")?;
    Ok(DeploymentRequest {
        env: env.clone(),
        name: task.to_string(),
        artifact: SIMPLE_BOND.artifact,
        constructor_args: vec![reward_token.to_string()],
    })
}

/// Request shape for contracts whose constructor takes no arguments.
fn plain(env: &DeployEnv, args: &ResolvedArgs, artifact: Artifact) -> Result<DeploymentRequest> {
    let task = args.get("task").context("task option not resolved")?;
    Ok(DeploymentRequest {
        env: env.clone(),
        name: task.to_string(),
        artifact,
        constructor_args: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use {super::*, crate::env::Sender, url::Url};

    fn env() -> DeployEnv {
        DeployEnv {
            rpc_url: Url::parse("http://localhost:8545").unwrap(),
            sender: Sender::PrivateKey("0xkey".to_string()),
            gas_price: None,
            contracts_root: ".".into(),
        }
    }

    #[test]
    fn stick_requests_have_no_constructor_arguments() {
        let args: ResolvedArgs = [("task", "ubiqui-stick".to_string())].into_iter().collect();
        let request = (UBIQUI_STICK.build)(&env(), &args).unwrap();
        assert_eq!(request.name, "ubiqui-stick");
        assert!(request.constructor_args.is_empty());
    }

    #[test]
    fn bond_request_carries_the_reward_token() {
        let args: ResolvedArgs = [
            ("task", "simple-bond".to_string()),
            ("reward-token", "0x5555555555555555555555555555555555555555".to_string()),
        ]
        .into_iter()
        .collect();
        let request = (SIMPLE_BOND.build)(&env(), &args).unwrap();
        assert_eq!(
            request.constructor_args,
            vec!["0x5555555555555555555555555555555555555555"]
        );
    }
}
