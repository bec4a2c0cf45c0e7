//! The registry of deployable contracts.
//!
//! Each entry is a declarative descriptor: the contract artifact, the
//! options its invocation accepts, and a pure function shaping the resolved
//! options into a deployment request. One generic runner drives all of
//! them; adding a contract means adding a descriptor here, not a new
//! binary.

pub mod dollar;
pub mod launch_party;

use crate::{
    env::DeployEnv,
    executor::DeploymentRequest,
    resolver::{OptionSpec, ResolvedArgs},
};

/// Reference to a compiled contract, qualified by its source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file: &'static str,
    pub name: &'static str,
}

impl Artifact {
    /// The `<source-path>:<ContractSymbol>` form the deploying toolchain
    /// resolves to bytecode and ABI.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.file, self.name)
    }
}

/// Declarative description of one deployable contract.
pub struct TaskDescriptor {
    /// Unique task name; also the logical registry name the deployed
    /// address is recorded under.
    pub name: &'static str,
    pub artifact: Artifact,
    pub options: &'static [OptionSpec],
    /// Pure mapping from the resolved options to a deployment request; all
    /// side effects belong to the executor, which keeps descriptors
    /// testable without a network.
    pub build: fn(&DeployEnv, &ResolvedArgs) -> anyhow::Result<DeploymentRequest>,
}

pub static REGISTRY: &[TaskDescriptor] = &[
    dollar::BONDING_SHARE,
    dollar::EXCESS_DOLLAR_DISTRIBUTOR,
    dollar::DOLLAR_MINTING_CALCULATOR,
    launch_party::UBIQUI_STICK,
    launch_party::UBIQUI_STICK_SALE,
    launch_party::SIMPLE_BOND,
];

pub fn find(name: &str) -> Option<&'static TaskDescriptor> {
    REGISTRY.iter().find(|descriptor| descriptor.name == name)
}

pub fn names() -> Vec<&'static str> {
    REGISTRY.iter().map(|descriptor| descriptor.name).collect()
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashSet};

    #[test]
    fn task_names_are_unique() {
        let mut seen = HashSet::new();
        for descriptor in REGISTRY {
            assert!(seen.insert(descriptor.name), "duplicate task {}", descriptor.name);
        }
    }

    #[test]
    fn option_schemas_are_well_formed() {
        for descriptor in REGISTRY {
            let mut names = HashSet::new();
            let mut aliases = HashSet::new();
            let mut defaults = 0;
            for option in descriptor.options {
                assert!(
                    names.insert(option.name),
                    "duplicate option {} in {}",
                    option.name,
                    descriptor.name
                );
                if let Some(alias) = option.alias {
                    assert!(
                        aliases.insert(alias),
                        "duplicate alias {alias} in {}",
                        descriptor.name
                    );
                }
                defaults += usize::from(option.default_option);
            }
            assert!(
                defaults <= 1,
                "{} marks more than one default option",
                descriptor.name
            );
        }
    }

    #[test]
    fn artifact_reference_is_source_qualified() {
        assert_eq!(
            dollar::BONDING_SHARE.artifact.reference(),
            "src/dollar/BondingShare.sol:BondingShare"
        );
    }
}
