//! Orchestration of one full deployment invocation.

use {
    crate::{
        env::DeployEnv,
        executor::{Create, DeploymentOutcome},
        resolver::{self, ResolutionError},
        tasks,
    },
    deployments::{Deployment, DeploymentStore, RegistryError},
    std::fmt,
};

/// Final status of one task invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Failed,
}

impl TaskStatus {
    /// Status derivation is total over outcomes: a non-empty diagnostic is
    /// a failure, anything else succeeded, regardless of the result
    /// payload.
    pub fn of(outcome: &DeploymentOutcome) -> Self {
        if outcome.stderr.is_empty() {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::Failed => 1,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Runs one task end-to-end: select the descriptor, resolve the tokens
/// against its schema, build the request, execute, reduce to a status.
///
/// No retry happens here; re-invocation with adjusted parameters is the
/// caller's recovery path. A failed deployment records nothing.
pub async fn run_task(
    env: &DeployEnv,
    store: &DeploymentStore,
    executor: &dyn Create,
    tokens: &[String],
) -> Result<TaskStatus, TaskError> {
    let name = tokens.first().ok_or(ResolutionError::MissingTask)?;
    let descriptor = tasks::find(name).ok_or_else(|| ResolutionError::UnknownTask {
        name: name.clone(),
        known: tasks::names(),
    })?;
    let resolved = resolver::resolve(descriptor.options, tokens)?;
    let request = (descriptor.build)(env, &resolved)?;

    let outcome = executor.create(&request).await?;
    let status = TaskStatus::of(&outcome);
    match status {
        TaskStatus::Succeeded => match &outcome.result {
            Some(deployed) => {
                store.record(
                    &request.name,
                    Deployment {
                        address: deployed.address,
                        transaction: Some(deployed.transaction),
                    },
                )?;
                tracing::info!(
                    name = %request.name,
                    address = ?deployed.address,
                    "contract deployed"
                );
            }
            None => tracing::warn!(
                name = %request.name,
                "toolchain reported success but no deployed address could be decoded; \
                 nothing recorded"
            ),
        },
        TaskStatus::Failed => {
            tracing::error!(name = %request.name, "deployment failed:\n{}", outcome.stderr);
        }
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::executor::Deployed, web3::types::H160};

    #[test]
    fn status_derivation_is_total() {
        let some = Some(Deployed {
            address: H160::repeat_byte(0x22),
            transaction: Default::default(),
        });
        for result in [None, some] {
            assert_eq!(
                TaskStatus::of(&DeploymentOutcome {
                    result,
                    stderr: String::new(),
                }),
                TaskStatus::Succeeded
            );
            assert_eq!(
                TaskStatus::of(&DeploymentOutcome {
                    result,
                    stderr: "insufficient funds".to_string(),
                }),
                TaskStatus::Failed
            );
        }
    }

    #[test]
    fn status_strings_and_exit_codes() {
        assert_eq!(TaskStatus::Succeeded.to_string(), "succeeded");
        assert_eq!(TaskStatus::Failed.to_string(), "failed");
        assert_eq!(TaskStatus::Succeeded.exit_code(), 0);
        assert_ne!(TaskStatus::Failed.exit_code(), 0);
    }
}
