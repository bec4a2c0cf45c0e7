use {
    clap::Parser,
    deployer::{
        arguments::Arguments,
        executor::ForgeCreate,
        runner::{self, TaskError, TaskStatus},
    },
    deployments::DeploymentStore,
    url::Url,
};

#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    deployer::tracing::initialize(&args.log_filter, args.log_stderr_threshold);
    tracing::info!("running deployer with validated arguments:\n{}", args);
    std::process::exit(run(args).await);
}

async fn run(args: Arguments) -> i32 {
    let env = match args.deploy_env() {
        Ok(env) => env,
        Err(err) => {
            tracing::error!("invalid arguments: {err:?}");
            return 2;
        }
    };
    let chain_id = match chain_id(&env.rpc_url).await {
        Ok(chain_id) => chain_id,
        Err(err) => {
            tracing::error!("failed to query chain id from {}: {err:?}", env.rpc_url);
            return 1;
        }
    };
    let store = DeploymentStore::new(&args.deployments_file, chain_id);
    let executor = ForgeCreate::new(&args.forge);

    match runner::run_task(&env, &store, &executor, &args.task).await {
        Ok(status) => {
            println!("{status}");
            status.exit_code()
        }
        Err(TaskError::Resolution(err)) => {
            eprintln!("{err}");
            2
        }
        Err(err) => {
            tracing::error!("deployment aborted: {err:?}");
            println!("{}", TaskStatus::Failed);
            1
        }
    }
}

async fn chain_id(url: &Url) -> anyhow::Result<u64> {
    let transport = web3::transports::Http::new(url.as_str())?;
    let chain_id = web3::Web3::new(transport).eth().chain_id().await?;
    Ok(chain_id.as_u64())
}
