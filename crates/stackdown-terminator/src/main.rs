//! stackdown: dependency-ordered teardown of CloudFormation environments
//!
//! Deletes every stack of an environment in reverse provisioning order, or
//! removes a single service from a running environment.

use anyhow::Result;
use clap::{Parser, Subcommand};
use stackdown_common::defaults::{DEFAULT_NAMESPACE, DEFAULT_REGION, DEFAULT_WAIT_TIMEOUT_SECS};
use stackdown_common::is_valid_name;
use stackdown_terminator::aws::{AwsContext, CloudFormationStacks};
use stackdown_terminator::config::{self, RunConfig};
use stackdown_terminator::roleset::StackRolesetManager;
use stackdown_terminator::wait::WaitConfig;
use stackdown_terminator::{
    TerminationContext, UndeployOptions, terminate_environment, undeploy_service,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "stackdown")]
#[command(about = "Tear down CloudFormation environments in dependency order")]
#[command(version)]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug)]
struct GlobalArgs {
    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long, global = true)]
    aws_profile: Option<String>,

    /// Prefix of stack names and tag keys
    #[arg(long, global = true, env = "STACKDOWN_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Maximum seconds to wait for a single stack to settle
    #[arg(long, global = true, default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    wait_timeout: u64,
}

impl From<GlobalArgs> for RunConfig {
    fn from(args: GlobalArgs) -> Self {
        Self {
            aws: config::AwsConfig {
                region: args.region,
                aws_profile: args.aws_profile,
            },
            namespace: args.namespace,
            wait: WaitConfig::default(),
        }
        .with_wait_timeout(Duration::from_secs(args.wait_timeout))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete every stack of an environment
    Terminate {
        /// Environment to tear down
        #[arg(value_parser = parse_name)]
        environment: String,
    },

    /// Remove one service from an environment
    Undeploy {
        /// Service to remove
        #[arg(value_parser = parse_name)]
        service: String,

        /// Environment the service runs in
        #[arg(value_parser = parse_name)]
        environment: String,

        /// Leave the service's roleset in place
        #[arg(long)]
        keep_roleset: bool,
    },
}

fn parse_name(s: &str) -> Result<String, String> {
    if is_valid_name(s) {
        Ok(s.to_string())
    } else {
        Err("use letters, digits and '-', not starting or ending with '-'".to_string())
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Reduce noise from the AWS SDK (show only warnings and errors)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
                .add_directive("aws_config=warn".parse()?)
                .add_directive("aws_smithy_runtime=warn".parse()?),
        )
        .init();

    let config: RunConfig = args.global.into();
    if let Some(profile) = config.aws_profile() {
        info!(profile = %profile, "Using AWS profile");
    }

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, abandoning in-flight waits");
                cancel.cancel();
            }
        }
    });

    let aws = AwsContext::with_profile(config.region(), config.aws_profile()).await;
    let stacks = CloudFormationStacks::from_context(&aws, &config.namespace)
        .with_wait_config(config.wait.clone())
        .with_cancellation(cancel);
    let rolesets = StackRolesetManager::new(&config.namespace, stacks.clone());
    let ctx = TerminationContext::new(&config.namespace, &stacks, &rolesets);

    match args.command {
        Command::Terminate { environment } => {
            info!(
                environment = %environment,
                namespace = %config.namespace,
                region = %config.region(),
                "Terminating environment"
            );
            terminate_environment(ctx, &environment).await?;
            info!(environment = %environment, "Environment terminated");
        }

        Command::Undeploy {
            service,
            environment,
            keep_roleset,
        } => {
            info!(
                service = %service,
                environment = %environment,
                namespace = %config.namespace,
                "Undeploying service"
            );
            let options = UndeployOptions {
                remove_roleset: !keep_roleset,
            };
            undeploy_service(ctx, &service, &environment, &options).await?;
            info!(service = %service, environment = %environment, "Service undeployed");
        }
    }

    Ok(())
}
