mod args;
mod command;
mod locator;

use crate::args::CommonArgs;
use crate::command::Command;
use clap::Parser;
use sentry::types::Dsn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps application users in sync with the identity provider's user lifecycle events
#[derive(Parser)]
#[command(name = "user-sync", version)]
struct Cli {
    #[command(flatten)]
    common_args: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let Cli {
        common_args,
        command,
    } = Cli::parse();

    let sentry_guard = init_sentry(&common_args)?;
    init_tracing(sentry_guard.is_some());

    command.run(common_args).await
}

fn init_sentry(common_args: &CommonArgs) -> anyhow::Result<Option<sentry::ClientInitGuard>> {
    let Some(dsn) = &common_args.sentry_dsn else {
        return Ok(None);
    };
    let dsn = dsn.parse::<Dsn>()?;

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        environment: common_args.sentry_environment.clone().map(Into::into),
        sample_rate: common_args.sentry_sample_rate.unwrap_or(1.0),
        traces_sample_rate: common_args.sentry_traces_sample_rate.unwrap_or(0.0),
        ..Default::default()
    });

    Ok(Some(guard))
}

fn init_tracing(with_sentry: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(with_sentry.then(sentry_tracing::layer))
        .init();
}
