use crate::args::CommonArgs;
use crate::locator::ApplicationPortLocator;
use anyhow::anyhow;
use application::user_sync::UserSyncService;
use clap::Args;
use infrastructure::user::PostgresUserRepository;
use presentation::api::run_api;
use std::sync::Arc;
use tracing::instrument;

#[derive(Args)]
pub struct ServeArgs {
    /// The port the event API listens on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

#[instrument(level = "trace", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: ServeArgs) -> anyhow::Result<()> {
    let CommonArgs {
        database_url,
        sentry_dsn: _,
        sentry_environment: _,
        sentry_sample_rate: _,
        sentry_traces_sample_rate: _,
    } = common_args;
    let ServeArgs { port } = args;

    let database_connection = infrastructure::database::connect(&database_url).await?;

    let user_repository = PostgresUserRepository::new(database_connection);
    let user_sync_adapter = Arc::new(UserSyncService::new(user_repository));

    let locator = ApplicationPortLocator { user_sync_adapter };

    let api = tokio::spawn(run_api(locator, port));

    api.await?.map_err(|e| anyhow!(e))?;

    Ok(())
}
