use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::instrument;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[instrument(level = "debug", skip_all)]
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
