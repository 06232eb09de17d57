use application::user_sync::UserSyncService;
use application_ports::user_sync::UserSyncPort;
use infrastructure::user::PostgresUserRepository;
use presentation::application_ports::Locator;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ApplicationPortLocator {
    pub(crate) user_sync_adapter: Arc<UserSyncService<PostgresUserRepository>>,
}

impl Locator for ApplicationPortLocator {
    #[instrument(level = "trace", skip(self))]
    fn get_user_sync_port(&self) -> &(dyn UserSyncPort + Send + Sync) {
        &*self.user_sync_adapter
    }
}
