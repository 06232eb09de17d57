use application_ports::user_sync::UserSyncPort;

pub trait Locator {
    fn get_user_sync_port(&self) -> &(dyn UserSyncPort + Send + Sync);
}
