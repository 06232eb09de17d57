use application_ports::user_sync::{UserSyncError, UserSyncOutcome, UserSyncPort};
use async_trait::async_trait;
use domain::user::{create_user, UserProfile, UserProfileError, UserRepository, UserRepositoryError};
use domain_shared::identity::ProviderUserData;
use domain_shared::user::UserId;
use tracing::{error, info, instrument, warn};

pub struct UserSyncService<TUserRepository> {
    user_repository: TUserRepository,
}

impl<TUserRepository> UserSyncService<TUserRepository>
where
    TUserRepository: UserRepository + Send + Sync,
{
    #[instrument(level = "trace", skip_all)]
    pub fn new(user_repository: TUserRepository) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl<TUserRepository> UserSyncPort for UserSyncService<TUserRepository>
where
    TUserRepository: UserRepository + Send + Sync,
{
    #[instrument(level = "info", skip_all)]
    async fn sync_user_created(
        &self,
        data: ProviderUserData,
    ) -> Result<UserSyncOutcome, UserSyncError> {
        let user_id = require_user_id(&data, "User ID is required for creation")?;
        info!(user_id = %user_id, "Processing user creation");

        let profile = UserProfile::from_provider_data(&data).map_err(map_profile_err)?;
        let user = create_user(user_id, profile);

        self.user_repository
            .create(&user)
            .await
            .map_err(map_user_repo_err)?;

        info!(user_id = %user.id(), "User created successfully");
        Ok(UserSyncOutcome::synced(user.id().clone()))
    }

    #[instrument(level = "info", skip_all)]
    async fn sync_user_updated(
        &self,
        data: ProviderUserData,
    ) -> Result<UserSyncOutcome, UserSyncError> {
        info!(user_id = ?data.id, "Processing user update");

        let profile = UserProfile::from_provider_data(&data).map_err(map_profile_err)?;

        // An absent id matches no record.
        let Some(user_id) = data.id.filter(|id| !id.0.is_empty()) else {
            warn!("User without id not found for update");
            return Ok(UserSyncOutcome::not_found());
        };

        let user = match self
            .user_repository
            .update_profile(&user_id, &profile)
            .await
            .map_err(map_user_repo_err)?
        {
            None => {
                warn!(user_id = %user_id, "User not found for update");
                return Ok(UserSyncOutcome::not_found());
            }
            Some(user) => user,
        };

        info!(user_id = %user.id(), "User updated successfully");
        Ok(UserSyncOutcome::synced(user.id().clone()))
    }

    #[instrument(level = "info", skip_all)]
    async fn sync_user_deleted(
        &self,
        data: ProviderUserData,
    ) -> Result<UserSyncOutcome, UserSyncError> {
        let user_id = require_user_id(&data, "User ID is required for deletion")?;
        info!(user_id = %user_id, "Processing user deletion");

        let deleted = self
            .user_repository
            .delete_by_id(&user_id)
            .await
            .map_err(map_user_repo_err)?;

        if deleted.is_none() {
            warn!(user_id = %user_id, "User not found for deletion");
            return Ok(UserSyncOutcome::not_found());
        }

        info!(user_id = %user_id, "User deleted successfully");
        Ok(UserSyncOutcome::synced(user_id))
    }
}

#[instrument(level = "trace", skip(data))]
fn require_user_id(
    data: &ProviderUserData,
    message: &'static str,
) -> Result<UserId, UserSyncError> {
    match &data.id {
        Some(id) if !id.0.is_empty() => Ok(id.clone()),
        _ => {
            error!("{}", message);
            Err(UserSyncError::InvalidPayload(message.to_string()))
        }
    }
}

#[instrument(level = "trace", skip_all)]
fn map_profile_err(err: UserProfileError) -> UserSyncError {
    error!(error = %err, "Rejected user data");
    UserSyncError::InvalidPayload(err.to_string())
}

#[instrument(level = "trace", skip_all)]
fn map_user_repo_err(err: UserRepositoryError) -> UserSyncError {
    match err {
        UserRepositoryError::AlreadyExists => {
            error!("UserRepositoryError::AlreadyExists");
            UserSyncError::AlreadyExists
        }
        UserRepositoryError::ServiceUnavailable => {
            error!("UserRepositoryError::ServiceUnavailable");
            UserSyncError::TemporaryUnavailable
        }
    }
}
