use async_trait::async_trait;
use domain_shared::identity::ProviderUserData;
use domain_shared::user::UserId;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Handlers for the identity provider's user lifecycle events.
#[async_trait]
pub trait UserSyncPort {
    async fn sync_user_created(
        &self,
        data: ProviderUserData,
    ) -> Result<UserSyncOutcome, UserSyncError>;
    async fn sync_user_updated(
        &self,
        data: ProviderUserData,
    ) -> Result<UserSyncOutcome, UserSyncError>;
    async fn sync_user_deleted(
        &self,
        data: ProviderUserData,
    ) -> Result<UserSyncOutcome, UserSyncError>;
}

/// Status object returned to the event-delivery service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSyncOutcome {
    Synced { user_id: UserId },
    NotFound,
}

impl UserSyncOutcome {
    pub fn synced(user_id: UserId) -> Self {
        UserSyncOutcome::Synced { user_id }
    }

    pub fn not_found() -> Self {
        UserSyncOutcome::NotFound
    }

    pub fn success(&self) -> bool {
        matches!(self, UserSyncOutcome::Synced { .. })
    }
}

impl Serialize for UserSyncOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UserSyncOutcome", 2)?;
        state.serialize_field("success", &self.success())?;
        match self {
            UserSyncOutcome::Synced { user_id } => state.serialize_field("userId", user_id)?,
            UserSyncOutcome::NotFound => state.serialize_field("message", "User not found")?,
        }
        state.end()
    }
}

#[derive(Debug, Error)]
pub enum UserSyncError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error("User already exists")]
    AlreadyExists,
    #[error("Service is temporarily unavailable")]
    TemporaryUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcomes_serialize_as_status_objects() {
        assert_eq!(
            serde_json::to_value(UserSyncOutcome::synced(UserId("user_1".to_string()))).unwrap(),
            json!({ "success": true, "userId": "user_1" }),
        );
        assert_eq!(
            serde_json::to_value(UserSyncOutcome::not_found()).unwrap(),
            json!({ "success": false, "message": "User not found" }),
        );
    }

    #[test]
    fn success_flag_follows_the_variant() {
        assert!(UserSyncOutcome::synced(UserId("user_1".to_string())).success());
        assert!(!UserSyncOutcome::not_found().success());
    }
}
