use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_shared::identity::ProviderUserData;
use domain_shared::user::UserId;
use thiserror::Error;
use tracing::instrument;

/// Profile fields copied from the identity provider on every create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl UserProfile {
    #[instrument(level = "trace", skip(data))]
    pub fn from_provider_data(data: &ProviderUserData) -> Result<Self, UserProfileError> {
        let email = data
            .email_addresses
            .as_ref()
            .and_then(|addresses| addresses.first())
            .map(|address| address.email_address.clone())
            .ok_or(UserProfileError::MissingEmailAddress)?;

        let name = format!(
            "{} {}",
            data.first_name.as_deref().unwrap_or_default(),
            data.last_name.as_deref().unwrap_or_default(),
        )
        .trim()
        .to_string();

        let image_url = data
            .image_url
            .as_ref()
            .filter(|url| !url.is_empty())
            .cloned();

        Ok(Self {
            email,
            name,
            image_url,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserProfileError {
    #[error("No email addresses found in user data")]
    MissingEmailAddress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: String,
    name: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[instrument(level = "trace", skip(profile))]
pub fn create_user(id: UserId, profile: UserProfile) -> User {
    let now = Utc::now();
    let UserProfile {
        email,
        name,
        image_url,
    } = profile;

    User {
        id,
        email,
        name,
        image_url,
        created_at: now,
        updated_at: now,
    }
}

impl User {
    #[instrument(level = "trace", skip(self))]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[instrument(level = "trace", skip(self))]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[instrument(level = "trace", skip(self))]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[instrument(level = "trace", skip(self))]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[instrument(level = "trace", skip(self))]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl User {
    #[instrument(level = "trace", skip(snapshot))]
    pub fn from_snapshot(snapshot: UserSnapshot) -> Self {
        Self {
            id: snapshot.id,
            email: snapshot.email,
            name: snapshot.name,
            image_url: snapshot.image_url,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn to_snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserSnapshot {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait UserRepository {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError>;
    /// Overwrites the profile of an existing user, returning `None` when no user has this id.
    async fn update_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserRepositoryError>;
    /// Removes the user, returning the deleted record or `None` when no user has this id.
    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}

#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    AlreadyExists,
    #[error("Service unavailable")]
    ServiceUnavailable,
}
