use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use domain::user::{User, UserProfile, UserRepository, UserRepositoryError, UserSnapshot};
use domain_shared::user::UserId;
use sqlx::{query, query_as, FromRow, PgPool};
use tracing::{instrument, warn};

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    #[instrument(level = "trace", skip_all)]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    image_url: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_snapshot(UserSnapshot {
            id: UserId(row.id),
            email: row.email,
            name: row.name,
            image_url: row.image_url,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(level = "debug", err, skip_all)]
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let UserSnapshot {
            id,
            email,
            name,
            image_url,
            created_at,
            updated_at,
        } = user.to_snapshot();

        query(
            "INSERT INTO users (id, email, name, image_url, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id.0)
        .bind(email)
        .bind(name)
        .bind(image_url)
        .bind(created_at.naive_utc())
        .bind(updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                warn!("User already exists");
                UserRepositoryError::AlreadyExists
            }
            err => {
                warn!(error = ?err, "Failed to insert user");
                UserRepositoryError::ServiceUnavailable
            }
        })?;

        Ok(())
    }

    #[instrument(level = "debug", err, skip_all)]
    async fn update_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserRepositoryError> {
        let row = query_as::<_, UserRow>(
            "UPDATE users SET email = $1, name = $2, image_url = $3, updated_at = $4 WHERE id = $5 RETURNING id, email, name, image_url, created_at, updated_at",
        )
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.image_url)
        .bind(Utc::now().naive_utc())
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            warn!(error = ?err, "Failed to update user");
            UserRepositoryError::ServiceUnavailable
        })?;

        Ok(row.map(User::from))
    }

    #[instrument(level = "debug", err, skip_all)]
    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let row = query_as::<_, UserRow>(
            "DELETE FROM users WHERE id = $1 RETURNING id, email, name, image_url, created_at, updated_at",
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            warn!(error = ?err, "Failed to delete user");
            UserRepositoryError::ServiceUnavailable
        })?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn user(id: &str, created_at: DateTime<Utc>) -> User {
        User::from_snapshot(UserSnapshot {
            id: UserId(id.to_string()),
            email: "linus@example.com".to_string(),
            name: "Linus Torvalds".to_string(),
            image_url: None,
            created_at,
            updated_at: created_at,
        })
    }

    fn profile(email: &str) -> UserProfile {
        UserProfile {
            email: email.to_string(),
            name: "Linus B. Torvalds".to_string(),
            image_url: None,
        }
    }

    #[sqlx::test(migrator = "crate::database::MIGRATOR")]
    async fn create_twice_reports_already_exists(pool: PgPool) {
        let repository = PostgresUserRepository::new(pool);
        let user = user("user_1", Utc::now());

        repository.create(&user).await.unwrap();
        let err = repository.create(&user).await.unwrap_err();

        assert!(matches!(err, UserRepositoryError::AlreadyExists));
    }

    #[sqlx::test(migrator = "crate::database::MIGRATOR")]
    async fn update_and_delete_of_unknown_id_return_none(pool: PgPool) {
        let repository = PostgresUserRepository::new(pool);
        let missing = UserId("user_missing".to_string());

        let updated = repository
            .update_profile(&missing, &profile("nobody@example.com"))
            .await
            .unwrap();
        let deleted = repository.delete_by_id(&missing).await.unwrap();

        assert!(updated.is_none());
        assert!(deleted.is_none());
    }

    #[sqlx::test(migrator = "crate::database::MIGRATOR")]
    async fn user_is_created_updated_and_deleted(pool: PgPool) {
        let repository = PostgresUserRepository::new(pool);
        let created_at = Utc::now() - Duration::hours(1);
        let user = user("user_1", created_at);
        repository.create(&user).await.unwrap();

        let updated = repository
            .update_profile(user.id(), &profile("linus@kernel.example.org"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id(), user.id());
        assert_eq!(updated.email(), "linus@kernel.example.org");
        assert_eq!(updated.name(), "Linus B. Torvalds");
        assert_eq!(updated.image_url(), None);
        assert_eq!(
            updated.created_at().timestamp_micros(),
            created_at.timestamp_micros()
        );
        assert!(updated.updated_at() > updated.created_at());

        let deleted = repository.delete_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(deleted.email(), "linus@kernel.example.org");
        assert_eq!(deleted.image_url(), None);

        assert!(repository.delete_by_id(user.id()).await.unwrap().is_none());
    }
}
