use chrono::{DateTime, Utc};
use kiosk_core::{
    CountryCode, Name, NaturalKey, NewUser, PasswordHash, Phone, User, UserCredentials, UserId,
    UserPatch, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    firstname: String,
    lastname: String,
    country_code: String,
    phone: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credentials(self) -> Result<UserCredentials, UserStoreError> {
        let user = User {
            id: UserId::new(self.id),
            firstname: Name::parse(self.firstname, "Firstname").map_err(unexpected)?,
            lastname: Name::parse(self.lastname, "Lastname").map_err(unexpected)?,
            country_code: CountryCode::try_from(self.country_code).map_err(unexpected)?,
            phone: Phone::try_from(self.phone).map_err(unexpected)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        Ok(UserCredentials {
            user,
            password_hash: PasswordHash::new(Secret::from(self.password_hash)),
        })
    }
}

fn unexpected(e: impl std::fmt::Display) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

const USER_COLUMNS: &str =
    "id, firstname, lastname, country_code, phone, password_hash, created_at, updated_at";

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
                INSERT INTO users (firstname, lastname, country_code, phone, password_hash)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.firstname.as_str())
        .bind(user.lastname.as_str())
        .bind(user.natural_key.country_code.as_str())
        .bind(user.natural_key.phone.as_str())
        .bind(user.password_hash.as_ref().expose_secret().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(row.into_credentials()?.user)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        Ok(row.into_credentials()?.user)
    }

    #[tracing::instrument(name = "Looking up credentials in PostgreSQL", skip_all)]
    async fn find_credentials(
        &self,
        key: &NaturalKey,
    ) -> Result<Option<UserCredentials>, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE country_code = $1 AND phone = $2"
        ))
        .bind(key.country_code.as_str())
        .bind(key.phone.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(UserRow::into_credentials).transpose()
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
                UPDATE users
                SET firstname = COALESCE($2, firstname),
                    lastname = COALESCE($3, lastname),
                    password_hash = COALESCE($4, password_hash),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(patch.firstname.as_ref().map(Name::as_str))
        .bind(patch.lastname.as_ref().map(Name::as_str))
        .bind(
            patch
                .password_hash
                .as_ref()
                .map(|hash| hash.as_ref().expose_secret().as_str()),
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        Ok(row.into_credentials()?.user)
    }

    #[tracing::instrument(name = "Delete user from PostgreSQL", skip_all)]
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
