use chrono::{DateTime, Utc};
use kiosk_core::{
    GeoPoint, Kiosk, KioskId, KioskPatch, KioskStore, KioskStoreError, NewKiosk, UserId,
};
use sqlx::{PgPool, Pool, Postgres};

#[derive(Clone)]
pub struct PostgresKioskStore {
    pool: PgPool,
}

impl PostgresKioskStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct KioskRow {
    id: i64,
    title: String,
    description: String,
    lat: f64,
    lng: f64,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<KioskRow> for Kiosk {
    type Error = KioskStoreError;

    fn try_from(row: KioskRow) -> Result<Self, Self::Error> {
        Ok(Kiosk {
            id: KioskId::new(row.id),
            title: row.title,
            description: row.description,
            geolocation: GeoPoint::new(row.lat, row.lng)
                .map_err(|e| KioskStoreError::UnexpectedError(e.to_string()))?,
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const KIOSK_COLUMNS: &str = "id, title, description, lat, lng, user_id, created_at, updated_at";

fn unexpected(e: sqlx::Error) -> KioskStoreError {
    KioskStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl KioskStore for PostgresKioskStore {
    #[tracing::instrument(name = "Adding kiosk to PostgreSQL", skip_all)]
    async fn add_kiosk(&self, kiosk: NewKiosk) -> Result<Kiosk, KioskStoreError> {
        let row: KioskRow = sqlx::query_as(&format!(
            r#"
                INSERT INTO kiosks (title, description, lat, lng, user_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {KIOSK_COLUMNS}
            "#
        ))
        .bind(&kiosk.title)
        .bind(&kiosk.description)
        .bind(kiosk.geolocation.lat())
        .bind(kiosk.geolocation.lng())
        .bind(kiosk.user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return KioskStoreError::OwnerNotFound;
                }
            }
            unexpected(e)
        })?;

        Kiosk::try_from(row)
    }

    #[tracing::instrument(name = "Retrieving kiosk from PostgreSQL", skip_all)]
    async fn get_kiosk(&self, id: KioskId) -> Result<Option<Kiosk>, KioskStoreError> {
        let row: Option<KioskRow> =
            sqlx::query_as(&format!("SELECT {KIOSK_COLUMNS} FROM kiosks WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        row.map(Kiosk::try_from).transpose()
    }

    #[tracing::instrument(name = "Updating kiosk in PostgreSQL", skip_all)]
    async fn update_kiosk(&self, id: KioskId, patch: KioskPatch) -> Result<Kiosk, KioskStoreError> {
        let row: Option<KioskRow> = sqlx::query_as(&format!(
            r#"
                UPDATE kiosks
                SET title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    lat = COALESCE($4, lat),
                    lng = COALESCE($5, lng),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING {KIOSK_COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.geolocation.map(|point| point.lat()))
        .bind(patch.geolocation.map(|point| point.lng()))
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(Kiosk::try_from)
            .transpose()?
            .ok_or(KioskStoreError::KioskNotFound)
    }

    #[tracing::instrument(name = "Deleting kiosk from PostgreSQL", skip_all)]
    async fn delete_kiosk(&self, id: KioskId) -> Result<(), KioskStoreError> {
        let result = sqlx::query("DELETE FROM kiosks WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(KioskStoreError::KioskNotFound);
        }

        Ok(())
    }
}
