//! PostgresLampStore - relational lamp store with soft delete.
//!
//! Every operation runs in its own transaction, so a cancelled future
//! rolls back instead of leaving a partial write. Every statement carries
//! `deleted_at IS NULL`; there is no way to read a soft-deleted row through
//! this store. Timestamps come from the database clock.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

use super::LampStore;
use crate::config::{DatabaseConfig, DatabaseTarget};
use crate::error::LampError;
use crate::lamp::LampEntity;

/// Row shape shared by every `RETURNING` / `SELECT` below.
#[derive(Debug, sqlx::FromRow)]
struct LampRow {
    id: Uuid,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LampRow> for LampEntity {
    fn from(row: LampRow) -> Self {
        LampEntity {
            id: row.id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const LIST_ACTIVE: &str = "SELECT id, status, created_at, updated_at FROM lamps \
     WHERE deleted_at IS NULL \
     ORDER BY created_at, id \
     LIMIT $1 OFFSET $2";

const GET_ACTIVE: &str = "SELECT id, status, created_at, updated_at FROM lamps \
     WHERE id = $1 AND deleted_at IS NULL";

const INSERT_LAMP: &str = "WITH now AS (SELECT clock_timestamp() AS ts) \
     INSERT INTO lamps (id, status, created_at, updated_at) \
     SELECT $1, $2, ts, ts FROM now \
     RETURNING id, status, created_at, updated_at";

const UPDATE_STATUS: &str = "UPDATE lamps \
     SET status = $2, \
         updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond') \
     WHERE id = $1 AND deleted_at IS NULL \
     RETURNING id, status, created_at, updated_at";

const SOFT_DELETE: &str = "UPDATE lamps \
     SET deleted_at = clock_timestamp(), \
         updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond') \
     WHERE id = $1 AND deleted_at IS NULL";

const EXISTS_ACTIVE: &str =
    "SELECT EXISTS (SELECT 1 FROM lamps WHERE id = $1 AND deleted_at IS NULL)";

/// Postgres-backed lamp store. Clones share the pool.
#[derive(Clone)]
pub struct PostgresLampStore {
    pool: PgPool,
}

impl PostgresLampStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration and open the first connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, LampError> {
        let options = connect_options(config)?;
        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min)
            .max_connections(config.pool_max)
            .max_lifetime(config.max_lifetime)
            .idle_timeout(config.idle_timeout)
            .acquire_timeout(config.connect_timeout)
            .connect_with(options)
            .await?;

        debug!(database = %config.describe(), "postgres pool connected");
        Ok(Self { pool })
    }

    /// Apply the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), LampError> {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("database migrations complete");
        Ok(())
    }

    /// Round-trip a trivial query to verify connectivity.
    pub async fn ping(&self) -> Result<(), LampError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, LampError> {
    match &config.target {
        DatabaseTarget::Url(url) => PgConnectOptions::from_str(url)
            .map_err(|e| LampError::Config(format!("invalid DATABASE_URL: {}", e))),
        DatabaseTarget::Parts {
            host,
            port,
            database,
            user,
            password,
        } => Ok(PgConnectOptions::new()
            .host(host)
            .port(*port)
            .database(database)
            .username(user)
            .password(password)),
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl LampStore for PostgresLampStore {
    async fn list_page(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<LampEntity>, LampError> {
        let mut tx = self.pool.begin().await?;
        let rows: Vec<LampRow> = sqlx::query_as(LIST_ACTIVE)
            .bind(limit.map(to_i64))
            .bind(to_i64(offset))
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(LampEntity::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<LampEntity, LampError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<LampRow> = sqlx::query_as(GET_ACTIVE)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.map(LampEntity::from)
            .ok_or_else(|| LampError::NotFound(id.to_string()))
    }

    async fn create(&self, status: bool) -> Result<LampEntity, LampError> {
        let id = LampEntity::create(status).id;

        let mut tx = self.pool.begin().await?;
        let row: LampRow = sqlx::query_as(INSERT_LAMP)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(lamp_id = %id, status, "lamp created");
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, status: bool) -> Result<LampEntity, LampError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<LampRow> = sqlx::query_as(UPDATE_STATUS)
            .bind(id)
            .bind(status)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        let lamp = row
            .map(LampEntity::from)
            .ok_or_else(|| LampError::NotFound(id.to_string()))?;
        debug!(lamp_id = %id, status, "lamp updated");
        Ok(lamp)
    }

    async fn delete(&self, id: Uuid) -> Result<(), LampError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(SOFT_DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(LampError::NotFound(id.to_string()));
        }
        debug!(lamp_id = %id, "lamp soft-deleted");
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, LampError> {
        let mut tx = self.pool.begin().await?;
        let exists: bool = sqlx::query_scalar(EXISTS_ACTIVE)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(exists)
    }
}
