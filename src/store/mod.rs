//! Lamp stores - the single point of truth for lamp persistence.
//!
//! `LampStore` is the contract every backend satisfies identically.
//! Two backends exist:
//!
//! - [`InMemoryLampStore`] - a shared `HashMap`, hard delete.
//! - [`PostgresLampStore`] (feature `postgres`) - one transaction per
//!   operation, soft delete through `deleted_at`.
//!
//! [`LampBackend`] is the tagged union the process picks once at startup
//! with [`LampBackend::select`].

mod in_memory;
#[cfg(feature = "postgres")]
mod postgres;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::LampError;
use crate::lamp::LampEntity;

pub use in_memory::InMemoryLampStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresLampStore;

/// Storage contract for lamps.
///
/// Every read returns owned copies; mutating them never touches the store.
/// Listings are ordered by `(created_at, id)` ascending.
#[async_trait]
pub trait LampStore: Send + Sync {
    /// Active lamps starting at `offset`, at most `limit` of them.
    async fn list_page(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<LampEntity>, LampError>;

    /// Active lamps from the start of the listing, at most `limit` of them.
    async fn list_all(&self, limit: Option<usize>) -> Result<Vec<LampEntity>, LampError> {
        self.list_page(0, limit).await
    }

    /// The active lamp with this id, or `NotFound`.
    async fn get_by_id(&self, id: Uuid) -> Result<LampEntity, LampError>;

    /// Create a lamp. The store assigns the id and both timestamps.
    async fn create(&self, status: bool) -> Result<LampEntity, LampError>;

    /// Replace the status of an active lamp and refresh `updated_at`.
    async fn update(&self, id: Uuid, status: bool) -> Result<LampEntity, LampError>;

    /// Remove an active lamp. A second delete of the same id is `NotFound`.
    async fn delete(&self, id: Uuid) -> Result<(), LampError>;

    /// Whether an active lamp has this id.
    async fn exists(&self, id: Uuid) -> Result<bool, LampError>;
}

/// The backend a process runs with, chosen once at startup.
#[derive(Clone)]
pub enum LampBackend {
    InMemory(InMemoryLampStore),
    #[cfg(feature = "postgres")]
    Postgres(PostgresLampStore),
}

impl LampBackend {
    /// Pick the backend from the database configuration.
    ///
    /// `None` selects the in-memory store. A configured database is
    /// connected to (and migrated when `run_migrations` is set); any
    /// failure is returned instead of falling back to memory.
    pub async fn select(
        database: Option<&DatabaseConfig>,
        run_migrations: bool,
    ) -> Result<Self, LampError> {
        match database {
            None => {
                info!("using in-memory lamp store (no database configured)");
                Ok(LampBackend::InMemory(InMemoryLampStore::new()))
            }
            #[cfg(feature = "postgres")]
            Some(config) => {
                let store = PostgresLampStore::connect(config).await?;
                if run_migrations {
                    store.migrate().await?;
                } else {
                    info!("skipping database migrations");
                }
                info!(database = %config.describe(), "using postgres lamp store");
                Ok(LampBackend::Postgres(store))
            }
            #[cfg(not(feature = "postgres"))]
            Some(config) => {
                let _ = run_migrations;
                Err(LampError::Config(format!(
                    "database {} configured but postgres support is not compiled in",
                    config.describe()
                )))
            }
        }
    }

    /// Short name of the backend, for logs and health output.
    pub fn name(&self) -> &'static str {
        match self {
            LampBackend::InMemory(_) => "in-memory",
            #[cfg(feature = "postgres")]
            LampBackend::Postgres(_) => "postgres",
        }
    }
}

impl From<InMemoryLampStore> for LampBackend {
    fn from(store: InMemoryLampStore) -> Self {
        LampBackend::InMemory(store)
    }
}

#[cfg(feature = "postgres")]
impl From<PostgresLampStore> for LampBackend {
    fn from(store: PostgresLampStore) -> Self {
        LampBackend::Postgres(store)
    }
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            LampBackend::InMemory($store) => $call,
            #[cfg(feature = "postgres")]
            LampBackend::Postgres($store) => $call,
        }
    };
}

#[async_trait]
impl LampStore for LampBackend {
    async fn list_page(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<LampEntity>, LampError> {
        dispatch!(self, store => store.list_page(offset, limit).await)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<LampEntity, LampError> {
        dispatch!(self, store => store.get_by_id(id).await)
    }

    async fn create(&self, status: bool) -> Result<LampEntity, LampError> {
        dispatch!(self, store => store.create(status).await)
    }

    async fn update(&self, id: Uuid, status: bool) -> Result<LampEntity, LampError> {
        dispatch!(self, store => store.update(id, status).await)
    }

    async fn delete(&self, id: Uuid) -> Result<(), LampError> {
        dispatch!(self, store => store.delete(id).await)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, LampError> {
        dispatch!(self, store => store.exists(id).await)
    }
}
