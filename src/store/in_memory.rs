//! InMemoryLampStore - HashMap-backed lamp store for development and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::LampStore;
use crate::error::LampError;
use crate::lamp::LampEntity;

/// In-memory lamp store backed by a HashMap.
///
/// Delete removes the entry outright. Clone-friendly via Arc; clones share
/// the same map. The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct InMemoryLampStore {
    storage: Arc<RwLock<HashMap<Uuid, LampEntity>>>,
}

impl InMemoryLampStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, LampEntity>>, LampError> {
        self.storage
            .read()
            .map_err(|_| LampError::StorageUnavailable("lamp store lock poisoned during read".into()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, LampEntity>>, LampError> {
        self.storage
            .write()
            .map_err(|_| LampError::StorageUnavailable("lamp store lock poisoned during write".into()))
    }
}

#[async_trait]
impl LampStore for InMemoryLampStore {
    async fn list_page(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<LampEntity>, LampError> {
        let mut lamps: Vec<LampEntity> = self.read()?.values().cloned().collect();
        lamps.sort_by_key(LampEntity::sort_key);

        let page = lamps
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(page)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<LampEntity, LampError> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| LampError::NotFound(id.to_string()))
    }

    async fn create(&self, status: bool) -> Result<LampEntity, LampError> {
        let mut storage = self.write()?;

        let mut lamp = LampEntity::create(status);
        while storage.contains_key(&lamp.id) {
            lamp.id = Uuid::new_v4();
        }

        storage.insert(lamp.id, lamp.clone());
        debug!(lamp_id = %lamp.id, status, "lamp created");
        Ok(lamp)
    }

    async fn update(&self, id: Uuid, status: bool) -> Result<LampEntity, LampError> {
        let mut storage = self.write()?;
        let slot = storage
            .get_mut(&id)
            .ok_or_else(|| LampError::NotFound(id.to_string()))?;

        *slot = slot.with_updated_status(status);
        debug!(lamp_id = %id, status, "lamp updated");
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), LampError> {
        match self.write()?.remove(&id) {
            Some(_) => {
                debug!(lamp_id = %id, "lamp deleted");
                Ok(())
            }
            None => Err(LampError::NotFound(id.to_string())),
        }
    }

    async fn exists(&self, id: Uuid) -> Result<bool, LampError> {
        Ok(self.read()?.contains_key(&id))
    }
}
