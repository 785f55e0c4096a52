//! LampService - store operations expressed in wire models.

use tracing::debug;
use uuid::Uuid;

use super::page::PageRequest;
use crate::error::LampError;
use crate::lamp::{Lamp, LampCreate, LampMapper, LampPage, LampUpdate};
use crate::store::LampStore;

/// Boundary-facing lamp operations over a store `S`.
pub struct LampService<S> {
    store: S,
}

impl<S: LampStore> LampService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// One page of active lamps.
    pub async fn list(&self, page: PageRequest) -> Result<LampPage, LampError> {
        let mut lamps = self
            .store
            .list_page(page.offset, Some(page.page_size.saturating_add(1)))
            .await?;

        let has_more = lamps.len() > page.page_size;
        lamps.truncate(page.page_size);

        Ok(LampPage {
            data: lamps.iter().map(LampMapper::to_wire).collect(),
            next_cursor: has_more.then(|| page.next_cursor()),
            has_more,
        })
    }

    pub async fn get(&self, lamp_id: &str) -> Result<Lamp, LampError> {
        let id = parse_id(lamp_id)?;
        let lamp = self.store.get_by_id(id).await?;
        Ok(LampMapper::to_wire(&lamp))
    }

    pub async fn create(&self, input: LampCreate) -> Result<Lamp, LampError> {
        let lamp = self.store.create(input.status).await?;
        Ok(LampMapper::to_wire(&lamp))
    }

    pub async fn update(&self, lamp_id: &str, input: LampUpdate) -> Result<Lamp, LampError> {
        let id = parse_id(lamp_id)?;
        let lamp = self.store.update(id, input.status).await?;
        Ok(LampMapper::to_wire(&lamp))
    }

    pub async fn delete(&self, lamp_id: &str) -> Result<(), LampError> {
        let id = parse_id(lamp_id)?;
        self.store.delete(id).await
    }

    pub async fn exists(&self, lamp_id: &str) -> Result<bool, LampError> {
        match Uuid::parse_str(lamp_id) {
            Ok(id) => self.store.exists(id).await,
            Err(_) => Ok(false),
        }
    }
}

/// An id that is not a UUID cannot name a lamp, so it is reported as not found.
fn parse_id(lamp_id: &str) -> Result<Uuid, LampError> {
    Uuid::parse_str(lamp_id).map_err(|_| {
        debug!(lamp_id, "unparseable lamp id");
        LampError::NotFound(lamp_id.to_string())
    })
}
