//! Lamp - the domain entity and its wire representations.
//!
//! `LampEntity` is the canonical in-process record owned by a `LampStore`.
//! The wire models in [`wire`] are what the HTTP boundary exchanges with
//! clients; [`LampMapper`] converts between the two.
//!
//! ## Example
//!
//! ```
//! use lamp_control::{LampEntity, LampMapper};
//!
//! let lamp = LampEntity::create(true);
//! let wire = LampMapper::to_wire(&lamp);
//! let back = LampMapper::from_wire(&wire).unwrap();
//! assert_eq!(back, lamp);
//! ```

mod mapper;
pub mod wire;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use uuid::Uuid;

pub use mapper::LampMapper;
pub use wire::{Lamp, LampCreate, LampPage, LampUpdate};

/// Current time at the precision every backend can store (microseconds).
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last touched at `previous`.
///
/// Always strictly after `previous`, even if the clock has not advanced.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// A lamp as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LampEntity {
    pub id: Uuid,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LampEntity {
    /// A new lamp with a random id and `created_at == updated_at == now`.
    pub fn create(status: bool) -> Self {
        let now = now();
        LampEntity {
            id: Uuid::new_v4(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this lamp with `status` replaced and a refreshed `updated_at`.
    ///
    /// `id` and `created_at` are carried over; `self` is left untouched.
    pub fn with_updated_status(&self, status: bool) -> Self {
        LampEntity {
            id: self.id,
            status,
            created_at: self.created_at,
            updated_at: next_timestamp(self.updated_at),
        }
    }

    /// Ordering key shared by every backend's listing.
    pub(crate) fn sort_key(&self) -> (DateTime<Utc>, Uuid) {
        (self.created_at, self.id)
    }
}
