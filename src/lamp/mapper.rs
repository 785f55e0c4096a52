//! LampMapper - conversions between `LampEntity` and the wire models.

use chrono::{DateTime, SecondsFormat, Utc};

use super::wire::Lamp;
use super::LampEntity;
use crate::error::LampError;

/// Field-for-field projection between the entity and the wire.
///
/// No validation happens here apart from timestamp parsing.
pub struct LampMapper;

impl LampMapper {
    pub fn to_wire(entity: &LampEntity) -> Lamp {
        Lamp {
            id: entity.id,
            status: entity.status,
            created_at: format_timestamp(&entity.created_at),
            updated_at: format_timestamp(&entity.updated_at),
        }
    }

    pub fn from_wire(lamp: &Lamp) -> Result<LampEntity, LampError> {
        Ok(LampEntity {
            id: lamp.id,
            status: lamp.status,
            created_at: parse_timestamp("createdAt", &lamp.created_at)?,
            updated_at: parse_timestamp("updatedAt", &lamp.updated_at)?,
        })
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, LampError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| LampError::MalformedTimestamp {
            field,
            value: value.to_string(),
        })
}
