//! Wire models exchanged with HTTP clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lamp as seen by clients. Timestamps are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lamp {
    pub id: Uuid,
    pub status: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /v1/lamps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampCreate {
    pub status: bool,
}

/// Body of `PUT /v1/lamps/{lampId}`. The status is always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampUpdate {
    pub status: bool,
}

/// One page of `GET /v1/lamps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LampPage {
    pub data: Vec<Lamp>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}
