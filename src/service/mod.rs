//! Lamp service - coordinates the HTTP boundary with a `LampStore`.
//!
//! `LampService<S>` owns a store and speaks in wire models: it parses lamp
//! ids, applies paging, and maps entities through `LampMapper`. The HTTP
//! router holds one behind an `Arc`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lamp_control::{InMemoryLampStore, LampCreate, LampService, PageRequest};
//!
//! let service = LampService::new(InMemoryLampStore::new());
//! let lamp = service.create(LampCreate { status: true }).await?;
//! let page = service.list(PageRequest::default()).await?;
//! ```

mod lamp_service;
mod page;

pub use lamp_service::LampService;
pub use page::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
