pub mod config;
mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod lamp;
pub mod service;
pub mod store;
pub mod telemetry;

pub use config::{DatabaseConfig, DatabaseTarget, LogFormat, OperationMode, ServiceConfig};
pub use error::LampError;
pub use lamp::{Lamp, LampCreate, LampEntity, LampMapper, LampPage, LampUpdate};
pub use service::{LampService, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
#[cfg(feature = "postgres")]
pub use store::PostgresLampStore;
pub use store::{InMemoryLampStore, LampBackend, LampStore};
pub use telemetry::init_tracing;
