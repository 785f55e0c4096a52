use std::fmt;

/// Error type shared by the mapper, the stores and the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LampError {
    /// The id does not name an active lamp.
    NotFound(String),
    /// A payload or query parameter could not be turned into a request.
    MalformedInput(String),
    /// A wire timestamp could not be parsed.
    MalformedTimestamp { field: &'static str, value: String },
    /// The backing store could not complete the operation.
    StorageUnavailable(String),
    /// Startup configuration is invalid.
    Config(String),
}

impl fmt::Display for LampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LampError::NotFound(id) => write!(f, "lamp not found: {}", id),
            LampError::MalformedInput(msg) => write!(f, "malformed input: {}", msg),
            LampError::MalformedTimestamp { field, value } => {
                write!(f, "malformed timestamp in {}: {:?}", field, value)
            }
            LampError::StorageUnavailable(msg) => write!(f, "storage unavailable: {}", msg),
            LampError::Config(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for LampError {}

impl LampError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            LampError::NotFound(_) => 404,
            LampError::MalformedInput(_) => 400,
            LampError::MalformedTimestamp { .. } => 400,
            LampError::StorageUnavailable(_) => 500,
            LampError::Config(_) => 500,
        }
    }

    /// True for the errors a client caused and can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<serde_json::Error> for LampError {
    fn from(err: serde_json::Error) -> Self {
        LampError::MalformedInput(err.to_string())
    }
}

// Lookups by id use `fetch_optional` and report `NotFound` with the id, so
// every driver error here is a storage failure.
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for LampError {
    fn from(err: sqlx::Error) -> Self {
        LampError::StorageUnavailable(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::migrate::MigrateError> for LampError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        LampError::StorageUnavailable(format!("migration failed: {}", err))
    }
}
