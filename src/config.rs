// src/config.rs
// Connection configuration: store address, collection binding, TTL window, timeouts

use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`Client`](crate::Client).
///
/// The database/collection pair is fixed for the lifetime of the client;
/// every CRUD and index operation targets that one collection. `ttl` is the
/// expiry window applied by [`set_ttl`](crate::Client::set_ttl).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Expiry window for the TTL index.
    pub ttl: Duration,
    /// Optional per-operation server time limit (`maxTimeMS`) applied to
    /// read operations. `None` inherits the driver default.
    pub op_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

impl StoreConfig {
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        StoreConfig {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
            ttl,
            op_timeout: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            server_selection_timeout: DEFAULT_SELECTION_TIMEOUT,
        }
    }

    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new(
            "mongodb://localhost:27017",
            "cogman",
            "tasks",
            Duration::from_secs(3600),
        );

        assert_eq!(config.database, "cogman");
        assert_eq!(config.collection, "tasks");
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert!(config.op_timeout.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.server_selection_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_overrides() {
        let config = StoreConfig::new("mongodb://host:27017", "db", "col", Duration::from_secs(60))
            .with_op_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2))
            .with_server_selection_timeout(Duration::from_secs(3));

        assert_eq!(config.op_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.server_selection_timeout, Duration::from_secs(3));
    }
}
