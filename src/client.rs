// src/client.rs
// Connection lifecycle: connect, ping, close

use bson::{doc, Document};
use mongodb::options::{ClientOptions, ReadPreference, SelectionCriteria};
use mongodb::sync::{ClientSession, Collection};
use tracing::info;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::session::SessionTracker;

/// Handle to one MongoDB deployment, bound to a single database/collection
/// pair fixed at construction.
///
/// The handle is intended to be long-lived and shared across threads; the
/// driver multiplexes concurrent operations over its own connection pool.
pub struct Client {
    config: StoreConfig,
    inner: mongodb::sync::Client,
    sessions: SessionTracker<ClientSession>,
}

impl Client {
    /// Connect to the store described by `config` and verify reachability
    /// with a ping. An unreachable or malformed address fails here, not on
    /// first use.
    pub fn connect(config: StoreConfig) -> Result<Client> {
        let mut options = ClientOptions::parse(&config.uri)
            .run()
            .map_err(StoreError::Connection)?;
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.server_selection_timeout);

        let inner = mongodb::sync::Client::with_options(options).map_err(StoreError::Connection)?;

        let client = Client {
            config,
            inner,
            sessions: SessionTracker::new(),
        };
        client.ping()?;

        info!(
            database = %client.config.database,
            collection = %client.config.collection,
            "connected"
        );
        Ok(client)
    }

    /// Round-trip a `ping` command against the primary node.
    pub fn ping(&self) -> Result<()> {
        self.inner
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
            .run()
            .map(drop)
            .map_err(StoreError::Connection)
    }

    /// Shut the connection down, aborting any still-registered transactions.
    ///
    /// Consumes the client, so a second close is a compile error rather than
    /// a runtime fault.
    pub fn close(self) {
        // Sessions borrow pooled server sessions; they must go before shutdown.
        self.sessions.clear();
        self.inner.shutdown().run();
        info!("connection closed");
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The one collection every operation on this client targets.
    pub(crate) fn collection(&self) -> Collection<Document> {
        self.inner
            .database(&self.config.database)
            .collection(&self.config.collection)
    }

    pub(crate) fn raw(&self) -> &mongodb::sync::Client {
        &self.inner
    }

    pub(crate) fn sessions(&self) -> &SessionTracker<ClientSession> {
        &self.sessions
    }
}
