// src/session.rs
// Transaction session tracking: one live session per caller-chosen identifier

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::client::Client;
use crate::error::{Result, StoreError};

/// Mutex-guarded map from transaction identifier to a live session handle.
///
/// Generic over the handle type so the state machine can be exercised without
/// a server; the [`Client`] instantiates it with the driver's session type.
/// Invariant: an identifier is present only between a successful start and
/// either a successful commit/abort or a restore after a failed commit.
pub struct SessionTracker<S> {
    sessions: Mutex<HashMap<String, S>>,
}

impl<S> SessionTracker<S> {
    pub fn new() -> Self {
        SessionTracker {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a session under `id`. Fails if `id` is already active, so a
    /// duplicate start can never silently overwrite (and leak) a live session.
    pub fn insert(&self, id: &str, session: S) -> Result<()> {
        let mut sessions = self.sessions.lock();
        if sessions.contains_key(id) {
            return Err(StoreError::Session(format!(
                "transaction '{id}' already active"
            )));
        }
        sessions.insert(id.to_string(), session);
        Ok(())
    }

    /// Remove and return the session for `id`. A missing identifier is a
    /// typed error, never a panic.
    pub fn take(&self, id: &str) -> Result<S> {
        self.sessions
            .lock()
            .remove(id)
            .ok_or_else(|| StoreError::Session(format!("unknown transaction '{id}'")))
    }

    /// Put a session back after a failed commit; the entry stays visible so
    /// the caller can retry or abort.
    pub fn restore(&self, id: &str, session: S) {
        self.sessions.lock().insert(id.to_string(), session);
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.sessions.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Drop all tracked sessions. Dropping a session with an open transaction
    /// aborts it driver-side.
    pub fn clear(&self) {
        self.sessions.lock().clear();
    }
}

impl<S> Default for SessionTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Start a transaction under the caller-chosen identifier `id`.
    ///
    /// Starts a driver session, begins a transaction on it, and registers it
    /// in the tracker. On any failure the tracker is left unmodified and the
    /// partially-created session is dropped (which aborts it), so no entry
    /// ever exists without a started transaction behind it.
    ///
    /// Transactions require the server to run as a replica set or sharded
    /// cluster.
    pub fn start_transaction(&self, id: &str) -> Result<()> {
        if self.sessions().is_active(id) {
            return Err(StoreError::Session(format!(
                "transaction '{id}' already active"
            )));
        }

        let mut session = self
            .raw()
            .start_session()
            .run()
            .map_err(|e| StoreError::Session(format!("failed to start session for '{id}': {e}")))?;

        session
            .start_transaction()
            .run()
            .map_err(|e| StoreError::Session(format!("failed to start transaction '{id}': {e}")))?;

        self.sessions().insert(id, session)?;
        debug!(id, "transaction started");
        Ok(())
    }

    /// Commit the transaction registered under `id` and end its session.
    ///
    /// On commit failure the session is left open and stays registered, so
    /// the caller can retry the commit or abort. An identifier with no prior
    /// [`start_transaction`](Client::start_transaction) fails with a session
    /// error and leaves the tracker unchanged.
    pub fn commit_transaction(&self, id: &str) -> Result<()> {
        let mut session = self.sessions().take(id)?;

        if let Err(e) = session.commit_transaction().run() {
            warn!(id, error = %e, "commit failed, transaction left open");
            self.sessions().restore(id, session);
            return Err(StoreError::Session(format!(
                "failed to commit transaction '{id}': {e}"
            )));
        }

        // Dropping the session returns it to the driver's pool.
        debug!(id, "transaction committed");
        Ok(())
    }

    /// Abort the transaction registered under `id` and end its session.
    ///
    /// The tracker entry is removed even when the server-side abort fails:
    /// an abandoned transaction times out server-side, and keeping the entry
    /// would wedge the identifier.
    pub fn abort_transaction(&self, id: &str) -> Result<()> {
        let mut session = self.sessions().take(id)?;

        session
            .abort_transaction()
            .run()
            .map_err(|e| StoreError::Session(format!("failed to abort transaction '{id}': {e}")))?;
        debug!(id, "transaction aborted");
        Ok(())
    }

    /// Whether a transaction is currently registered under `id`.
    pub fn transaction_active(&self, id: &str) -> bool {
        self.sessions().is_active(id)
    }
}
