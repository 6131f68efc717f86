//! Lazily opened, shared storage handle.
//!
//! The first caller starts the open; every caller arriving while it is in
//! flight awaits the same attempt. A failed attempt leaves the manager idle
//! so the next caller tries again. Only the attempt currently held in the
//! state may settle it: a caller waking up on an older attempt leaves a
//! newer one alone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cv_core::ports::{PhotoRepositoryPort, StorageConnectorPort};
use cv_core::PhotoError;
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

type OpenAttempt = Shared<BoxFuture<'static, Result<Arc<dyn PhotoRepositoryPort>, PhotoError>>>;

enum ConnectionState {
    Idle,
    Opening(OpenAttempt),
    Open(Arc<dyn PhotoRepositoryPort>),
}

pub struct ConnectionManager {
    connector: Arc<dyn StorageConnectorPort>,
    state: Mutex<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn StorageConnectorPort>) -> Self {
        Self {
            connector,
            state: Mutex::new(ConnectionState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConnectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the open handle, opening storage first if needed.
    pub async fn ensure_connection(&self) -> Result<Arc<dyn PhotoRepositoryPort>, PhotoError> {
        let attempt = {
            let mut state = self.lock();
            let pending = match &*state {
                ConnectionState::Open(repo) => return Ok(Arc::clone(repo)),
                ConnectionState::Opening(attempt) => Some(attempt.clone()),
                ConnectionState::Idle => None,
            };
            match pending {
                Some(attempt) => attempt,
                None => {
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move {
                        connector
                            .open()
                            .await
                            .map_err(|e| PhotoError::Connection(format!("{:#}", e)))
                    }
                    .boxed()
                    .shared();
                    debug!("Opening photo storage");
                    *state = ConnectionState::Opening(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        let mut state = self.lock();
        let still_current =
            matches!(&*state, ConnectionState::Opening(current) if current.ptr_eq(&attempt));
        if !still_current {
            // Closed meanwhile, or already settled by another waiter.
            return result;
        }
        match &result {
            Ok(repo) => {
                info!("Photo storage connection established");
                *state = ConnectionState::Open(Arc::clone(repo));
            }
            Err(err) => {
                warn!(error = %err, "Photo storage open failed, next call retries");
                *state = ConnectionState::Idle;
            }
        }
        result
    }

    /// Drop the handle so the next call opens storage again.
    ///
    /// Returns `true` when an open handle or a pending attempt was discarded.
    pub fn close(&self) -> bool {
        let previous = std::mem::replace(&mut *self.lock(), ConnectionState::Idle);
        !matches!(previous, ConnectionState::Idle)
    }

    pub fn is_open(&self) -> bool {
        matches!(*self.lock(), ConnectionState::Open(_))
    }

    pub fn is_storage_available(&self) -> bool {
        self.connector.is_available()
    }
}
