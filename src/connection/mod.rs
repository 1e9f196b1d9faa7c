//! Process-wide database connection.
//!
//! `ConnectionManager` opens the connection once and hands out clones of the
//! resulting handle. Concurrent first calls share a single in-flight attempt;
//! a failed attempt leaves the manager disconnected so the next call retries.
//! Nothing is queued while disconnected: `handle()` fails immediately.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::OnceCell;
use tracing::Instrument;

mod errors;
pub mod mongo;

pub use errors::ConnectionError;
pub use mongo::MongoConnector;

/// Opens a connection to one endpoint. Implementations must be safe to call
/// again after a failure.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Clone + Send + Sync;

    async fn connect(&self) -> Result<Self::Handle, ConnectionError>;

    /// Endpoint description for logs, without credentials.
    fn endpoint(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Clears the connecting flag when the attempt finishes or its future is
/// dropped (e.g. by a caller's timeout).
struct ConnectingGuard<'a>(&'a AtomicBool);

impl<'a> ConnectingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ConnectionManager<C: Connector> {
    connector: C,
    handle: OnceCell<C::Handle>,
    connecting: AtomicBool,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            handle: OnceCell::new(),
            connecting: AtomicBool::new(false),
        }
    }

    /// Connects on first use; later calls return the memoized handle.
    pub async fn ensure_connected(&self) -> Result<C::Handle, ConnectionError> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle.clone());
        }

        let span = tracing::info_span!("Connecting to database", endpoint = %self.connector.endpoint());
        self.handle
            .get_or_try_init(|| async {
                let _connecting = ConnectingGuard::set(&self.connecting);
                let result = self.connector.connect().await;

                match &result {
                    Ok(_) => tracing::info!("Database connection established"),
                    Err(err) => tracing::error!("Failed to connect to database: {}", err),
                }
                result
            })
            .instrument(span)
            .await
            .cloned()
    }

    /// The handle of an established connection. Never connects.
    pub fn handle(&self) -> Result<C::Handle, ConnectionError> {
        self.handle.get().cloned().ok_or(ConnectionError::NotConnected)
    }

    pub fn state(&self) -> ConnectionState {
        if self.handle.initialized() {
            ConnectionState::Connected
        } else if self.connecting.load(Ordering::SeqCst) {
            ConnectionState::Connecting
        } else {
            ConnectionState::Disconnected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    /// Counts connect attempts and fails the first `failures` of them.
    struct CountingConnector {
        attempts: Arc<AtomicUsize>,
        failures: usize,
        delay: Duration,
    }

    impl CountingConnector {
        fn new(failures: usize) -> (Self, Arc<AtomicUsize>) {
            let attempts = Arc::new(AtomicUsize::new(0));
            let connector = Self {
                attempts: attempts.clone(),
                failures,
                delay: Duration::ZERO,
            };
            (connector, attempts)
        }
    }

    #[async_trait]
    impl Connector for CountingConnector {
        type Handle = usize;

        async fn connect(&self) -> Result<usize, ConnectionError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.delay).await;
            if attempt <= self.failures {
                return Err(ConnectionError::Unreachable(format!("attempt {}", attempt)));
            }
            Ok(attempt)
        }

        fn endpoint(&self) -> String {
            "test://counting".to_string()
        }
    }

    #[tokio::test]
    async fn connects_once_across_repeated_calls() {
        let (connector, attempts) = CountingConnector::new(0);
        let manager = ConnectionManager::new(connector);

        assert_eq!(manager.ensure_connected().await.unwrap(), 1);
        assert_eq!(manager.ensure_connected().await.unwrap(), 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(manager.state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn failure_is_returned_and_next_call_retries() {
        let (connector, attempts) = CountingConnector::new(1);
        let manager = ConnectionManager::new(connector);

        let err = manager.ensure_connected().await.unwrap_err();
        assert!(matches!(err, ConnectionError::Unreachable(_)));
        assert_eq!(manager.state(), ConnectionState::Disconnected);

        assert_eq!(manager.ensure_connected().await.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn handle_fails_fast_before_connecting() {
        let (connector, attempts) = CountingConnector::new(0);
        let manager = ConnectionManager::new(connector);

        assert!(matches!(manager.handle(), Err(ConnectionError::NotConnected)));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);

        manager.ensure_connected().await.unwrap();
        assert_eq!(manager.handle().unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_calls_share_one_attempt() {
        let (mut connector, attempts) = CountingConnector::new(0);
        connector.delay = Duration::from_millis(50);
        let manager = Arc::new(ConnectionManager::new(connector));

        let calls = (0..8).map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.ensure_connected().await })
        });
        for call in futures::future::join_all(calls).await {
            assert_eq!(call.unwrap().unwrap(), 1);
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timed_out_connect_leaves_manager_disconnected() {
        let (mut connector, attempts) = CountingConnector::new(0);
        connector.delay = Duration::from_millis(500);
        let manager = ConnectionManager::new(connector);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), manager.ensure_connected()).await;
        assert!(timed_out.is_err());
        assert_eq!(manager.state(), ConnectionState::Disconnected);
        assert!(matches!(manager.handle(), Err(ConnectionError::NotConnected)));

        assert_eq!(manager.ensure_connected().await.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
