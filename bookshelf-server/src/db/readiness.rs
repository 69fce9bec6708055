//! Connection readiness shared between the store, the monitor and the gate

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Connection state of the store client.
///
/// Only [`ConnectionState::Connected`] counts as ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
}

impl ConnectionState {
    pub fn is_ready(self) -> bool {
        self == Self::Connected
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Connecting => "connecting",
            Self::Disconnecting => "disconnecting",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloneable handle to the current connection state.
#[derive(Debug, Clone)]
pub struct Readiness {
    tx: Arc<watch::Sender<ConnectionState>>,
}

impl Readiness {
    pub fn new(initial: ConnectionState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Current state.
    pub fn get(&self) -> ConnectionState {
        *self.tx.borrow()
    }

    /// Replace the state, returning the previous one.
    pub fn set(&self, state: ConnectionState) -> ConnectionState {
        self.tx.send_replace(state)
    }

    /// Publish a monitor observation unless shutdown has begun.
    ///
    /// Returns the previous state, or `None` if the state is
    /// `Disconnecting` and was left untouched.
    pub fn publish(&self, next: ConnectionState) -> Option<ConnectionState> {
        let mut previous = None;
        self.tx.send_if_modified(|state| {
            if *state == ConnectionState::Disconnecting {
                return false;
            }
            previous = Some(*state);
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
        previous
    }

    /// Wait until the state becomes `Connected`.
    pub async fn connected(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            let ready = rx.borrow_and_update().is_ready();
            // The sender lives in `self`, so `changed` only errors if it is dropped.
            if ready || rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new(ConnectionState::Connecting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn only_connected_is_ready() {
        assert!(ConnectionState::Connected.is_ready());
        assert!(!ConnectionState::Disconnected.is_ready());
        assert!(!ConnectionState::Connecting.is_ready());
        assert!(!ConnectionState::Disconnecting.is_ready());
    }

    #[test]
    fn set_returns_previous_state() {
        let readiness = Readiness::default();
        assert_eq!(readiness.get(), ConnectionState::Connecting);

        let previous = readiness.set(ConnectionState::Connected);
        assert_eq!(previous, ConnectionState::Connecting);
        assert_eq!(readiness.get(), ConnectionState::Connected);
    }

    #[test]
    fn clones_share_state() {
        let readiness = Readiness::new(ConnectionState::Connected);
        let other = readiness.clone();
        other.set(ConnectionState::Disconnected);
        assert_eq!(readiness.get(), ConnectionState::Disconnected);
    }

    #[test]
    fn publish_does_not_override_shutdown() {
        let readiness = Readiness::new(ConnectionState::Connected);
        assert_eq!(
            readiness.publish(ConnectionState::Disconnected),
            Some(ConnectionState::Connected)
        );

        readiness.set(ConnectionState::Disconnecting);
        assert_eq!(readiness.publish(ConnectionState::Connected), None);
        assert_eq!(readiness.get(), ConnectionState::Disconnecting);
    }

    #[tokio::test]
    async fn connected_resolves_after_transition() {
        let readiness = Readiness::new(ConnectionState::Disconnected);
        let waiter = {
            let readiness = readiness.clone();
            tokio::spawn(async move { readiness.connected().await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        readiness.set(ConnectionState::Connected);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .expect("waiter panicked");
    }
}
