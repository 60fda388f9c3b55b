//! Reconnecting stream client
//!
//! Explicit state machine over whatever transport the `Connector` supplies:
//! Disconnected -> Connecting -> Connected -> Disconnected, with a bounded
//! number of fixed-delay reconnect attempts before the terminal `GaveUp`.
//! No live backend ships with this repository, so the transport stays
//! injectable; tests drive the machine with a scripted connector.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;

use super::{EventBus, dispatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    GaveUp,
}

/// An established transport session yielding raw text frames.
pub trait Connection: Send {
    /// Next frame, or None once the peer closes the session.
    fn next_message(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// Transport factory the client reconnects through.
pub trait Connector: Send + Sync + 'static {
    type Conn: Connection + 'static;

    fn connect(&self) -> impl Future<Output = anyhow::Result<Self::Conn>> + Send;
}

pub struct StreamClient<C: Connector> {
    connector: C,
    bus: Arc<EventBus>,
    reconnect_delay: Duration,
    max_reconnect_attempts: u32,
    state_tx: watch::Sender<ConnectionState>,
    shutdown_rx: watch::Receiver<bool>,
}

/// Control surface for a running client: observe the connection state and
/// request a terminal disconnect.
#[derive(Clone)]
pub struct StreamHandle {
    state_rx: watch::Receiver<ConnectionState>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl StreamHandle {
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Terminal transition to Disconnected; any pending reconnect is
    /// abandoned.
    pub fn disconnect(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl<C: Connector> StreamClient<C> {
    pub fn new(
        connector: C,
        bus: Arc<EventBus>,
        reconnect_delay: Duration,
        max_reconnect_attempts: u32,
    ) -> (Self, StreamHandle) {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let client = Self {
            connector,
            bus,
            reconnect_delay,
            max_reconnect_attempts,
            state_tx,
            shutdown_rx,
        };
        let handle = StreamHandle {
            state_rx,
            shutdown_tx: Arc::new(shutdown_tx),
        };
        (client, handle)
    }

    pub fn from_config(connector: C, bus: Arc<EventBus>, config: &Config) -> (Self, StreamHandle) {
        Self::new(
            connector,
            bus,
            Duration::from_millis(config.reconnect_delay_ms),
            config.max_reconnect_attempts,
        )
    }

    /// Drive the connection loop until the attempt cap is exhausted or the
    /// handle requests a disconnect.
    pub async fn run(mut self) {
        let mut attempts: u32 = 0;

        loop {
            if *self.shutdown_rx.borrow() {
                self.set_state(ConnectionState::Disconnected);
                return;
            }

            self.set_state(ConnectionState::Connecting);
            match self.connector.connect().await {
                Ok(conn) => {
                    attempts = 0;
                    self.set_state(ConnectionState::Connected);
                    info!("Stream connected");

                    if self.read_until_closed(conn).await {
                        // Disconnect requested mid-session
                        self.set_state(ConnectionState::Disconnected);
                        return;
                    }
                    self.set_state(ConnectionState::Disconnected);
                    info!("Stream closed by peer");
                }
                Err(e) => {
                    warn!(error = %e, "Stream connection failed");
                }
            }

            attempts += 1;
            if attempts > self.max_reconnect_attempts {
                error!(attempts, "Max reconnect attempts reached, giving up");
                self.set_state(ConnectionState::GaveUp);
                return;
            }

            info!(
                attempt = attempts,
                max = self.max_reconnect_attempts,
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "Reconnecting after delay"
            );

            tokio::select! {
                _ = sleep(self.reconnect_delay) => {}
                changed = self.shutdown_rx.changed() => {
                    // A dropped handle can never request a disconnect later,
                    // so treat it like one now
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        self.set_state(ConnectionState::Disconnected);
                        return;
                    }
                }
            }
        }
    }

    /// Returns true if the session ended because disconnect was requested.
    async fn read_until_closed(&mut self, mut conn: C::Conn) -> bool {
        loop {
            tokio::select! {
                frame = conn.next_message() => match frame {
                    Some(raw) => dispatch(&self.bus, &raw),
                    None => return false,
                },
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        return true;
                    }
                }
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        let _ = self.state_tx.send(state);
    }
}
