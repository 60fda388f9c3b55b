//! Cancelable fixed-interval poller
//!
//! The cancellation flag is re-checked before every firing, so a poller
//! cancelled while idle never runs its task against stale state again.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct PollerHandle {
    cancel_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }

    /// Cancel and wait for the loop to wind down.
    pub async fn shutdown(self) {
        self.cancel();
        let _ = self.join.await;
    }
}

/// Run `task` every `period` until the handle cancels it. The first firing
/// happens immediately.
pub fn spawn_poller<F, Fut>(period: Duration, mut task: F) -> PollerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    let join = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if *cancel_rx.borrow() {
                        break;
                    }
                    task().await;
                }
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Poller stopped");
    });

    PollerHandle { cancel_tx, join }
}
