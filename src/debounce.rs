//! Keystroke debouncing for the sidebar search filter.
//!
//! Every `schedule` call cancels the pending delivery and starts a new
//! timer. Deliveries carry a generation number so the receiver can drop a
//! value that was overtaken while it sat in the channel.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Default delay between the last keystroke and the filter update
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// A value that survived the debounce window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    pub generation: u64,
    pub value: T,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<CancellationToken>,
    sender: mpsc::Sender<Debounced<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its deliveries arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<Debounced<T>>) {
        let (sender, receiver) = mpsc::channel(16);
        (
            Self {
                delay,
                generation: 0,
                pending: None,
                sender,
            },
            receiver,
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing whatever was pending. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, value: T) -> u64 {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let sender = self.sender.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("Debounce: generation {} cancelled", generation);
                }
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = sender.send(Debounced { generation, value }).await {
                        log::error!("Debounce: failed to deliver generation {}: {}", generation, e);
                    }
                }
            }
        });

        generation
    }

    /// Drop the pending delivery, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Whether a delivery is still the latest scheduled value
    pub fn is_current(&self, delivery: &Debounced<T>) -> bool {
        delivery.generation == self.generation
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
