//! In-memory reload notification bus.
//!
//! Views register interest in a logical context ("center-17",
//! "sms-campaign-42"); any completed action triggers that context and every
//! current subscriber re-fetches its own data. A trigger that lands before
//! the first subscriber is retained and replayed, so racing a dialog close
//! against view construction does not lose the refresh.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Buffered notifications per listener before coalescing kicks in.
const CHANNEL_CAPACITY: usize = 64;

/// Error returned by a [`ReloadListener`] once its context was cleaned up
/// and every buffered notification has been drained.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecvError {
    #[error("reload channel closed")]
    Closed,
}

struct Channel {
    tx: broadcast::Sender<()>,
    /// Set by the first trigger on this channel instance; late subscribers
    /// get it replayed.
    triggered: bool,
}

impl Channel {
    fn new() -> Self {
        Self {
            tx: broadcast::channel(CHANNEL_CAPACITY).0,
            triggered: false,
        }
    }
}

/// Registry of reload channels keyed by context string.
///
/// Construct one per application session and hand it to every component
/// that needs it (usually behind an `Arc`). Context keys are opaque;
/// uniqueness is the caller's responsibility.
#[derive(Default)]
pub struct ReloadBus {
    channels: RwLock<HashMap<String, Channel>>,
}

impl ReloadBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to reload notifications for `context`, creating the
    /// channel if it does not exist yet.
    ///
    /// If a reload was already triggered on this channel instance, the
    /// listener's first `recv` resolves immediately.
    pub fn subscribe(&self, context: &str) -> ReloadListener {
        let mut channels = self.channels.write();
        let channel = channels
            .entry(context.to_string())
            .or_insert_with(Channel::new);
        trace!(context, "reload listener attached");
        ReloadListener {
            replay: channel.triggered,
            rx: channel.tx.subscribe(),
        }
    }

    /// Trigger a reload for `context`.
    ///
    /// The channel is created if absent so the notification is retained for
    /// the first future subscriber. Fan-out into every live listener's
    /// buffer completes before this returns.
    pub fn trigger(&self, context: &str) {
        let mut channels = self.channels.write();
        let channel = channels
            .entry(context.to_string())
            .or_insert_with(Channel::new);
        channel.triggered = true;
        // Err just means nobody is listening right now; the replay flag
        // keeps the notification for whoever subscribes next.
        let receivers = channel.tx.send(()).unwrap_or(0);
        debug!(context, receivers, "reload triggered");
    }

    /// Close and discard the channel for `context`. No-op when absent.
    ///
    /// Existing listeners drain whatever is already buffered, then observe
    /// [`RecvError::Closed`]. A later `subscribe` or `trigger` for the same
    /// context string starts a brand-new channel with no replay history.
    pub fn cleanup(&self, context: &str) {
        if self.channels.write().remove(context).is_some() {
            debug!(context, "reload channel cleaned up");
        }
    }
}

/// Subscriber handle for one context.
///
/// Dropping the listener detaches it; notifications triggered afterwards
/// are not delivered to it.
pub struct ReloadListener {
    replay: bool,
    rx: broadcast::Receiver<()>,
}

impl ReloadListener {
    /// Wait for the next reload notification.
    ///
    /// A listener that fell behind the channel buffer gets the missed
    /// notifications coalesced into one; reloads are idempotent, so a
    /// single refresh covers them all.
    pub async fn recv(&mut self) -> Result<(), RecvError> {
        if self.replay {
            self.replay = false;
            trace!("replaying retained reload notification");
            return Ok(());
        }
        match self.rx.recv().await {
            Ok(()) => Ok(()),
            Err(broadcast::error::RecvError::Lagged(_)) => Ok(()),
            Err(broadcast::error::RecvError::Closed) => Err(RecvError::Closed),
        }
    }

    /// Non-blocking probe. `Ok(true)` means a notification was consumed.
    pub fn try_recv(&mut self) -> Result<bool, RecvError> {
        if self.replay {
            self.replay = false;
            return Ok(true);
        }
        match self.rx.try_recv() {
            Ok(()) => Ok(true),
            Err(broadcast::error::TryRecvError::Empty) => Ok(false),
            Err(broadcast::error::TryRecvError::Lagged(_)) => Ok(true),
            Err(broadcast::error::TryRecvError::Closed) => Err(RecvError::Closed),
        }
    }
}
