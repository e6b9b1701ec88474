//! Bounded channel carrying parameter changes from the panel to the driver

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use crate::error::{Error, Result};
use crate::params::{ParamChange, ParamField};

/// Default number of pending changes before senders see [`Error::QueueFull`]
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Create a connected sender/inbox pair holding at most `capacity` changes
pub fn param_channel(capacity: usize) -> (ParamSender, ParamInbox) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::sync_channel(capacity);
    (ParamSender { tx, capacity }, ParamInbox { rx })
}

/// Sending half, held by the parameter panel
#[derive(Debug, Clone)]
pub struct ParamSender {
    tx: SyncSender<ParamChange>,
    capacity: usize,
}

impl ParamSender {
    /// Queue a change without blocking
    pub fn send(&self, change: ParamChange) -> Result<()> {
        self.tx.try_send(change).map_err(|err| match err {
            TrySendError::Full(_) => Error::QueueFull {
                capacity: self.capacity,
            },
            TrySendError::Disconnected(_) => Error::Disconnected,
        })
    }

    pub fn send_value(&self, field: ParamField, value: f32) -> Result<()> {
        self.send(ParamChange::new(field, value))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Receiving half, drained by the frame driver once per frame
#[derive(Debug)]
pub struct ParamInbox {
    rx: Receiver<ParamChange>,
}

impl ParamInbox {
    /// Everything currently queued, in send order; never blocks
    pub fn drain(&self) -> Vec<ParamChange> {
        let mut changes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(change) => changes.push(change),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changes
    }
}
