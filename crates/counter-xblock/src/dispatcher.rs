//! Dispatcher allows thunks and middleware to dispatch back into the store

use crate::actions::Dispatch;
use tokio::sync::mpsc;

/// Queues items for the store
///
/// Queued items are processed right after the dispatch that produced them,
/// or on the next event loop tick when sent from a spawned task.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Dispatch>,
}

impl Dispatcher {
    pub fn new(tx: mpsc::UnboundedSender<Dispatch>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, item: impl Into<Dispatch>) {
        if let Err(e) = self.tx.send(item.into()) {
            log::error!("Failed to dispatch: {}", e);
        }
    }
}
