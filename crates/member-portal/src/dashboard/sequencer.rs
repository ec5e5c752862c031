use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

/// Orders overlapping requests per key (a user id): each `begin` supersedes every earlier
/// ticket for the same key, so stale responses can be dropped and in-flight work cancelled.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    channels: Mutex<HashMap<String, watch::Sender<u64>>>,
}

/// Handle for one in-flight request.
#[derive(Debug)]
pub struct RequestTicket {
    key: String,
    sequence: u64,
    latest: watch::Receiver<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, key: &str) -> RequestTicket {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let sender = channels
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(0).0);
        let sequence = *sender.borrow() + 1;
        sender.send_replace(sequence);

        RequestTicket {
            key: key.to_string(),
            sequence,
            latest: sender.subscribe(),
        }
    }

    /// Drop the key's channel once its newest request is done.
    pub fn finish(&self, ticket: &RequestTicket) {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let is_latest = channels
            .get(&ticket.key)
            .is_some_and(|sender| *sender.borrow() == ticket.sequence);
        if is_latest {
            channels.remove(&ticket.key);
        }
    }

    pub fn in_flight(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_current(&self) -> bool {
        *self.latest.borrow() == self.sequence
    }

    /// Resolves once a newer request for the same key begins; never resolves otherwise.
    pub async fn superseded(&self) {
        let mut latest = self.latest.clone();
        loop {
            if *latest.borrow_and_update() != self.sequence {
                return;
            }
            if latest.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
