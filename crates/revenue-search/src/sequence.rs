//! Sequence-guarded state for racing asynchronous lookups

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// A value together with the ticket of the request that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Sequenced<T> {
    pub ticket: u64,
    pub value: T,
}

/// State written by overlapping requests of one logical operation
///
/// Each request takes a ticket from [`issue`](Self::issue) before it starts.
/// [`apply`](Self::apply) only stores a result whose ticket is at least the
/// highest ticket applied so far, so a slow early response can never
/// overwrite a newer one. The check and the write happen under the watch
/// channel's lock.
#[derive(Debug)]
pub struct SequencedSlot<T> {
    issued: AtomicU64,
    sender: watch::Sender<Sequenced<T>>,
}

impl<T> SequencedSlot<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(Sequenced {
            ticket: 0,
            value: initial,
        });
        Self {
            issued: AtomicU64::new(0),
            sender,
        }
    }

    /// Reserve the next ticket
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Highest ticket handed out
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Ticket of the currently stored value
    pub fn applied(&self) -> u64 {
        self.sender.borrow().ticket
    }

    /// Store `value` unless a newer ticket has already been applied
    ///
    /// Returns whether the value was stored. Re-applying the current ticket
    /// is allowed, which lets a request publish an interim state first.
    pub fn apply(&self, ticket: u64, value: T) -> bool {
        self.sender.send_if_modified(move |current| {
            if ticket < current.ticket {
                return false;
            }
            *current = Sequenced { ticket, value };
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Sequenced<T>> {
        self.sender.subscribe()
    }

    pub fn borrow(&self) -> watch::Ref<'_, Sequenced<T>> {
        self.sender.borrow()
    }
}

impl<T: Clone> SequencedSlot<T> {
    pub fn get(&self) -> T {
        self.sender.borrow().value.clone()
    }
}
