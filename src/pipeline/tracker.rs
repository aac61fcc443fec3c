use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

struct Inner {
    pending: watch::Sender<usize>,
    issued: AtomicUsize,
    completed: AtomicUsize,
}

/// Join barrier over a growing set of work units.
///
/// Every unit is a [`Ticket`]: issuing one increments the pending count and
/// dropping it decrements it, so each increment is matched by exactly one
/// decrement.
#[derive(Clone)]
pub struct WorkTracker {
    inner: Arc<Inner>,
}

impl Default for WorkTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkTracker {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                pending,
                issued: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
            }),
        }
    }

    pub fn issue(&self) -> Ticket {
        self.inner.issued.fetch_add(1, Ordering::SeqCst);
        self.inner.pending.send_modify(|pending| *pending += 1);
        Ticket {
            inner: self.inner.clone(),
        }
    }

    pub fn pending(&self) -> usize {
        *self.inner.pending.borrow()
    }

    pub fn issued(&self) -> usize {
        self.inner.issued.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.inner.completed.load(Ordering::SeqCst)
    }

    /// Resolves once no tickets are outstanding.
    pub async fn drained(&self) {
        let mut rx = self.inner.pending.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|pending| *pending == 0).await;
    }
}

/// One outstanding unit of work. Completes on drop.
#[must_use = "dropping a ticket completes its unit of work"]
pub struct Ticket {
    inner: Arc<Inner>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.inner.completed.fetch_add(1, Ordering::SeqCst);
        self.inner
            .pending
            .send_modify(|pending| *pending -= 1);
    }
}

/// An item travelling through a queue together with its ticket.
pub struct Tracked<T> {
    pub item: T,
    ticket: Ticket,
}

impl<T> Tracked<T> {
    pub fn new(item: T, ticket: Ticket) -> Self {
        Self { item, ticket }
    }

    pub fn into_parts(self) -> (T, Ticket) {
        (self.item, self.ticket)
    }
}
