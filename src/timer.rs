//! Cancellable one-shot timers on top of tokio tasks.
//!
//! Each pending timer is a spawned task that sleeps and then sends a
//! [`TimerFired`] on the channel. Handles are kept per [`TimerId`] together
//! with a generation number, so a fire that raced with a cancel or a
//! reschedule can be recognised and dropped by [`TimerSet::accept`].

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::effect::{Effect, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub timer: TimerId,
    generation: u64,
}

pub struct TimerSet {
    tx: mpsc::UnboundedSender<TimerFired>,
    handles: HashMap<TimerId, (u64, JoinHandle<()>)>,
    next_generation: u64,
}

impl TimerSet {
    pub fn new(tx: mpsc::UnboundedSender<TimerFired>) -> Self {
        Self {
            tx,
            handles: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Create a timer set along with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Arm `timer`, replacing (and aborting) any pending timer with the same id.
    pub fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let generation = self.next_generation;
        self.next_generation += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(TimerFired { timer, generation });
        });

        if let Some((_, old)) = self.handles.insert(timer, (generation, handle)) {
            old.abort();
        }
    }

    /// Abort a pending timer. Returns false if nothing was pending.
    pub fn cancel(&mut self, timer: TimerId) -> bool {
        match self.handles.remove(&timer) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, (_, handle)) in self.handles.drain() {
            handle.abort();
        }
    }

    /// Check a fired timer against the pending set. Returns the id when the
    /// fire is current, `None` for one that was cancelled or rescheduled.
    pub fn accept(&mut self, fired: TimerFired) -> Option<TimerId> {
        match self.handles.get(&fired.timer) {
            Some((generation, _)) if *generation == fired.generation => {
                self.handles.remove(&fired.timer);
                Some(fired.timer)
            }
            _ => {
                debug!(timer = ?fired.timer, "dropping stale timer");
                None
            }
        }
    }

    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.handles.contains_key(&timer)
    }

    pub fn pending(&self) -> usize {
        self.handles.len()
    }

    /// Carry out the timer effects. Anything else is handed back to the caller.
    pub fn apply(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut rest = Vec::new();
        for effect in effects {
            match effect {
                Effect::Schedule { timer, delay } => self.schedule(timer, delay),
                Effect::Cancel(timer) => {
                    self.cancel(timer);
                }
                other => rest.push(other),
            }
        }
        rest
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
