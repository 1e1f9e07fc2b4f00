// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-threaded cooperative event bus (§4.1).
//!
//! `EventBus<M>` backs both the Controller's and the Warden's independent
//! dispatch loops: each owns one `EventBus<M>`, runs as its own `tokio`
//! task, and fully finishes handling one message before the next is
//! delivered. Producers — including the bus's own owner, from inside a
//! handler — only ever get a cloneable [`EventBusHandle`] and can never
//! observe or mutate the deferred-replay queue directly; that queue is
//! driven exclusively by the owning dispatch loop around `transitionTo`.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;

/// Bounded diagnostic ring buffer size (§4.1: "last N handled messages, N=100").
const LOG_CAPACITY: usize = 100;

/// One entry in the bus's diagnostic ring buffer.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub seq: u64,
    pub summary: String,
    pub epoch_ms: u64,
}

/// Cloneable producer handle. Safe to hand to manager tasks, external
/// collaborators, or `sendDelayed` timers — anything that needs to post a
/// message back onto the owning dispatcher without touching its state.
pub struct EventBusHandle<M> {
    tx: mpsc::UnboundedSender<M>,
}

impl<M> Clone for EventBusHandle<M> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<M: Send + 'static> EventBusHandle<M> {
    /// `send(msg)` — enqueue at tail. Silently dropped if the dispatcher has
    /// already shut down; a shutting-down bus has no one left to observe it.
    pub fn send(&self, msg: M) {
        if self.tx.send(msg).is_err() {
            tracing::trace!("event bus send dropped: dispatcher already shut down");
        }
    }

    /// `sendDelayed(msg, d)` — enqueue after at least `d` has elapsed.
    ///
    /// Delivery is via a detached task sleeping on `tokio::time`, so tests
    /// that pause and advance the tokio clock (`start_paused = true`) get
    /// deterministic delayed delivery without real wall-clock waits.
    pub fn send_delayed(&self, msg: M, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let _ = tx.send(msg);
        });
    }
}

/// The per-state deferred-message queue (§4.1 `defer`).
///
/// Owned by [`EventBus`], never exposed as a free-standing producer handle:
/// only the bus's owner (inside a handler) may defer, and only the
/// dispatcher loop may drain it (on `transitionTo`).
#[derive(Debug, Default)]
pub struct Deferral<M> {
    queue: VecDeque<M>,
}

impl<M> Deferral<M> {
    fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    fn push(&mut self, msg: M) {
        self.queue.push_back(msg);
    }

    fn take_all(&mut self) -> Vec<M> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// A message pulled off the bus, tagged with whether it arrived fresh off
/// the channel or is a deferred message being replayed after a state
/// transition. Replay order is always original relative order (§8 invariant 7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched<M> {
    Fresh(M),
    Replayed(M),
}

impl<M> Dispatched<M> {
    pub fn into_inner(self) -> M {
        match self {
            Dispatched::Fresh(msg) | Dispatched::Replayed(msg) => msg,
        }
    }

    pub fn is_replayed(&self) -> bool {
        matches!(self, Dispatched::Replayed(_))
    }
}

/// Owns the receiving end of the bus plus the deferred-replay and
/// diagnostic-log state. Not `Clone` — there is exactly one dispatch loop
/// per bus, matching the single-threaded cooperative scheduling model.
///
/// Holds only a [`mpsc::WeakUnboundedSender`] internally, never a strong
/// one: a strong sender stored on `self` would never drop for as long as
/// the bus itself is alive, so `recv` could never observe "every producer
/// handle has been dropped" (§4.1) — it would simply wait forever instead
/// of returning `None`. Minting a fresh handle on demand (the Warden does
/// this once per spawned manager, well after construction) upgrades the
/// weak sender; that only succeeds while at least one strong handle — the
/// one returned by [`EventBus::new`], or a clone of it — is still alive
/// somewhere.
pub struct EventBus<M> {
    rx: mpsc::UnboundedReceiver<M>,
    weak_tx: mpsc::WeakUnboundedSender<M>,
    deferred: Deferral<M>,
    replay_queue: VecDeque<M>,
    log: VecDeque<LogRecord>,
    next_seq: u64,
}

impl<M: Send + 'static> EventBus<M> {
    /// Constructs the bus and its first strong handle together. Keep at
    /// least one clone of the returned handle alive for as long as the bus
    /// should keep running; once every clone (and every handle later minted
    /// via [`EventBus::handle`]) is dropped, `recv` returns `None`.
    pub fn new() -> (Self, EventBusHandle<M>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let weak_tx = tx.downgrade();
        let bus = Self {
            rx,
            weak_tx,
            deferred: Deferral::new(),
            replay_queue: VecDeque::new(),
            log: VecDeque::with_capacity(LOG_CAPACITY),
            next_seq: 0,
        };
        (bus, EventBusHandle { tx })
    }

    /// Mint another producer handle for this bus.
    ///
    /// Panics if every handle has already been dropped and the dispatcher's
    /// `recv` loop has therefore already exited — callers only reach this
    /// from inside a running dispatcher, where the caller's own inbound
    /// handle is necessarily still alive.
    pub fn handle(&self) -> EventBusHandle<M> {
        let tx = self
            .weak_tx
            .upgrade()
            .expect("EventBus::handle called after every producer handle was dropped");
        EventBusHandle { tx }
    }

    /// Mark the message currently being handled for replay at the next
    /// state's entry. Must be called from within the handler processing
    /// that message; the dispatcher has no way to verify this and trusts
    /// its caller, same as the spec's single-threaded handler contract.
    pub fn defer(&mut self, msg: M) {
        self.deferred.push(msg);
    }

    /// Drain the deferred queue and stage its contents for replay, in
    /// original order, ahead of anything already queued on the channel.
    ///
    /// Called by the owning dispatch loop immediately after a state's entry
    /// hook runs (`transitionTo`'s "replay deferred messages... before
    /// processing the next inbound message").
    pub fn replay_deferred(&mut self) {
        let drained = self.deferred.take_all();
        for msg in drained.into_iter().rev() {
            self.replay_queue.push_front(msg);
        }
    }

    /// Whether anything is staged for replay. Exposed so a dispatch loop can
    /// decide whether a transition actually has deferred work to redeliver.
    pub fn has_pending_replay(&self) -> bool {
        !self.replay_queue.is_empty()
    }

    /// Receive the next message: replay-staged messages first (in original
    /// order), then fresh arrivals off the channel. Returns `None` once every
    /// producer handle (including the dispatcher's own copy) has been
    /// dropped.
    pub async fn recv(&mut self) -> Option<Dispatched<M>> {
        if let Some(msg) = self.replay_queue.pop_front() {
            return Some(Dispatched::Replayed(msg));
        }
        self.rx.recv().await.map(Dispatched::Fresh)
    }

    /// Append a diagnostic ring-buffer entry, evicting the oldest record once
    /// at capacity. Elidable without observable effect (§4.1).
    pub fn record(&mut self, summary: impl Into<String>, epoch_ms: u64) {
        if self.log.len() >= LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogRecord { seq: self.next_seq, summary: summary.into(), epoch_ms });
        self.next_seq += 1;
    }

    pub fn log(&self) -> impl Iterator<Item = &LogRecord> {
        self.log.iter()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
