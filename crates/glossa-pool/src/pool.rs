//! The pool manager: slot selection, admission and release.
//!
//! All shared state (slots, ticket counters, the pending count) sits behind
//! one [`parking_lot::Mutex`]. Callers draw a ticket on entry and only the
//! caller whose ticket is being served may take a slot, so waiters are
//! admitted in arrival order. Every release wakes all waiters; the head of
//! the queue takes the freed slot and the rest go back to sleep.

use parking_lot::{Condvar, Mutex};
use serde::Serialize;

use glossa_types::Fingerprint;

use crate::slot::{SlotStats, WorkerSlot};

/// How a slot was chosen for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The slot already holds the requested configuration.
    Warm,
    /// Any idle slot; the worker must be reconfigured.
    Cold,
}

struct PoolState<B> {
    slots: Vec<WorkerSlot<B>>,
    next_ticket: u64,
    now_serving: u64,
    pending: usize,
}

impl<B> PoolState<B> {
    /// Two-phase choice: an idle slot holding `fingerprint`, else any idle
    /// slot. Among cold candidates an unconfigured slot goes first so that
    /// warm workers keep their configuration.
    fn select(&self, fingerprint: &Fingerprint) -> Option<(usize, Selection)> {
        if let Some(i) = self
            .slots
            .iter()
            .position(|s| s.is_idle() && s.holds(fingerprint))
        {
            return Some((i, Selection::Warm));
        }
        self.slots
            .iter()
            .position(|s| s.is_idle() && s.configuration().is_none())
            .or_else(|| self.slots.iter().position(WorkerSlot::is_idle))
            .map(|i| (i, Selection::Cold))
    }
}

/// A fixed-size set of worker slots with FIFO admission.
pub struct WorkerPool<B> {
    state: Mutex<PoolState<B>>,
    released: Condvar,
    size: usize,
}

impl<B> WorkerPool<B> {
    /// Build a pool from `(worker, initial configuration)` pairs.
    ///
    /// The pool size is fixed to the number of workers given.
    pub fn new(workers: impl IntoIterator<Item = (B, Option<Fingerprint>)>) -> Self {
        let slots: Vec<WorkerSlot<B>> = workers
            .into_iter()
            .map(|(worker, configuration)| WorkerSlot::new(worker, configuration))
            .collect();
        let size = slots.len();
        Self {
            state: Mutex::new(PoolState {
                slots,
                next_ticket: 0,
                now_serving: 0,
                pending: 0,
            }),
            released: Condvar::new(),
            size,
        }
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Block until a slot is available to this caller and take it.
    ///
    /// Prefers a slot already holding `fingerprint`. Never times out; an
    /// empty pool blocks forever, which is why pool construction elsewhere
    /// rejects zero workers.
    pub fn acquire(&self, fingerprint: &Fingerprint) -> Lease<'_, B> {
        let mut state = self.state.lock();
        state.pending += 1;
        let ticket = state.next_ticket;
        state.next_ticket += 1;

        loop {
            if state.now_serving == ticket
                && let Some((index, selection)) = state.select(fingerprint)
            {
                let slot = &mut state.slots[index];
                let configuration = slot.configuration();
                let Some(worker) = slot.take() else {
                    unreachable!("selected slot {index} is not idle");
                };
                state.now_serving += 1;
                let pending = state.pending;
                drop(state);
                // The next ticket may be able to take another idle slot.
                self.released.notify_all();

                tracing::debug!(
                    slot = index,
                    ticket,
                    ?selection,
                    pending,
                    fingerprint = %fingerprint.short(),
                    "slot acquired"
                );
                return Lease {
                    pool: self,
                    index,
                    selection,
                    worker: Some(worker),
                    configuration,
                };
            }
            self.released.wait(&mut state);
        }
    }

    fn release(&self, index: usize, worker: B, configuration: Option<Fingerprint>) {
        let mut state = self.state.lock();
        state.slots[index].restore(worker, configuration);
        debug_assert!(state.pending > 0, "pending caller count underflow");
        state.pending = state.pending.saturating_sub(1);
        drop(state);
        self.released.notify_all();
        tracing::trace!(slot = index, "slot released");
    }

    /// Snapshot of the pool for diagnostics.
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock();
        let slots: Vec<SlotStats> = state.slots.iter().map(WorkerSlot::snapshot).collect();
        PoolStats {
            size: self.size,
            busy: slots.iter().filter(|s| s.busy).count(),
            pending: state.pending,
            slots,
        }
    }
}

impl<B> std::fmt::Debug for WorkerPool<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Exclusive hold on one slot's worker. Dropping it releases the slot.
pub struct Lease<'a, B> {
    pool: &'a WorkerPool<B>,
    index: usize,
    selection: Selection,
    worker: Option<B>,
    configuration: Option<Fingerprint>,
}

impl<B> Lease<'_, B> {
    /// Index of the held slot.
    pub fn slot(&self) -> usize {
        self.index
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Configuration the held worker currently has.
    pub fn configuration(&self) -> Option<Fingerprint> {
        self.configuration
    }

    /// Record the configuration the worker holds once released.
    pub fn set_configuration(&mut self, configuration: Option<Fingerprint>) {
        self.configuration = configuration;
    }

    pub fn worker_mut(&mut self) -> &mut B {
        match self.worker.as_mut() {
            Some(worker) => worker,
            None => unreachable!("lease worker taken before drop"),
        }
    }
}

impl<B> Drop for Lease<'_, B> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.pool.release(self.index, worker, self.configuration);
        }
    }
}

/// Point-in-time view of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub size: usize,
    /// Slots currently executing.
    pub busy: usize,
    /// Callers inside `acquire` or holding a lease.
    pub pending: usize,
    pub slots: Vec<SlotStats>,
}
