//! `EventScheduler` — the tick-based scheduling engine.
//!
//! # Why this shape
//!
//! Two structures, always mutated together under one lock:
//!
//! - an ordered queue `BTreeMap<QueueKey, EventId>` keyed by
//!   `(tick, priority desc, sequence)`, so the next due entry is always the
//!   first key.  `BTreeMap` gives O(log n) insert and pop-first, which is
//!   plenty for the hundreds of events a game session carries.
//! - an identity index `FxHashMap<EventId, ScheduledEvent>` for O(1)
//!   cancellation and lookup independent of queue position.
//!
//! Cancellation removes an event from the *index* only.  Its queue entry
//! stays behind as a tombstone that the next drain skips, avoiding a
//! mid-queue removal.  The invariant observable from outside: the index holds
//! exactly the `Pending` events, so `pending_count` and the query snapshots
//! never see a tombstone.
//!
//! # Drain order
//!
//! `process_events` is two-phase on purpose.  The queue key orders by
//! priority only *within* a tick; when one call drains several ticks at once,
//! a later-due high-priority event must still run before an earlier-due
//! low-priority one.  Phase one pops every due entry under the lock; phase
//! two re-sorts the due list by (priority desc, tick asc) and invokes the
//! callbacks outside the lock.  Collapsing the phases into a single composite
//! sort key would silently change that cross-tick ordering.

use std::any::Any;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use te_core::{EventId, Tick};

use crate::error::{EventError, EventResult};
use crate::event::{EventCallback, EventData, EventHandle, ScheduledEvent};

// ── Queue key ─────────────────────────────────────────────────────────────────

/// Composite ordering key: trigger tick ascending, priority descending,
/// insertion sequence ascending (deterministic FIFO among colliding pairs).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct QueueKey {
    tick: Tick,
    priority: Reverse<i32>,
    seq: u64,
}

// ── Locked state ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    /// Time-ordered queue.  May contain tombstones (entries whose id is no
    /// longer in `index`).
    queue: BTreeMap<QueueKey, EventId>,
    /// Identity index.  Holds exactly the `Pending` events.
    index: FxHashMap<EventId, ScheduledEvent>,
    /// Insertion counter backing `QueueKey::seq`.
    next_seq: u64,
}

// ── EventScheduler ────────────────────────────────────────────────────────────

/// Thread-safe tick-based event scheduler.
///
/// All operations take `&self`; the scheduler can be shared across threads
/// (e.g. in an `Arc`) without external synchronization.  The internal lock is
/// held only for structural updates — callbacks run outside it, so a slow or
/// re-entrant callback never stalls other callers.
///
/// # Example
///
/// ```rust
/// use te_core::Tick;
/// use te_events::EventScheduler;
///
/// let sched = EventScheduler::new();
/// sched.schedule(Tick(10), "lights-flicker", || println!("the lights flicker"))?;
/// assert_eq!(sched.process_events(Tick(9)), 0);
/// assert_eq!(sched.process_events(Tick(10)), 1);
/// # Ok::<(), te_events::EventError>(())
/// ```
#[derive(Default)]
pub struct EventScheduler {
    inner: Mutex<Inner>,
    /// Id allocator.  Lives outside the lock; ids are unique and ascending
    /// but may have gaps (a failed validation still consumes one).
    next_id: AtomicU64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock.  The critical sections below never panic, so a
    /// poisoned lock still guards consistent state and is safe to re-enter.
    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Schedule `callback` to fire at `trigger_tick` with default priority 0
    /// and no payload.
    ///
    /// Returns immediately with a read-only handle; never blocks on other
    /// callers and never invokes the callback inline.
    pub fn schedule<F>(&self, trigger_tick: Tick, name: &str, callback: F) -> EventResult<EventHandle>
    where
        F: FnMut() + Send + 'static,
    {
        self.schedule_with(trigger_tick, name, 0, EventData::default(), Box::new(callback))
    }

    /// Schedule with explicit priority (higher fires first) and an opaque
    /// informational payload.
    pub fn schedule_with(
        &self,
        trigger_tick: Tick,
        name: &str,
        priority: i32,
        data: EventData,
        callback: EventCallback,
    ) -> EventResult<EventHandle> {
        let id = EventId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let event = ScheduledEvent::new(id, name, trigger_tick, priority, data, callback)?;
        let handle = event.handle();

        {
            let mut inner = self.locked();
            let seq = inner.next_seq;
            inner.next_seq += 1;
            let key = QueueKey { tick: trigger_tick, priority: Reverse(priority), seq };
            inner.queue.insert(key, id);
            inner.index.insert(id, event);
        }

        tracing::debug!(
            id = %id,
            name = handle.name(),
            tick = %trigger_tick,
            priority,
            "event scheduled"
        );
        Ok(handle)
    }

    /// Schedule relative to `now`: fires at `now + delay`.
    ///
    /// Rejects `delay == 0` — an event due "now" should be scheduled with
    /// [`schedule`][Self::schedule] at an absolute tick instead.
    pub fn schedule_after<F>(
        &self,
        now: Tick,
        delay: u64,
        name: &str,
        callback: F,
    ) -> EventResult<EventHandle>
    where
        F: FnMut() + Send + 'static,
    {
        self.schedule_after_with(now, delay, name, 0, EventData::default(), Box::new(callback))
    }

    /// Relative scheduling with explicit priority and payload.
    pub fn schedule_after_with(
        &self,
        now: Tick,
        delay: u64,
        name: &str,
        priority: i32,
        data: EventData,
        callback: EventCallback,
    ) -> EventResult<EventHandle> {
        if delay == 0 {
            return Err(EventError::ZeroDelay);
        }
        self.schedule_with(now + delay, name, priority, data, callback)
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    /// Cancel a pending event by id.
    ///
    /// Returns `false` for an unknown or already-resolved id — races between
    /// "about to fire" and "about to cancel" are expected, so that is a
    /// normal outcome, not an error.  The queue entry is left behind as a
    /// tombstone; the next drain discards it.
    pub fn cancel(&self, id: EventId) -> bool {
        let name = {
            let mut inner = self.locked();
            match inner.index.remove(&id) {
                Some(event) => {
                    if let Err(e) = event.cancel() {
                        tracing::error!(id = %id, error = %e, "cancel hit a non-pending event in the index");
                    }
                    Some(event.name)
                }
                None => None,
            }
        };
        match name {
            Some(name) => {
                tracing::debug!(id = %id, name = &*name, "event cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every pending event whose name matches `name` exactly.
    ///
    /// Returns the number cancelled; zero matches is a normal outcome.
    pub fn cancel_by_name(&self, name: &str) -> usize {
        let count = {
            let mut inner = self.locked();
            let ids: Vec<EventId> = inner
                .index
                .values()
                .filter(|event| &*event.name == name)
                .map(|event| event.id)
                .collect();
            for id in &ids {
                if let Some(event) = inner.index.remove(id) {
                    if let Err(e) = event.cancel() {
                        tracing::error!(id = %id, error = %e, "cancel hit a non-pending event in the index");
                    }
                }
            }
            ids.len()
        };
        if count > 0 {
            tracing::debug!(name, count, "events cancelled by name");
        }
        count
    }

    /// Cancel everything pending and empty both structures.  Idempotent.
    pub fn clear(&self) {
        let count = {
            let mut inner = self.locked();
            let Inner { queue, index, .. } = &mut *inner;
            let count = index.len();
            for (id, event) in index.drain() {
                if let Err(e) = event.cancel() {
                    tracing::error!(id = %id, error = %e, "clear hit a non-pending event in the index");
                }
            }
            queue.clear();
            count
        };
        tracing::info!(cancelled = count, "scheduler cleared");
    }

    // ── Processing ────────────────────────────────────────────────────────

    /// Run every event due at or before `now`; returns how many callbacks
    /// were invoked.
    ///
    /// Execution order across the whole due set: priority descending, then
    /// trigger tick ascending, then creation order.  A panicking callback is
    /// logged and counted as processed; the drain continues uninterrupted.
    /// Callbacks run outside the lock and may call back into the scheduler.
    pub fn process_events(&self, now: Tick) -> usize {
        // Phase 1: drain due entries from queue and index under the lock.
        let mut due: Vec<ScheduledEvent> = {
            let mut guard = self.locked();
            // Split-borrow through the guard so queue and index can be
            // touched in the same iteration.
            let inner = &mut *guard;
            let mut due = Vec::new();
            loop {
                let Some(entry) = inner.queue.first_entry() else { break };
                if entry.key().tick > now {
                    break;
                }
                let id = entry.remove();
                // Ids missing from the index are tombstones.
                if let Some(event) = inner.index.remove(&id) {
                    due.push(event);
                }
            }
            due
        };

        // Phase 2: final execution order spans every newly-due tick.
        due.sort_by_key(|event| (Reverse(event.priority), event.trigger_tick, event.id));

        let mut processed = 0;
        for mut event in due {
            if let Err(e) = event.mark_executed() {
                // Only this drain removes pending events from the index, so
                // a failed transition means the invariant is already broken.
                tracing::error!(id = %event.id, error = %e, "single-transition invariant violated");
                debug_assert!(false, "event {} left pending state twice", event.id);
                continue;
            }

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (event.callback)()));
            match outcome {
                Ok(()) => {
                    tracing::debug!(
                        id = %event.id,
                        name = &*event.name,
                        tick = %event.trigger_tick,
                        "event processed"
                    );
                }
                Err(payload) => {
                    // The obligation to fire was honored; the fault stays
                    // contained and the remaining due events still run.
                    tracing::warn!(
                        id = %event.id,
                        name = &*event.name,
                        fault = panic_message(payload.as_ref()),
                        "event callback panicked"
                    );
                }
            }
            processed += 1;
        }
        processed
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Snapshot of all pending events, ordered by trigger tick ascending
    /// then priority descending.
    ///
    /// The lock is held only for the copy; sorting happens outside it.
    pub fn pending_events(&self) -> Vec<EventHandle> {
        let mut handles: Vec<EventHandle> = {
            let inner = self.locked();
            inner.index.values().map(ScheduledEvent::handle).collect()
        };
        handles.sort_by_key(|h| (h.trigger_tick(), Reverse(h.priority()), h.id()));
        handles
    }

    /// Pending events due at exactly `tick`, ordered by priority descending.
    pub fn events_at_tick(&self, tick: Tick) -> Vec<EventHandle> {
        let mut handles: Vec<EventHandle> = {
            let inner = self.locked();
            inner
                .index
                .values()
                .filter(|event| event.trigger_tick == tick)
                .map(ScheduledEvent::handle)
                .collect()
        };
        handles.sort_by_key(|h| (Reverse(h.priority()), h.id()));
        handles
    }

    /// Number of events currently pending.  Tombstones are already absent
    /// from the index, so a cancelled-but-undrained event never counts.
    pub fn pending_count(&self) -> usize {
        self.locked().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_count() == 0
    }
}

// ── Panic payload formatting ──────────────────────────────────────────────────

/// Best-effort extraction of a human-readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
