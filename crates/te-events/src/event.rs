//! Event entity types: `EventStatus`, `ScheduledEvent`, and `EventHandle`.
//!
//! # Lifecycle
//!
//! Every event is created `Pending` and transitions exactly once, to either
//! `Executed` (the engine invoked its callback) or `Cancelled` (a caller
//! withdrew it first).  Both are terminal.  The transition guard is a
//! compare-exchange on an atomic status cell shared between the engine-owned
//! record and any outstanding [`EventHandle`]s, so a handle still observes
//! the terminal status after the engine has dropped the record.
//!
//! # Ownership
//!
//! The engine owns each [`ScheduledEvent`] (and its callback) exclusively
//! from creation until the terminal transition.  Callers only ever hold
//! [`EventHandle`]s: cheap, cloneable, read-only views that can inspect
//! status and identify the event for cancellation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use rustc_hash::FxHashMap;
use te_core::{EventId, Tick};

use crate::error::{EventError, EventResult};

// ── EventStatus ───────────────────────────────────────────────────────────────

/// Lifecycle status of a scheduled event.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EventStatus {
    /// Queued and eligible to fire or be cancelled.
    Pending = 0,
    /// The engine invoked the callback.  Terminal.
    Executed = 1,
    /// A caller withdrew the event before it fired.  Terminal.
    Cancelled = 2,
}

impl EventStatus {
    fn from_u8(raw: u8) -> EventStatus {
        match raw {
            0 => EventStatus::Pending,
            1 => EventStatus::Executed,
            _ => EventStatus::Cancelled,
        }
    }

    /// `true` for `Executed` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        self != EventStatus::Pending
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventStatus::Pending => "pending",
            EventStatus::Executed => "executed",
            EventStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// ── StatusCell ────────────────────────────────────────────────────────────────

/// Shared, atomically guarded status slot.
///
/// The single-transition invariant lives here: `transition` succeeds only
/// from `Pending`, via compare-exchange, regardless of how many handles
/// observe the cell concurrently.
#[derive(Debug)]
pub(crate) struct StatusCell(AtomicU8);

impl StatusCell {
    fn new() -> Self {
        Self(AtomicU8::new(EventStatus::Pending as u8))
    }

    pub(crate) fn load(&self) -> EventStatus {
        EventStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    fn transition(&self, id: EventId, to: EventStatus) -> EventResult<()> {
        self.0
            .compare_exchange(
                EventStatus::Pending as u8,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|actual| EventError::InvalidTransition {
                id,
                from: EventStatus::from_u8(actual),
            })
    }
}

// ── Callback and payload ──────────────────────────────────────────────────────

/// The scheduled operation: zero arguments, side effects only.
///
/// The engine never inspects what a callback does; it only guarantees that a
/// panicking callback is contained and does not abort the drain.
pub type EventCallback = Box<dyn FnMut() + Send + 'static>;

/// Opaque informational payload attached at scheduling time.
///
/// Never interpreted by the engine; carried through to query snapshots for
/// external inspection tooling.
pub type EventData = FxHashMap<String, String>;

// ── ScheduledEvent ────────────────────────────────────────────────────────────

/// Engine-owned record of one scheduled callback.
pub(crate) struct ScheduledEvent {
    pub(crate) id: EventId,
    pub(crate) name: Arc<str>,
    pub(crate) trigger_tick: Tick,
    pub(crate) priority: i32,
    pub(crate) data: Arc<EventData>,
    pub(crate) status: Arc<StatusCell>,
    pub(crate) callback: EventCallback,
}

impl ScheduledEvent {
    /// Validate and construct a `Pending` event.
    ///
    /// Rejects names that are empty or whitespace-only with
    /// [`EventError::EmptyName`].  Trigger tick and callback need no runtime
    /// checks: `Tick` is unsigned and the callback parameter is mandatory.
    pub(crate) fn new(
        id: EventId,
        name: &str,
        trigger_tick: Tick,
        priority: i32,
        data: EventData,
        callback: EventCallback,
    ) -> EventResult<Self> {
        if name.trim().is_empty() {
            return Err(EventError::EmptyName);
        }
        Ok(Self {
            id,
            name: Arc::from(name),
            trigger_tick,
            priority,
            data: Arc::new(data),
            status: Arc::new(StatusCell::new()),
            callback,
        })
    }

    /// `Pending → Executed`.  The engine calls this immediately before
    /// invoking the callback.
    pub(crate) fn mark_executed(&self) -> EventResult<()> {
        self.status.transition(self.id, EventStatus::Executed)
    }

    /// `Pending → Cancelled`.
    pub(crate) fn cancel(&self) -> EventResult<()> {
        self.status.transition(self.id, EventStatus::Cancelled)
    }

    /// Build a read-only caller view sharing this event's status cell.
    pub(crate) fn handle(&self) -> EventHandle {
        EventHandle {
            id: self.id,
            name: Arc::clone(&self.name),
            trigger_tick: self.trigger_tick,
            priority: self.priority,
            data: Arc::clone(&self.data),
            status: Arc::clone(&self.status),
        }
    }
}

// ── EventHandle ───────────────────────────────────────────────────────────────

/// Read-only view of a scheduled event.
///
/// Cloning is cheap (three `Arc` bumps).  The `status` accessor is live — it
/// reflects execution or cancellation as soon as the engine performs it —
/// while the remaining fields are immutable for the event's whole life.
#[derive(Clone, Debug)]
pub struct EventHandle {
    id: EventId,
    name: Arc<str>,
    trigger_tick: Tick,
    priority: i32,
    data: Arc<EventData>,
    status: Arc<StatusCell>,
}

impl EventHandle {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger_tick(&self) -> Tick {
        self.trigger_tick
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Current lifecycle status.
    pub fn status(&self) -> EventStatus {
        self.status.load()
    }

    pub fn is_pending(&self) -> bool {
        self.status() == EventStatus::Pending
    }
}

impl fmt::Display for EventHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" @ {} (priority {}, {})",
            self.id,
            self.name,
            self.trigger_tick,
            self.priority,
            self.status()
        )
    }
}
