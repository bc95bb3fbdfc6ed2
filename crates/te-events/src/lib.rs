//! `te-events` — tick-based event scheduling engine for the `rust_te`
//! framework.
//!
//! Callers register zero-argument callbacks to fire at a future logical
//! tick, then repeatedly call
//! [`EventScheduler::process_events`] as their clock advances.  The engine
//! orders due callbacks deterministically (priority descending, trigger tick
//! ascending, creation order), contains per-callback faults so one panic
//! never blocks the rest of the drain, and supports cancellation by id or by
//! name.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`event`]     | `EventStatus`, `EventHandle`, callback/payload types  |
//! | [`scheduler`] | `EventScheduler`                                      |
//! | [`error`]     | `EventError`, `EventResult<T>`                        |
//!
//! # Quick-start
//!
//! ```rust
//! use te_core::Tick;
//! use te_events::EventScheduler;
//!
//! let sched = EventScheduler::new();
//! sched.schedule(Tick(100), "storm-breaks", || println!("thunder rolls"))?;
//! let cursed = sched.schedule_after(Tick(0), 50, "candle-gutters", || {})?;
//!
//! sched.cancel(cursed.id());
//! assert_eq!(sched.process_events(Tick(100)), 1);
//! # Ok::<(), te_events::EventError>(())
//! ```
//!
//! # Observability
//!
//! Every schedule, cancel, process, and fault emits a structured `tracing`
//! record.  These are advisory: install a subscriber to collect them, or
//! don't — correctness never depends on them.

pub mod error;
pub mod event;
pub mod scheduler;


pub use error::{EventError, EventResult};
pub use event::{EventCallback, EventData, EventHandle, EventStatus};
pub use scheduler::EventScheduler;
