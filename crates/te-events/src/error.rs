use te_core::EventId;
use thiserror::Error;

use crate::event::EventStatus;

/// Faults raised by the event engine.
///
/// `EmptyName` and `ZeroDelay` are fail-fast precondition violations: the
/// rejecting call leaves no partial state behind.  `InvalidTransition` means
/// an event reached a terminal state through a second code path — a
/// scheduler-internal bug, not caller misuse.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event name must not be empty")]
    EmptyName,

    #[error("delay must be at least one tick")]
    ZeroDelay,

    #[error("event {id} cannot leave terminal status {from}")]
    InvalidTransition { id: EventId, from: EventStatus },
}

pub type EventResult<T> = Result<T, EventError>;
