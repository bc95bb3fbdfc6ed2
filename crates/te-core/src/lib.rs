//! `te-core` — foundational types for the `rust_te` tick-event engine.
//!
//! This crate is a dependency of every other `te-*` crate.  It intentionally
//! has no `te-*` dependencies and no mandatory external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                |
//! |----------|-----------------------------------------|
//! | [`ids`]  | `EventId`                               |
//! | [`time`] | `Tick`, `GameClock`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::EventId;
pub use time::{GameClock, Tick};
