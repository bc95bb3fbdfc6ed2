//! manor — smallest example for the rust_te event engine.
//!
//! Drives one evening in a haunted manor: atmospheric events fire on a
//! 1-tick = 1-minute clock, a patrolling butler reschedules himself from his
//! own callback, and the séance is cancelled by name before it can begin.
//! Run with `RUST_LOG=debug` (or any `tracing` filter) to see the engine's
//! structured records alongside the narration.

use std::sync::Arc;

use anyhow::Result;

use te_core::{GameClock, Tick};
use te_events::{EventData, EventScheduler};

// ── Constants ─────────────────────────────────────────────────────────────────

const MINUTES_PER_TICK: u32 = 1;
const SESSION_TICKS:    u64 = 120; // two in-game hours
const PATROL_INTERVAL:  u64 = 30;

// ── Narrative events ──────────────────────────────────────────────────────────

fn narrate(line: &'static str) -> impl FnMut() + Send + 'static {
    move || println!("  {line}")
}

/// Butler patrol: each pass schedules the next one from inside the callback.
fn schedule_patrol(sched: &Arc<EventScheduler>, at: Tick) {
    let reentrant = Arc::clone(sched);
    let result = sched.schedule(at, "butler-patrol", move || {
        println!("  The butler's footsteps echo down the corridor.");
        schedule_patrol(&reentrant, at + PATROL_INTERVAL);
    });
    if let Err(e) = result {
        eprintln!("failed to schedule patrol: {e}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== manor — rust_te tick-event engine ===");
    println!("Session: {SESSION_TICKS} ticks  |  1 tick = {MINUTES_PER_TICK} in-game minute");
    println!();

    let mut clock = GameClock::new(MINUTES_PER_TICK);
    let sched = Arc::new(EventScheduler::new());

    // 1. Fixed atmosphere, with priorities deciding who speaks first when
    //    several events share a tick.
    sched.schedule(Tick(10), "lights-flicker", narrate("The gas lamps flicker and dim."))?;
    let mut data = EventData::default();
    data.insert("room".into(), "conservatory".into());
    sched.schedule_with(
        Tick(45),
        "window-shatters",
        5,
        data,
        Box::new(narrate("A window shatters in the conservatory!")),
    )?;
    sched.schedule_with(
        Tick(45),
        "cold-draft",
        -1,
        EventData::default(),
        Box::new(narrate("A cold draft follows, guttering every candle.")),
    )?;

    // 2. The séance is planned 90 minutes in...
    sched.schedule_after(clock.current_tick, 90, "seance", narrate("The séance begins."))?;
    sched.schedule_after(clock.current_tick, 90, "seance", narrate("The planchette starts to move."))?;

    // 3. ...and the butler patrols on a loop.
    schedule_patrol(&sched, Tick(PATROL_INTERVAL));

    println!("Scheduled {} events. Upcoming:", sched.pending_count());
    for handle in sched.pending_events() {
        println!("  {handle}");
    }
    println!();

    // 4. Run the evening, one tick at a time.
    let mut total_fired = 0;
    for _ in 0..SESSION_TICKS {
        clock.advance();
        let now = clock.current_tick;

        // At half past, the host loses their nerve and calls the séance off.
        if now == Tick(30) {
            let cancelled = sched.cancel_by_name("seance");
            println!("[{clock}] The host cancels the séance ({cancelled} events withdrawn).");
        }

        let fired = sched.process_events(now);
        if fired > 0 {
            println!("[{clock}] {fired} event(s) fired");
        }
        total_fired += fired;
    }

    // 5. Summary.
    println!();
    println!("Session over at {clock}.");
    println!("  events fired   : {total_fired}");
    println!("  still pending  : {}", sched.pending_count());
    sched.clear();
    println!("  after clear    : {}", sched.pending_count());

    Ok(())
}
