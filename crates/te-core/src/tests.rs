//! Unit tests for te-core primitives.

#[cfg(test)]
mod ids {
    use crate::EventId;

    #[test]
    fn ordering_follows_creation_order() {
        assert!(EventId(0) < EventId(1));
        assert!(EventId(100) > EventId(99));
    }

    #[test]
    fn display() {
        assert_eq!(EventId(7).to_string(), "E7");
    }
}

#[cfg(test)]
mod time {
    use crate::{GameClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn tick_display() {
        assert_eq!(Tick(42).to_string(), "T42");
    }

    #[test]
    fn clock_elapsed_minutes() {
        let mut clock = GameClock::new(1);
        assert_eq!(clock.elapsed_minutes(), 0);
        clock.advance();
        assert_eq!(clock.elapsed_minutes(), 1);
        clock.advance_by(59);
        assert_eq!(clock.elapsed_minutes(), 60);
    }

    #[test]
    fn clock_dhm_breakdown() {
        let mut clock = GameClock::new(1);
        // day 1, 01:05 → 1440 + 65 minutes
        clock.advance_by(1_440 + 65);
        assert_eq!(clock.elapsed_dhm(), (1, 1, 5));
    }

    #[test]
    fn clock_coarse_resolution() {
        let mut clock = GameClock::new(15); // 1 tick = 15 minutes
        clock.advance_by(4);
        assert_eq!(clock.elapsed_minutes(), 60);
        assert_eq!(clock.elapsed_dhm(), (0, 1, 0));
    }

    #[test]
    fn ticks_for_minutes_rounds_up() {
        let clock = GameClock::new(15);
        assert_eq!(clock.ticks_for_minutes(60), 4);
        assert_eq!(clock.ticks_for_minutes(61), 5);
        assert_eq!(clock.ticks_for_hours(2), 8);
    }

    #[test]
    fn clock_display() {
        let mut clock = GameClock::new(1);
        clock.advance_by(65);
        assert_eq!(clock.to_string(), "T65 (day 0 01:05)");
    }
}
