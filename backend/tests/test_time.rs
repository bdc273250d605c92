//! Tests for SimClock

use triage_simulator_core_rs::SimClock;

#[test]
fn test_clock_new() {
    let clock = SimClock::new(600, 60, 1440);
    assert_eq!(clock.ticks_elapsed(), 0);
    assert_eq!(clock.now(), 600);
    assert_eq!(clock.ticks_remaining(), 1440);
    assert!(!clock.is_day_complete());
}

#[test]
fn test_advance_tick_returns_started_index() {
    let mut clock = SimClock::new(0, 60, 1440);

    assert_eq!(clock.advance_tick(), 0);
    assert_eq!(clock.now(), 60);
    assert_eq!(clock.ticks_elapsed(), 1);

    assert_eq!(clock.advance_tick(), 1);
    assert_eq!(clock.now(), 120);
}

#[test]
fn test_full_day() {
    let mut clock = SimClock::new(0, 60, 1440);

    for _ in 0..1439 {
        clock.advance_tick();
    }
    assert!(!clock.is_day_complete());
    assert_eq!(clock.ticks_remaining(), 1);

    let last = clock.advance_tick();
    assert_eq!(last, 1439);
    assert!(clock.is_day_complete());
    assert_eq!(clock.now(), 1440 * 60);
}

#[test]
fn test_custom_units_per_tick() {
    let mut clock = SimClock::new(100, 5, 10);
    clock.advance_tick();
    clock.advance_tick();
    assert_eq!(clock.now(), 110);
    assert_eq!(clock.units_per_tick(), 5);
    assert_eq!(clock.ticks_per_day(), 10);
}
