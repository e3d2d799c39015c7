// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use chrono::TimeZone;

#[test]
fn test_system_clock() {
    let now = SystemClock.now_millis();
    // After 2023
    assert!(now > 1_700_000_000_000);
}

#[test]
fn test_fake_clock_sleep_advances_without_blocking() {
    let clock = FakeClock::new(1000);
    clock.sleep(Duration::from_secs(1));
    clock.sleep(Duration::from_secs(1));
    assert_eq!(clock.now_millis(), 3000);
    assert_eq!(clock.sleep_count(), 2);
}

#[test]
fn test_fake_clock_shared_state() {
    let clock1 = FakeClock::new(1000);
    let clock2 = clock1.clone();

    clock1.advance(Duration::from_millis(500));
    clock1.sleep(Duration::ZERO);
    assert_eq!(clock2.now_millis(), 1500);
    assert_eq!(clock2.sleep_count(), 1);
}

#[test]
fn test_fake_clock_set() {
    let clock = FakeClock::new(1000);
    clock.set(5000);
    assert_eq!(clock.now_millis(), 5000);
}

#[test]
fn test_fake_clock_at_calendar_time() {
    let time = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    let clock = FakeClock::at(time);
    assert_eq!(clock.now_utc(), time);
}

#[test]
fn test_clock_handle_fake() {
    let handle = ClockHandle::fake_at(1000);
    handle.sleep(Duration::from_millis(100));
    assert_eq!(handle.now_millis(), 1100);
    assert_eq!(handle.as_fake().unwrap().sleep_count(), 1);
}

#[test]
fn test_clock_handle_default_is_system() {
    assert!(ClockHandle::default().as_fake().is_none());
    assert!(ClockHandle::fake_at_epoch().as_fake().is_some());
}
