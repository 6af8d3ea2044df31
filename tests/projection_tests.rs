//! Integration tests for the progress projection

use smart_knob::{RING_UNITS, SettingBounds, SettingLimits, UnitClass, project};

#[test]
fn sixty_minutes_of_study() {
    let projection = project::<RING_UNITS>(60, &SettingBounds::new(25, 120, 5));

    assert_eq!(projection.active_count(), 12);
    for index in 0..=4 {
        assert_eq!(projection.class(index), Some(UnitClass::Baseline));
    }
    for index in 5..=11 {
        assert_eq!(projection.class(index), Some(UnitClass::Extra));
    }
}

#[test]
fn projection_is_idempotent() {
    let bounds = SettingBounds::new(10, 120, 5);
    let first = project::<RING_UNITS>(85, &bounds);
    let second = project::<RING_UNITS>(85, &bounds);
    assert_eq!(first, second);
}

#[test]
fn minimum_value_is_all_baseline() {
    let limits = SettingLimits::default();
    for bounds in [limits.study, limits.brk, limits.cycles, limits.timer] {
        let projection = project::<RING_UNITS>(bounds.min, &bounds);
        assert!(projection.active_count() > 0);
        assert!(
            projection
                .classes()
                .iter()
                .all(|&class| class == UnitClass::Baseline)
        );
    }
}

#[test]
fn remaining_below_one_step_is_dark() {
    let projection = project::<RING_UNITS>(4, &SettingBounds::new(25, 120, 5));
    assert_eq!(projection.active_count(), 0);
}

#[test]
fn full_break_range_fits_the_ring() {
    let bounds = SettingLimits::default().brk;
    let projection = project::<RING_UNITS>(bounds.max, &bounds);
    assert_eq!(projection.active_count(), 15);
    assert_eq!(projection.class(4), Some(UnitClass::Baseline));
    assert_eq!(projection.class(5), Some(UnitClass::Extra));
}
