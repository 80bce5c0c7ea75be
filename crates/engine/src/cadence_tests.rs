use super::*;

#[test]
fn zero_roll_returns_base_duration() {
    assert_eq!(jitter(Duration::from_millis(1000), JITTER_FRACTION, 0.0), Duration::from_millis(1000));
}

#[test]
fn positive_roll_increases_duration_by_at_most_the_fraction() {
    let jittered = jitter(Duration::from_millis(1000), JITTER_FRACTION, 1.0);
    assert_eq!(jittered, Duration::from_millis(1100));
}

#[test]
fn negative_roll_decreases_duration_by_at_most_the_fraction() {
    let jittered = jitter(Duration::from_millis(1000), JITTER_FRACTION, -1.0);
    assert_eq!(jittered, Duration::from_millis(900));
}

#[test]
fn roll_is_clamped_to_unit_range() {
    let over = jitter(Duration::from_millis(1000), JITTER_FRACTION, 5.0);
    let at_one = jitter(Duration::from_millis(1000), JITTER_FRACTION, 1.0);
    assert_eq!(over, at_one);
}

#[test]
fn viewers_present_uses_fast_interval() {
    let config = CadenceConfig { fast_ms: 1000, slow_ms: 10_000 };
    assert_eq!(next_interval(true, &config, 0.0), Duration::from_millis(1000));
    assert_eq!(next_interval(false, &config, 0.0), Duration::from_millis(10_000));
}
