use chrono::NaiveDate;
use sprint_planner::calendar::WorkCalendar;
use sprint_planner::capacity::CapacityTracker;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn committed_points_default_to_zero() {
    let tracker = CapacityTracker::new();
    assert_eq!(tracker.committed_points(0, d(2024, 1, 1)), 0);
}

#[test]
fn commit_accumulates_per_slot() {
    let mut tracker = CapacityTracker::new();
    let sprint = d(2024, 1, 1);
    tracker.commit(0, sprint, 3, (d(2024, 1, 1), d(2024, 1, 3)));
    tracker.commit(0, sprint, 5, (d(2024, 1, 4), d(2024, 1, 10)));
    assert_eq!(tracker.committed_points(0, sprint), 8);

    // Other developers and other sprints are independent buckets
    assert_eq!(tracker.committed_points(1, sprint), 0);
    assert_eq!(tracker.committed_points(0, d(2024, 1, 16)), 0);
}

#[test]
fn next_free_start_is_earliest_when_slot_is_empty() {
    let tracker = CapacityTracker::new();
    let cal = WorkCalendar::default();
    assert_eq!(
        tracker.next_free_start(0, d(2024, 1, 1), d(2024, 1, 3), &cal),
        d(2024, 1, 3)
    );
}

#[test]
fn next_free_start_follows_latest_booked_interval() {
    let mut tracker = CapacityTracker::new();
    let cal = WorkCalendar::default();
    let sprint = d(2024, 1, 1);
    tracker.commit(0, sprint, 3, (d(2024, 1, 1), d(2024, 1, 3)));
    // Earliest possible is Monday but the developer is busy until Wednesday
    assert_eq!(
        tracker.next_free_start(0, sprint, d(2024, 1, 1), &cal),
        d(2024, 1, 4)
    );
}

#[test]
fn next_free_start_never_precedes_earliest() {
    let mut tracker = CapacityTracker::new();
    let cal = WorkCalendar::default();
    let sprint = d(2024, 1, 1);
    tracker.commit(0, sprint, 1, (d(2024, 1, 1), d(2024, 1, 1)));
    // The slot frees up Tuesday, but the dependency gate is Friday
    assert_eq!(
        tracker.next_free_start(0, sprint, d(2024, 1, 5), &cal),
        d(2024, 1, 5)
    );
}

#[test]
fn next_free_start_skips_weekend_after_friday_end() {
    let mut tracker = CapacityTracker::new();
    let cal = WorkCalendar::default();
    let sprint = d(2024, 1, 1);
    tracker.commit(0, sprint, 5, (d(2024, 1, 1), d(2024, 1, 5)));
    assert_eq!(
        tracker.next_free_start(0, sprint, d(2024, 1, 1), &cal),
        d(2024, 1, 8)
    );
}
