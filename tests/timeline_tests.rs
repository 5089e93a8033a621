use chrono::NaiveDate;
use sprint_planner::calendar::WorkCalendar;
use sprint_planner::{
    compute_project_end_date, compute_timeline, plan_timeline, EstimationMode, UnresolvedReason,
    UserStory,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn story(id: &str, min: u32, max: u32, deps: &[&str]) -> UserStory {
    UserStory::new(id, format!("Story {id}"), "Epic", min, max)
        .with_dependencies(deps.iter().map(|s| s.to_string()).collect())
}

// 2024-01-01 is a Monday.
const START: (i32, u32, u32) = (2024, 1, 1);

fn start() -> NaiveDate {
    d(START.0, START.1, START.2)
}

#[test]
fn single_one_point_story_starts_and_ends_on_start_date() {
    let stories = vec![story("a", 1, 1, &[])];
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 1);

    assert_eq!(timeline.len(), 1);
    let a = &timeline[0];
    assert_eq!(a.start_date, d(2024, 1, 1));
    assert_eq!(a.end_date, d(2024, 1, 1));
    assert_eq!(a.duration_days, 1);
    assert_eq!(a.story_points, 1);
    assert_eq!(a.developer, 1);
    assert_eq!(a.sprint_start, d(2024, 1, 1));
}

#[test]
fn empty_backlog_yields_empty_timeline_and_start_as_end_date() {
    let timeline = compute_timeline(&[], start(), EstimationMode::Optimistic, 3);
    assert!(timeline.is_empty());
    assert_eq!(
        compute_project_end_date(&[], start(), EstimationMode::Optimistic, 3),
        start()
    );
}

#[test]
fn pessimistic_mode_books_max_points() {
    let stories = vec![story("a", 3, 8, &[])];
    let timeline = compute_timeline(&stories, start(), EstimationMode::Pessimistic, 1);
    assert_eq!(timeline[0].story_points, 8);
    // 8 points quantize to 10 working days: Jan 1 .. Jan 12
    assert_eq!(timeline[0].duration_days, 10);
    assert_eq!(timeline[0].end_date, d(2024, 1, 12));
}

#[test]
fn dependent_story_starts_next_working_day_in_next_sprint() {
    // a fills the first sprint's capacity (8 of 8) and calendar; b follows
    let stories = vec![story("a", 8, 8, &[]), story("b", 1, 1, &["a"])];
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 1);

    assert_eq!(timeline.len(), 2);
    let (a, b) = (&timeline[0], &timeline[1]);
    assert_eq!(a.end_date, d(2024, 1, 12));
    assert_eq!(a.sprint_start, d(2024, 1, 1));
    assert_eq!(b.start_date, d(2024, 1, 15));
    assert_ne!(b.sprint_start, a.sprint_start);
}

#[test]
fn capacity_pushes_second_root_story_to_next_sprint() {
    // Two independent 5-point stories, one developer: 10 points do not fit
    // into an 8-point sprint even though calendar days remain.
    let stories = vec![story("a", 5, 5, &[]), story("b", 5, 5, &[])];
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 1);

    let (a, b) = (&timeline[0], &timeline[1]);
    assert_eq!(a.start_date, d(2024, 1, 1));
    assert_eq!(a.end_date, d(2024, 1, 5));
    assert_eq!(a.sprint_start, d(2024, 1, 1));
    assert_eq!(b.sprint_start, d(2024, 1, 16));
    assert_eq!(b.start_date, d(2024, 1, 16));
}

#[test]
fn second_developer_absorbs_parallel_load() {
    let stories = vec![story("a", 5, 5, &[]), story("b", 5, 5, &[])];
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 2);

    let (a, b) = (&timeline[0], &timeline[1]);
    assert_eq!(a.developer, 1);
    assert_eq!(b.developer, 2);
    assert_eq!(b.start_date, d(2024, 1, 1));
    assert_eq!(b.sprint_start, d(2024, 1, 1));
}

fn multi_story_fixture() -> Vec<UserStory> {
    vec![
        story("ui", 3, 5, &[]),
        story("api", 5, 8, &["ui"]),
        story("db", 5, 5, &[]),
        story("int", 1, 1, &["api", "db"]),
    ]
}

#[test]
fn fixture_schedules_in_dependency_order() {
    let stories = multi_story_fixture();
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 2);
    let order: Vec<&str> = timeline.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["ui", "api", "db", "int"]);

    let api = &timeline[1];
    assert_eq!(api.start_date, d(2024, 1, 4));
    assert_eq!(api.end_date, d(2024, 1, 10));
    assert_eq!(api.developer, 1);

    let int = &timeline[3];
    assert_eq!(int.start_date, d(2024, 1, 11));
    assert_eq!(int.sprint_start, d(2024, 1, 8));
}

#[test]
fn scheduled_dates_are_always_working_days() {
    let cal = WorkCalendar::default();
    let timeline =
        compute_timeline(&multi_story_fixture(), start(), EstimationMode::Pessimistic, 2);
    for story in &timeline {
        assert!(cal.is_available(story.start_date), "{} starts on a weekend", story.id);
        assert!(cal.is_available(story.end_date), "{} ends on a weekend", story.id);
    }
}

#[test]
fn stories_start_after_their_dependencies_end() {
    let cal = WorkCalendar::default();
    let stories = multi_story_fixture();
    let timeline = compute_timeline(&stories, start(), EstimationMode::Pessimistic, 3);
    for s in &timeline {
        for dep in &s.dependencies {
            let dep_end = timeline
                .iter()
                .find(|t| &t.id == dep)
                .map(|t| t.end_date)
                .expect("dependency must be scheduled");
            assert!(
                s.start_date >= cal.next_available(dep_end),
                "{} starts before its dependency {} ends",
                s.id,
                dep
            );
        }
    }
}

#[test]
fn committed_points_per_slot_never_exceed_capacity() {
    let timeline =
        compute_timeline(&multi_story_fixture(), start(), EstimationMode::Pessimistic, 2);
    for load in sprint_planner::report::sprint_load(&timeline) {
        assert!(
            load.points <= 8,
            "developer {} overbooked in sprint {}: {} points",
            load.developer,
            load.sprint_start,
            load.points
        );
    }
}

#[test]
fn identical_inputs_produce_identical_timelines() {
    let stories = multi_story_fixture();
    let first = compute_timeline(&stories, start(), EstimationMode::Optimistic, 2);
    let second = compute_timeline(&stories, start(), EstimationMode::Optimistic, 2);
    assert_eq!(first, second);
}

#[test]
fn weekend_project_start_rolls_to_monday() {
    // 2024-01-06 is a Saturday
    let stories = vec![story("a", 1, 1, &[])];
    let timeline = compute_timeline(&stories, d(2024, 1, 6), EstimationMode::Optimistic, 1);
    assert_eq!(timeline[0].start_date, d(2024, 1, 8));
}

#[test]
fn dependency_cycle_terminates_and_is_reported() {
    let stories = vec![
        story("a", 1, 1, &["b"]),
        story("b", 1, 1, &["a"]),
        story("c", 1, 1, &["a"]),
    ];
    let result = plan_timeline(&stories, start(), EstimationMode::Optimistic, 2);

    assert!(result.scheduled.is_empty());
    assert_eq!(result.unresolved.len(), 3);

    let by_id = |id: &str| {
        result
            .unresolved
            .iter()
            .find(|u| u.id == id)
            .expect("unresolved entry")
    };
    let cycle = vec!["a".to_string(), "b".to_string()];
    assert_eq!(by_id("a").reason, UnresolvedReason::DependencyCycle(cycle.clone()));
    assert_eq!(by_id("b").reason, UnresolvedReason::DependencyCycle(cycle));
    assert_eq!(by_id("c").reason, UnresolvedReason::BlockedBy("a".to_string()));

    // The legacy surface still just omits them
    assert!(compute_timeline(&stories, start(), EstimationMode::Optimistic, 2).is_empty());
    assert_eq!(
        compute_project_end_date(&stories, start(), EstimationMode::Optimistic, 2),
        start()
    );
}

#[test]
fn missing_dependency_is_reported_by_id() {
    let stories = vec![story("a", 1, 1, &["ghost"]), story("b", 1, 1, &[])];
    let result = plan_timeline(&stories, start(), EstimationMode::Optimistic, 1);

    assert_eq!(result.scheduled.len(), 1);
    assert_eq!(result.scheduled[0].id, "b");
    assert_eq!(result.unresolved.len(), 1);
    assert_eq!(result.unresolved[0].id, "a");
    assert_eq!(
        result.unresolved[0].reason,
        UnresolvedReason::MissingDependency("ghost".to_string())
    );
}

#[test]
fn oversized_story_still_gets_scheduled() {
    // 13 points exceed both the 8-point capacity and the 10-day sprint
    let stories = vec![story("epic", 13, 13, &[])];
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 1);
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].start_date, d(2024, 1, 1));
    assert_eq!(timeline[0].duration_days, 13);
    assert_eq!(timeline[0].end_date, d(2024, 1, 17));
}

#[test]
fn project_end_date_is_latest_story_end() {
    let stories = multi_story_fixture();
    let timeline = compute_timeline(&stories, start(), EstimationMode::Optimistic, 2);
    let expected = timeline.iter().map(|s| s.end_date).max().unwrap();
    assert_eq!(
        compute_project_end_date(&stories, start(), EstimationMode::Optimistic, 2),
        expected
    );
}
