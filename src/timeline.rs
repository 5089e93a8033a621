use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::capacity::CapacityTracker;
use crate::effort::{self, EstimationMode};
use crate::graph::DependencyGraph;
use crate::settings::PlanSettings;
use crate::sprint::SprintCalendar;
use crate::story::{ScheduledStory, UserStory};

/// Why a story was left out of the schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedReason {
    /// A dependency id does not exist in the backlog.
    MissingDependency(String),
    /// The story sits on a dependency cycle; members listed in id order.
    DependencyCycle(Vec<String>),
    /// The story depends, possibly transitively, on an unresolved story.
    BlockedBy(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedStory {
    pub id: String,
    pub reason: UnresolvedReason,
}

/// Complete result of one planning run. Stories the fixed point could not
/// place are reported here with a reason rather than dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    /// Stories in the order they became schedulable.
    pub scheduled: Vec<ScheduledStory>,
    pub unresolved: Vec<UnresolvedStory>,
}

impl Timeline {
    /// Overall completion date: the latest story end, or `project_start` when
    /// nothing was scheduled.
    pub fn end_date(&self, project_start: NaiveDate) -> NaiveDate {
        self.scheduled
            .iter()
            .map(|story| story.end_date)
            .max()
            .unwrap_or(project_start)
    }
}

/// One precedence-aware, capacity-leveled scheduling run over a backlog.
///
/// The pass loop repeatedly walks the still-pending stories in backlog order
/// and places every story whose dependencies are already scheduled, until a
/// walk places nothing. Placement is a greedy search over (developer, sprint)
/// slots: earliest sprint first, lowest developer number first, first slot
/// with enough remaining capacity and enough calendar room wins.
pub struct TimelinePass<'a> {
    stories: &'a [UserStory],
    sprints: &'a SprintCalendar,
    settings: &'a PlanSettings,
}

impl<'a> TimelinePass<'a> {
    pub fn new(
        stories: &'a [UserStory],
        sprints: &'a SprintCalendar,
        settings: &'a PlanSettings,
    ) -> Self {
        Self { stories, sprints, settings }
    }

    pub fn execute(
        &self,
        project_start: NaiveDate,
        mode: EstimationMode,
        team_size: usize,
    ) -> Timeline {
        let calendar = self.sprints.calendar();
        let team_size = team_size.max(1);

        // Stories never start on a non-working day, including the very first
        // one, so a weekend project start rolls forward before anything else.
        let start = if calendar.is_available(project_start) {
            project_start
        } else {
            calendar.next_available(project_start)
        };

        let mut scheduled: Vec<ScheduledStory> = Vec::with_capacity(self.stories.len());
        let mut completed: HashSet<String> = HashSet::with_capacity(self.stories.len());
        let mut end_dates: HashMap<&str, NaiveDate> = HashMap::with_capacity(self.stories.len());
        let mut tracker = CapacityTracker::new();

        let mut pending: Vec<usize> = (0..self.stories.len()).collect();

        loop {
            let mut still_pending = Vec::with_capacity(pending.len());
            let mut progressed = false;

            for &idx in &pending {
                let story = &self.stories[idx];
                if !story.dependencies.iter().all(|dep| completed.contains(dep)) {
                    still_pending.push(idx);
                    continue;
                }

                // A story with no dependencies competes from the project
                // start; a dependent story from the working day after its
                // latest dependency end.
                let earliest = if story.dependencies.is_empty() {
                    start
                } else {
                    let latest_dep_end = story
                        .dependencies
                        .iter()
                        .filter_map(|dep| end_dates.get(dep.as_str()))
                        .max()
                        .copied()
                        .unwrap_or(start);
                    calendar.next_available(latest_dep_end)
                };

                let points = mode.points_for(story);
                let duration = effort::duration_days(points);

                let (developer, sprint_start, story_start) =
                    self.allocate(&tracker, earliest, points, duration, team_size);
                let story_end = calendar.find_next_available(story_start, duration - 1);

                tracker.commit(developer, sprint_start, points, (story_start, story_end));
                end_dates.insert(story.id.as_str(), story_end);
                completed.insert(story.id.clone());
                scheduled.push(ScheduledStory {
                    id: story.id.clone(),
                    title: story.title.clone(),
                    epic: story.epic.clone(),
                    min_points: story.min_points,
                    max_points: story.max_points,
                    dependencies: story.dependencies.clone(),
                    priority: story.priority.clone(),
                    start_date: story_start,
                    end_date: story_end,
                    duration_days: duration,
                    story_points: points,
                    developer: developer as u32 + 1,
                    sprint_start,
                });
                progressed = true;
            }

            pending = still_pending;
            if pending.is_empty() || !progressed {
                break;
            }
        }

        let unresolved = if pending.is_empty() {
            Vec::new()
        } else {
            DependencyGraph::build(self.stories).explain_unresolved(&pending, &completed)
        };

        Timeline { scheduled, unresolved }
    }

    /// Greedy slot search: returns the chosen developer (0-based), the sprint
    /// bucket, and the story's start date.
    fn allocate(
        &self,
        tracker: &CapacityTracker,
        earliest: NaiveDate,
        points: u32,
        duration: i64,
        team_size: usize,
    ) -> (usize, NaiveDate, NaiveDate) {
        let calendar = self.sprints.calendar();
        let capacity = self.settings.developer_sprint_capacity;
        let mut sprint_start = self.sprints.sprint_start_of(earliest);

        loop {
            let sprint_end = self.sprints.sprint_end(sprint_start);

            for developer in 0..team_size {
                let committed = tracker.committed_points(developer, sprint_start);
                // Oversized stories would fit nowhere; admit them into an
                // empty slot so the search terminates.
                let oversized = committed == 0
                    && (points > capacity || duration > self.settings.sprint_length_days);
                if committed + points > capacity && !oversized {
                    continue;
                }

                // Once the search has moved past the sprint containing the
                // earliest possible date, the story cannot start before the
                // candidate sprint: a fresh bucket must not overlap bookings
                // made under an earlier one.
                let mut lower = earliest.max(sprint_start);
                if !calendar.is_available(lower) {
                    lower = calendar.next_available(lower);
                }

                let story_start =
                    tracker.next_free_start(developer, sprint_start, lower, calendar);
                let story_end = calendar.find_next_available(story_start, duration - 1);

                if story_end <= sprint_end || oversized {
                    return (developer, sprint_start, story_start);
                }
            }

            sprint_start = self.sprints.next_sprint_start(sprint_start);
        }
    }
}

/// Schedule a backlog with default settings and calendar. Returns only the
/// stories that could be placed, in the order they became schedulable.
pub fn compute_timeline(
    stories: &[UserStory],
    project_start: NaiveDate,
    mode: EstimationMode,
    team_size: usize,
) -> Vec<ScheduledStory> {
    plan_timeline(stories, project_start, mode, team_size).scheduled
}

/// Full planning result, including diagnostics for unplaceable stories.
pub fn plan_timeline(
    stories: &[UserStory],
    project_start: NaiveDate,
    mode: EstimationMode,
    team_size: usize,
) -> Timeline {
    let sprints = SprintCalendar::default();
    let settings = PlanSettings::default();
    TimelinePass::new(stories, &sprints, &settings).execute(project_start, mode, team_size)
}

/// Latest end date over the computed timeline, or `project_start` when the
/// timeline is empty.
pub fn compute_project_end_date(
    stories: &[UserStory],
    project_start: NaiveDate,
    mode: EstimationMode,
    team_size: usize,
) -> NaiveDate {
    plan_timeline(stories, project_start, mode, team_size).end_date(project_start)
}
