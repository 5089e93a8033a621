use crate::calendar::WorkCalendar;
use chrono::{Datelike, Duration, NaiveDate};

pub const DEFAULT_SPRINT_LENGTH_DAYS: i64 = 10;

/// Sprint window arithmetic on top of a working-day calendar.
///
/// Sprints are anchored on the Monday of the calendar week containing a date
/// and span a fixed number of working days. Sprint start dates double as the
/// capacity bucket keys used by the scheduler.
pub struct SprintCalendar {
    calendar: WorkCalendar,
    length_days: i64,
}

impl Default for SprintCalendar {
    fn default() -> Self {
        Self::new(WorkCalendar::default(), DEFAULT_SPRINT_LENGTH_DAYS)
    }
}

impl SprintCalendar {
    pub fn new(calendar: WorkCalendar, length_days: i64) -> Self {
        Self { calendar, length_days }
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn length_days(&self) -> i64 {
        self.length_days
    }

    /// Monday of the calendar week containing `date`; Sunday maps to the
    /// Monday six days earlier.
    pub fn sprint_start_of(&self, date: NaiveDate) -> NaiveDate {
        let offset = date.weekday().num_days_from_monday() as i64;
        date - Duration::days(offset)
    }

    /// Last day of the sprint: `length_days` working days ahead of the start,
    /// the start itself not counted.
    pub fn sprint_end(&self, sprint_start: NaiveDate) -> NaiveDate {
        self.calendar.find_next_available(sprint_start, self.length_days)
    }

    /// First candidate start of the sprint after the one beginning at
    /// `sprint_start`, as used by the allocation search.
    pub fn next_sprint_start(&self, sprint_start: NaiveDate) -> NaiveDate {
        self.calendar.next_available(self.sprint_end(sprint_start))
    }
}
