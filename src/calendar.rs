use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// Working-day calendar. The default calendar treats Saturday and Sunday as
/// non-working and carries no holidays, which is what the timeline engine
/// assumes; holidays can be layered on for teams that observe them.
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkCalendar {
    /// Mon-Fri work week, no holidays.
    pub fn new() -> Self {
        Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }

    /// Add a single holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays at once
    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Set custom working days (e.g., Mon-Sat for 6-day weeks)
    pub fn set_working_days(&mut self, days: Vec<Weekday>) {
        self.non_working_days.clear();
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed,
                    Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun] {
            if !days.contains(&day) {
                self.non_working_days.insert(day);
            }
        }
    }

    /// Check if a date is available for scheduling
    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date)
            && !self.non_working_days.contains(&date.weekday())
    }

    /// Find the next available date strictly after a given date
    pub fn next_available(&self, from: NaiveDate) -> NaiveDate {
        let mut current = from + Duration::days(1);
        while !self.is_available(current) {
            current = current + Duration::days(1);
        }
        current
    }

    /// Find a date N available days ahead; the starting date itself is not
    /// counted. Zero or negative N returns the date unchanged.
    pub fn find_next_available(&self, from: NaiveDate, days_ahead: i64) -> NaiveDate {
        let mut current = from;
        let mut count = 0;

        while count < days_ahead {
            current = current + Duration::days(1);
            if self.is_available(current) {
                count += 1;
            }
        }
        current
    }
}
