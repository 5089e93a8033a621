use chrono::NaiveDate;
use std::collections::HashMap;

use crate::calendar::WorkCalendar;

/// Booking state for one planning run, keyed by `(developer, sprint_start)`.
/// Tracks both the points committed to each slot and the concrete date
/// intervals already booked there, so a developer is never assigned two
/// stories running at once within a sprint.
#[derive(Debug, Default)]
pub struct CapacityTracker {
    committed: HashMap<(usize, NaiveDate), u32>,
    intervals: HashMap<(usize, NaiveDate), Vec<(NaiveDate, NaiveDate)>>,
}

impl CapacityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points already booked for a developer within a sprint; 0 when nothing
    /// has been committed yet.
    pub fn committed_points(&self, developer: usize, sprint_start: NaiveDate) -> u32 {
        self.committed
            .get(&(developer, sprint_start))
            .copied()
            .unwrap_or(0)
    }

    /// Record a booking: add `points` to the slot total and remember the
    /// occupied date interval.
    pub fn commit(
        &mut self,
        developer: usize,
        sprint_start: NaiveDate,
        points: u32,
        interval: (NaiveDate, NaiveDate),
    ) {
        let key = (developer, sprint_start);
        *self.committed.entry(key).or_insert(0) += points;
        self.intervals.entry(key).or_default().push(interval);
    }

    /// Earliest date the developer can start a new story within the sprint.
    ///
    /// With no bookings in the slot this is `earliest` itself. Otherwise it
    /// is the working day after the latest booked interval end, but never
    /// before `earliest` so dependency ordering is preserved.
    pub fn next_free_start(
        &self,
        developer: usize,
        sprint_start: NaiveDate,
        earliest: NaiveDate,
        calendar: &WorkCalendar,
    ) -> NaiveDate {
        match self.intervals.get(&(developer, sprint_start)) {
            None => earliest,
            Some(booked) => {
                let latest_end = booked
                    .iter()
                    .map(|&(_, end)| end)
                    .max()
                    .expect("interval list is never stored empty");
                calendar.next_available(latest_end).max(earliest)
            }
        }
    }
}
