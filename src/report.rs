use chrono::{Duration, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use std::collections::BTreeMap;

use crate::story::ScheduledStory;

/// Points booked for one developer within one sprint, summed over the
/// computed timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintLoad {
    pub developer: u32,
    pub sprint_start: NaiveDate,
    pub points: u32,
}

/// One row per scheduled story, dates as proper Date columns. This is the
/// tabular surface chart and export consumers read from.
pub fn timeline_dataframe(timeline: &[ScheduledStory]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = timeline.iter().map(|s| s.id.as_str()).collect();
    let titles: Vec<&str> = timeline.iter().map(|s| s.title.as_str()).collect();
    let epics: Vec<&str> = timeline.iter().map(|s| s.epic.as_str()).collect();
    let deps: Vec<String> = timeline.iter().map(|s| s.dependencies.join(",")).collect();
    let points: Vec<i64> = timeline.iter().map(|s| s.story_points as i64).collect();
    let durations: Vec<i64> = timeline.iter().map(|s| s.duration_days).collect();
    let developers: Vec<i64> = timeline.iter().map(|s| s.developer as i64).collect();
    let starts: Vec<i32> = timeline.iter().map(|s| date_to_i32(s.start_date)).collect();
    let ends: Vec<i32> = timeline.iter().map(|s| date_to_i32(s.end_date)).collect();
    let sprints: Vec<i32> = timeline
        .iter()
        .map(|s| date_to_i32(s.sprint_start))
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(10);
    columns.push(Series::new(PlSmallStr::from_static("id"), ids).into_column());
    columns.push(Series::new(PlSmallStr::from_static("title"), titles).into_column());
    columns.push(Series::new(PlSmallStr::from_static("epic"), epics).into_column());
    columns.push(Series::new(PlSmallStr::from_static("dependencies"), deps).into_column());
    columns.push(Series::new(PlSmallStr::from_static("story_points"), points).into_column());
    columns.push(Series::new(PlSmallStr::from_static("duration_days"), durations).into_column());
    columns.push(Series::new(PlSmallStr::from_static("developer"), developers).into_column());
    columns.push(
        Series::new(PlSmallStr::from_static("start_date"), starts)
            .cast(&DataType::Date)?
            .into_column(),
    );
    columns.push(
        Series::new(PlSmallStr::from_static("end_date"), ends)
            .cast(&DataType::Date)?
            .into_column(),
    );
    columns.push(
        Series::new(PlSmallStr::from_static("sprint_start"), sprints)
            .cast(&DataType::Date)?
            .into_column(),
    );

    DataFrame::new(columns)
}

/// Per-slot load summary, ordered by sprint then developer.
pub fn sprint_load(timeline: &[ScheduledStory]) -> Vec<SprintLoad> {
    let mut totals: BTreeMap<(NaiveDate, u32), u32> = BTreeMap::new();
    for story in timeline {
        *totals
            .entry((story.sprint_start, story.developer))
            .or_insert(0) += story.story_points;
    }

    totals
        .into_iter()
        .map(|((sprint_start, developer), points)| SprintLoad {
            developer,
            sprint_start,
            points,
        })
        .collect()
}

pub fn sprint_load_dataframe(timeline: &[ScheduledStory]) -> PolarsResult<DataFrame> {
    let loads = sprint_load(timeline);
    let sprints: Vec<i32> = loads.iter().map(|l| date_to_i32(l.sprint_start)).collect();
    let developers: Vec<i64> = loads.iter().map(|l| l.developer as i64).collect();
    let points: Vec<i64> = loads.iter().map(|l| l.points as i64).collect();

    let mut columns: Vec<Column> = Vec::with_capacity(3);
    columns.push(
        Series::new(PlSmallStr::from_static("sprint_start"), sprints)
            .cast(&DataType::Date)?
            .into_column(),
    );
    columns.push(Series::new(PlSmallStr::from_static("developer"), developers).into_column());
    columns.push(Series::new(PlSmallStr::from_static("points"), points).into_column());

    DataFrame::new(columns)
}

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}

/// Inverse of the epoch-day encoding used by Date columns.
pub fn date_from_i32(days: i32) -> NaiveDate {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    epoch + Duration::days(days as i64)
}
