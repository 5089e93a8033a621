use super::{PersistenceError, PersistenceResult};
use crate::effort::EstimationMode;
use crate::settings::PlanSettings;
use crate::story::{ScheduledStory, UserStory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Everything one planning session needs: the backlog plus the parameters it
/// was (or will be) planned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub project_start: NaiveDate,
    pub mode: EstimationMode,
    pub team_size: usize,
    #[serde(default)]
    pub settings: PlanSettings,
    pub stories: Vec<UserStory>,
}

pub fn save_plan_to_json<P: AsRef<Path>>(
    snapshot: &PlanSnapshot,
    path: P,
) -> PersistenceResult<()> {
    super::validate_stories(&snapshot.stories)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, snapshot)?;
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<PlanSnapshot> {
    let file = File::open(path)?;
    let snapshot: PlanSnapshot = serde_json::from_reader(file)?;
    super::validate_stories(&snapshot.stories)?;
    Ok(snapshot)
}

#[derive(Serialize, Deserialize)]
struct StoryCsvRecord {
    id: String,
    title: String,
    epic: String,
    min_points: u32,
    max_points: u32,
    dependencies: String,
    priority: String,
}

impl From<&UserStory> for StoryCsvRecord {
    fn from(story: &UserStory) -> Self {
        Self {
            id: story.id.clone(),
            title: story.title.clone(),
            epic: story.epic.clone(),
            min_points: story.min_points,
            max_points: story.max_points,
            dependencies: story.dependencies.join(","),
            priority: story.priority.clone().unwrap_or_default(),
        }
    }
}

impl StoryCsvRecord {
    fn into_story(self) -> UserStory {
        UserStory {
            id: self.id,
            title: self.title,
            epic: self.epic,
            min_points: self.min_points,
            max_points: self.max_points,
            dependencies: split_ids(&self.dependencies),
            priority: parse_string_option(self.priority),
        }
    }
}

pub fn save_stories_to_csv<P: AsRef<Path>>(
    stories: &[UserStory],
    path: P,
) -> PersistenceResult<()> {
    super::validate_stories(stories)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for story in stories {
        writer.serialize(StoryCsvRecord::from(story))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_stories_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<UserStory>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut stories = Vec::new();
    for record in reader.deserialize::<StoryCsvRecord>() {
        let record = record?;
        stories.push(record.into_story());
    }

    if stories.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no stories".into(),
        ));
    }

    super::validate_stories(&stories)?;
    Ok(stories)
}

#[derive(Serialize)]
struct TimelineCsvRecord<'a> {
    id: &'a str,
    title: &'a str,
    epic: &'a str,
    story_points: u32,
    duration_days: i64,
    developer: u32,
    sprint_start: String,
    start_date: String,
    end_date: String,
}

/// Write a computed timeline as a flat CSV table, dates as YYYY-MM-DD.
pub fn export_timeline_to_csv<P: AsRef<Path>>(
    timeline: &[ScheduledStory],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for story in timeline {
        writer.serialize(TimelineCsvRecord {
            id: &story.id,
            title: &story.title,
            epic: &story.epic,
            story_points: story.story_points,
            duration_days: story.duration_days,
            developer: story.developer,
            sprint_start: format_date(story.sprint_start),
            start_date: format_date(story.start_date),
            end_date: format_date(story.end_date),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn split_ids(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(',').map(|s| s.trim().to_string()).collect()
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
