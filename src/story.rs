use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A backlog item. Immutable input to the timeline engine; the engine never
/// mutates stories, it only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: String,
    pub title: String,
    pub epic: String,
    pub min_points: u32,
    pub max_points: u32,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Free-form priority label; carried through persistence, ignored by the
    /// scheduler.
    #[serde(default)]
    pub priority: Option<String>,
}

impl UserStory {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        epic: impl Into<String>,
        min_points: u32,
        max_points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            epic: epic.into(),
            min_points,
            max_points,
            dependencies: Vec::new(),
            priority: None,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// One scheduled backlog item: the story plus its computed placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledStory {
    pub id: String,
    pub title: String,
    pub epic: String,
    pub min_points: u32,
    pub max_points: u32,
    pub dependencies: Vec<String>,
    pub priority: Option<String>,
    /// First working day of the story.
    pub start_date: NaiveDate,
    /// Last working day of the story, inclusive.
    pub end_date: NaiveDate,
    /// Working days between start and end, inclusive.
    pub duration_days: i64,
    /// The point value actually booked, per estimation mode.
    pub story_points: u32,
    /// 1-based developer number within the team.
    pub developer: u32,
    /// Start of the sprint whose capacity the story was booked against.
    pub sprint_start: NaiveDate,
}
