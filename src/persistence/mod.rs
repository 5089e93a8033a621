use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

use crate::story::UserStory;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Structural checks on a backlog before it is stored or handed to the
/// engine: non-empty unique ids, positive point values, ordered point range.
/// Dependency references to unknown ids are allowed here; the scheduler
/// reports those per story instead.
pub fn validate_stories(stories: &[UserStory]) -> PersistenceResult<()> {
    let mut seen_ids = HashSet::with_capacity(stories.len());
    for story in stories {
        if story.id.trim().is_empty() {
            return Err(PersistenceError::InvalidData(
                "story with empty id".into(),
            ));
        }
        if !seen_ids.insert(story.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate story id '{}'",
                story.id
            )));
        }
        if story.min_points == 0 || story.max_points == 0 {
            return Err(PersistenceError::InvalidData(format!(
                "story '{}' has zero story points",
                story.id
            )));
        }
        if story.min_points > story.max_points {
            return Err(PersistenceError::InvalidData(format!(
                "story '{}' has min_points {} greater than max_points {}",
                story.id, story.min_points, story.max_points
            )));
        }
    }
    Ok(())
}

pub mod file;

pub use file::{
    export_timeline_to_csv, load_plan_from_json, load_stories_from_csv, save_plan_to_json,
    save_stories_to_csv, PlanSnapshot,
};
