use serde::{Deserialize, Serialize};

use crate::sprint::DEFAULT_SPRINT_LENGTH_DAYS;

pub const DEFAULT_DEVELOPER_SPRINT_CAPACITY: u32 = 8;

/// Tuning knobs for the timeline engine. These are fixed for one planning
/// run; per-call inputs (start date, estimation mode, team size) are passed
/// to the engine directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Sprint length in working days.
    pub sprint_length_days: i64,
    /// Maximum story points one developer may be booked for within a sprint.
    pub developer_sprint_capacity: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            sprint_length_days: DEFAULT_SPRINT_LENGTH_DAYS,
            developer_sprint_capacity: DEFAULT_DEVELOPER_SPRINT_CAPACITY,
        }
    }
}
