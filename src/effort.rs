use serde::{Deserialize, Serialize};

use crate::story::UserStory;

/// Which end of a story's point range the plan is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationMode {
    Optimistic,
    Pessimistic,
}

impl EstimationMode {
    pub fn points_for(self, story: &UserStory) -> u32 {
        match self {
            EstimationMode::Optimistic => story.min_points,
            EstimationMode::Pessimistic => story.max_points,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EstimationMode::Optimistic => "optimistic",
            EstimationMode::Pessimistic => "pessimistic",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input {
            "optimistic" | "min" => Some(EstimationMode::Optimistic),
            "pessimistic" | "max" => Some(EstimationMode::Pessimistic),
            _ => None,
        }
    }
}

/// Working-day duration for a story-point value. Larger stories carry
/// nonlinear overhead, hence the jump at 8 points. Values outside the table
/// map to themselves; that fallback is intentional, not an error path.
pub fn duration_days(points: u32) -> i64 {
    match points {
        1 => 1,
        3 => 3,
        5 => 5,
        8 => 10,
        other => other as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_table_matches_point_scale() {
        assert_eq!(duration_days(1), 1);
        assert_eq!(duration_days(3), 3);
        assert_eq!(duration_days(5), 5);
        assert_eq!(duration_days(8), 10);
    }

    #[test]
    fn unlisted_points_fall_back_to_identity() {
        assert_eq!(duration_days(2), 2);
        assert_eq!(duration_days(13), 13);
        assert_eq!(duration_days(0), 0);
    }

    #[test]
    fn mode_selects_point_range_end() {
        let story = UserStory::new("s", "Story", "Epic", 3, 8);
        assert_eq!(EstimationMode::Optimistic.points_for(&story), 3);
        assert_eq!(EstimationMode::Pessimistic.points_for(&story), 8);
    }
}
