pub mod calendar;
pub mod capacity;
pub mod effort;
pub mod graph;
pub mod persistence;
pub mod report;
pub mod settings;
pub mod sprint;
pub mod story;
pub mod timeline;

pub use calendar::WorkCalendar;
pub use capacity::CapacityTracker;
pub use effort::EstimationMode;
pub use settings::PlanSettings;
pub use sprint::SprintCalendar;
pub use story::{ScheduledStory, UserStory};
pub use timeline::{
    compute_project_end_date, compute_timeline, plan_timeline, Timeline, TimelinePass,
    UnresolvedReason, UnresolvedStory,
};
