mod engine;
mod milestone;
mod state;
mod tasks;

pub use engine::{ChallengeEngine, Phase, DEFAULT_CELEBRATION_MS};
pub use milestone::{next_milestone, reached_milestones, Milestone, MILESTONES};
pub use state::{parse_date, ChallengeState, DayOutcome, STRIKE_LIMIT};
pub use tasks::{
    Category, KindnessTasks, LearningTasks, MovementTasks, NutritionTasks, ResponsibilityTasks,
    TaskBoard, TaskKey,
};
