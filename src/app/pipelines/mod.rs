pub mod goals_pipeline;

pub use goals_pipeline::GoalsPipeline;
