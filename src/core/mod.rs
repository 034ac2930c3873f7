pub mod aggregator;
pub mod auth;
pub mod etl;
pub mod token_store;

pub use crate::domain::model::{ActivitySnapshot, GoalSummary};
pub use crate::domain::ports::{AuthorizationPrompt, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
