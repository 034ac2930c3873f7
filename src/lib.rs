pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{prompt::StdinPrompt, storage::LocalStorage};
pub use app::pipelines::GoalsPipeline;
pub use config::EnvConfig;
pub use crate::core::etl::EtlEngine;
pub use domain::model::{Credentials, Goals};
pub use utils::error::{EtlError, Result};
