pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::cli::LocalStorage;

pub use core::{engine::ScanEngine, pipeline::ScanPipeline, rules::RuleSet};
pub use domain::model::{Category, TaggedLine};
pub use utils::error::{Result, TagError};
