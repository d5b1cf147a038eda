pub mod engine;
pub mod pipeline;
pub mod rules;

pub use crate::domain::model::{
    Category, CategoryTotal, Hotspot, ScanReport, SourceFile, TagResult, TaggedLine,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
