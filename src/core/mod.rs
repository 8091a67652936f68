pub mod classifier;
pub mod pipeline;
pub mod runner;
pub mod store;
pub mod workflow;

pub use crate::domain::model::{SeedRecord, TriageResult};
pub use crate::domain::ports::{Classifier, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
