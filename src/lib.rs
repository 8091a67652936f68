pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{Cli, IntakeConfig};

pub use crate::config::storage::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::classifier::{classify, KeywordClassifier};
pub use crate::core::pipeline::IntakePipeline;
pub use crate::core::runner::TriageRunner;
pub use crate::core::store::{RequestFilter, RequestStore};
pub use crate::core::workflow::advance_workflow;
pub use crate::domain::model::{
    Category, ClassificationResult, Department, NewRequest, Priority, ServiceRequest,
    WorkflowStatus,
};
pub use crate::utils::error::{Result, TriageError};
