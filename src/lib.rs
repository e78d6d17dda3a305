pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, TomlConfig};

pub use adapters::{LocalDocumentStore, MemoryDocumentStore};
pub use crate::core::engine::{RunOutcome, ValidationEngine};
pub use crate::core::report::ReportFormat;
pub use domain::model::{Finding, Scope, ServiceVersion, Severity, ValidationResult};
pub use utils::error::{DocsError, Result};
