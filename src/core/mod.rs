pub mod cross_reference;
pub mod discovery;
pub mod engine;
pub mod extract;
pub mod overview;
pub mod report;

pub use crate::domain::model::{Document, DocumentKey, Finding, ServiceVersion, ValidationResult};
pub use crate::domain::ports::{ConfigProvider, DocumentStore};
pub use crate::utils::error::Result;
