use crate::core::cross_reference::CrossReferenceValidator;
use crate::core::discovery::discover_services;
use crate::core::overview::validate_overview;
use crate::domain::model::{ServiceVersion, ValidationResult};
use crate::domain::ports::{ConfigProvider, DocumentStore};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The corpus holds no services yet. Not a failure.
    NoServices,
    /// `--service` named a service that was not discovered.
    ServiceNotFound(String),
    Completed {
        targets: Vec<ServiceVersion>,
        result: ValidationResult,
    },
}

impl RunOutcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            RunOutcome::NoServices => 0,
            RunOutcome::ServiceNotFound(_) => 1,
            RunOutcome::Completed { result, .. } => crate::core::report::exit_status(result),
        }
    }
}

/// Drives discovery, per-version validation and the overview check.
/// Holds no state between runs.
pub struct ValidationEngine<S: DocumentStore, C: ConfigProvider> {
    store: S,
    config: C,
}

impl<S: DocumentStore, C: ConfigProvider> ValidationEngine<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self { store, config }
    }

    pub fn run(&self, service_filter: Option<&str>) -> Result<RunOutcome> {
        tracing::info!("Starting document validation in {}", self.config.docs_root());

        let mut targets = discover_services(&self.store, self.config.exclude_prefix())?;

        if let Some(wanted) = service_filter {
            targets.retain(|t| t.service == wanted);
            if targets.is_empty() {
                tracing::warn!("Service '{}' not found", wanted);
                return Ok(RunOutcome::ServiceNotFound(wanted.to_string()));
            }
        }

        if targets.is_empty() {
            tracing::info!("No services found");
            return Ok(RunOutcome::NoServices);
        }

        let mut result = ValidationResult::new();
        let validator = CrossReferenceValidator::new(&self.store);
        for target in &targets {
            validator.validate(target, &mut result)?;
        }
        validate_overview(&self.store, &targets, &mut result)?;

        tracing::info!(
            "Validation finished: {} error(s), {} warning(s)",
            result.error_count(),
            result.warning_count()
        );
        Ok(RunOutcome::Completed { targets, result })
    }
}
