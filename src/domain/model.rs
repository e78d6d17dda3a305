use serde::Serialize;
use std::fmt;

pub const CONTEXT_MARKER: &str = "CONTEXT.md";
pub const OVERVIEW: &str = "overview.md";

pub const REQUIREMENTS: &str = "01-requirements.md";
pub const SCREEN_SPEC: &str = "02-screen-spec.md";
pub const API_CONTRACT: &str = "03-api-contract.md";
pub const API_SPEC: &str = "05-api-spec.md";
pub const IMPLEMENTATION_GUIDE: &str = "08-implementation-guide.md";
pub const TEST_CASES: &str = "09-test-cases.md";

/// Documents every version directory must contain.
pub const REQUIRED_DOCS: [&str; 6] = [
    REQUIREMENTS,
    SCREEN_SPEC,
    API_CONTRACT,
    API_SPEC,
    IMPLEMENTATION_GUIDE,
    TEST_CASES,
];

/// One (service, version) pair to validate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ServiceVersion {
    pub service: String,
    pub version: String,
}

impl ServiceVersion {
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ServiceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.version)
    }
}

/// Addresses a document inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Global(String),
    Service { service: String, file: String },
    Version {
        service: String,
        version: String,
        file: String,
    },
}

impl DocumentKey {
    pub fn global(file: &str) -> Self {
        DocumentKey::Global(file.to_string())
    }

    pub fn service(service: &str, file: &str) -> Self {
        DocumentKey::Service {
            service: service.to_string(),
            file: file.to_string(),
        }
    }

    pub fn version(target: &ServiceVersion, file: &str) -> Self {
        DocumentKey::Version {
            service: target.service.clone(),
            version: target.version.clone(),
            file: file.to_string(),
        }
    }

    /// Path segments relative to the store root.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            DocumentKey::Global(file) => vec![file],
            DocumentKey::Service { service, file } => vec![service, file],
            DocumentKey::Version {
                service,
                version,
                file,
            } => vec![service, version, file],
        }
    }
}

/// A namespace whose children can be enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    Root,
    Service(String),
}

/// Content of a document lookup. Absence is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Absent,
    Present(String),
}

impl Document {
    pub fn is_present(&self) -> bool {
        matches!(self, Document::Present(_))
    }

    /// Present and non-empty.
    pub fn has_content(&self) -> bool {
        matches!(self, Document::Present(text) if !text.is_empty())
    }

    /// Text of the document; absent documents read as empty text.
    pub fn text(&self) -> &str {
        match self {
            Document::Absent => "",
            Document::Present(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Where a finding applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Service(String),
    Version(ServiceVersion),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "[global]"),
            Scope::Service(service) => write!(f, "[{}]", service),
            Scope::Version(target) => write!(f, "[{}]", target),
        }
    }
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub scope: Scope,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scope, self.message)
    }
}

/// Accumulates findings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, scope: Scope, message: impl Into<String>) {
        self.push(Severity::Error, scope, message.into());
    }

    pub fn warn(&mut self, scope: Scope, message: impl Into<String>) {
        self.push(Severity::Warning, scope, message.into());
    }

    fn push(&mut self, severity: Severity, scope: Scope, message: String) {
        self.findings.push(Finding {
            severity,
            scope,
            message,
        });
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.by_severity(Severity::Warning)
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Warnings alone never fail a run.
    pub fn ok(&self) -> bool {
        self.error_count() == 0
    }
}
