use crate::core::extract::{
    extract_endpoints, extract_ids, find_contract_state, parent_feature, ContractState, IdKind,
};
use crate::domain::model::{
    Document, DocumentKey, Scope, ServiceVersion, ValidationResult, API_CONTRACT, API_SPEC,
    CONTEXT_MARKER, REQUIREMENTS, REQUIRED_DOCS, SCREEN_SPEC, TEST_CASES,
};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use std::collections::{BTreeMap, BTreeSet};

static ABSENT: Document = Document::Absent;

/// Documents whose text the rules inspect. The implementation guide is only
/// checked for presence and never read.
const CONTENT_DOCS: [&str; 5] = [REQUIREMENTS, SCREEN_SPEC, API_CONTRACT, API_SPEC, TEST_CASES];

/// The inspected documents of one version, read once.
struct VersionDocuments {
    docs: BTreeMap<&'static str, Document>,
}

impl VersionDocuments {
    fn load<S: DocumentStore>(store: &S, target: &ServiceVersion) -> Result<Self> {
        let mut docs = BTreeMap::new();
        for name in CONTENT_DOCS {
            docs.insert(name, store.read(&DocumentKey::version(target, name))?);
        }
        Ok(Self { docs })
    }

    fn get(&self, name: &str) -> &Document {
        self.docs.get(name).unwrap_or(&ABSENT)
    }

    fn is_present<S: DocumentStore>(
        &self,
        store: &S,
        target: &ServiceVersion,
        name: &str,
    ) -> Result<bool> {
        match self.docs.get(name) {
            Some(doc) => Ok(doc.is_present()),
            None => store.exists(&DocumentKey::version(target, name)),
        }
    }
}

/// Runs the per-version rule set. Every rule records findings and lets the
/// next one run; only store faults come back as `Err`.
pub struct CrossReferenceValidator<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> CrossReferenceValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn validate(&self, target: &ServiceVersion, result: &mut ValidationResult) -> Result<()> {
        tracing::info!("Validating {}", target);

        let docs = VersionDocuments::load(self.store, target)?;
        let scope = Scope::Version(target.clone());

        // 1. required documents
        for name in REQUIRED_DOCS {
            if !docs.is_present(self.store, target, name)? {
                result.error(scope.clone(), format!("Missing required document: {}", name));
            }
        }

        // 2. context marker, reported once per validated version
        if !self
            .store
            .exists(&DocumentKey::service(&target.service, CONTEXT_MARKER))?
        {
            result.error(
                Scope::Service(target.service.clone()),
                format!("Missing {}", CONTEXT_MARKER),
            );
        }

        let requirements = docs.get(REQUIREMENTS);
        let feature_ids = extract_ids(requirements.text(), IdKind::Feature);
        tracing::debug!("{}: {} feature id(s) in requirements", target, feature_ids.len());

        check_requirements_have_features(&scope, requirements, &feature_ids, result);
        check_features_referenced(&scope, &feature_ids, docs.get(API_SPEC), result, |fid| {
            format!("{} in requirements but not referenced in {}", fid, API_SPEC)
        });
        check_features_referenced(&scope, &feature_ids, docs.get(TEST_CASES), result, |fid| {
            format!("{} in requirements but no test case in {}", fid, TEST_CASES)
        });
        check_test_case_parents(&scope, &feature_ids, docs.get(TEST_CASES), result);
        check_screen_features(target, &scope, &feature_ids, docs.get(SCREEN_SPEC), result);
        check_contract_state(&scope, docs.get(API_CONTRACT), result);
        check_endpoints(&scope, docs.get(API_CONTRACT), docs.get(API_SPEC), result);

        Ok(())
    }
}

fn check_requirements_have_features(
    scope: &Scope,
    requirements: &Document,
    feature_ids: &BTreeSet<String>,
    result: &mut ValidationResult,
) {
    if feature_ids.is_empty() && requirements.has_content() {
        result.warn(scope.clone(), format!("No F-IDs found in {}", REQUIREMENTS));
    }
}

/// Absent or empty `other` documents were already reported as missing, or
/// carry nothing to compare against.
fn check_features_referenced(
    scope: &Scope,
    feature_ids: &BTreeSet<String>,
    other: &Document,
    result: &mut ValidationResult,
    message: impl Fn(&str) -> String,
) {
    if !other.has_content() {
        return;
    }
    let referenced = extract_ids(other.text(), IdKind::Feature);
    for fid in feature_ids.difference(&referenced) {
        result.warn(scope.clone(), message(fid.as_str()));
    }
}

fn check_test_case_parents(
    scope: &Scope,
    feature_ids: &BTreeSet<String>,
    test_cases: &Document,
    result: &mut ValidationResult,
) {
    // nothing to validate against
    if feature_ids.is_empty() {
        return;
    }
    for tc_id in extract_ids(test_cases.text(), IdKind::TestCase) {
        let Some(parent) = parent_feature(&tc_id) else {
            continue;
        };
        if !feature_ids.contains(parent) {
            result.error(
                scope.clone(),
                format!("{} references {} which is not in {}", tc_id, parent, REQUIREMENTS),
            );
        }
    }
}

fn check_screen_features(
    target: &ServiceVersion,
    scope: &Scope,
    feature_ids: &BTreeSet<String>,
    screen_spec: &Document,
    result: &mut ValidationResult,
) {
    let screen_ids = extract_ids(screen_spec.text(), IdKind::Screen);
    tracing::debug!("{}: {} screen id(s) in {}", target, screen_ids.len(), SCREEN_SPEC);

    if feature_ids.is_empty() {
        return;
    }
    let screen_features = extract_ids(screen_spec.text(), IdKind::Feature);
    for fid in screen_features.difference(feature_ids) {
        result.warn(
            scope.clone(),
            format!("{} in {} but not in {}", fid, SCREEN_SPEC, REQUIREMENTS),
        );
    }
}

fn check_contract_state(scope: &Scope, contract: &Document, result: &mut ValidationResult) {
    if !contract.has_content() {
        return;
    }
    match find_contract_state(contract.text()) {
        None => result.warn(
            scope.clone(),
            format!("{} does not declare a state (Draft/Review/Locked)", API_CONTRACT),
        ),
        Some(raw) => match raw.parse::<ContractState>() {
            Ok(state) => tracing::debug!("{} contract state: {:?}", scope, state),
            Err(invalid) => result.error(
                scope.clone(),
                format!("{} has invalid state: {}", API_CONTRACT, invalid),
            ),
        },
    }
}

/// Paths only; the HTTP method is not compared.
fn check_endpoints(
    scope: &Scope,
    contract: &Document,
    api_spec: &Document,
    result: &mut ValidationResult,
) {
    if !contract.has_content() || !api_spec.has_content() {
        return;
    }
    let paths = |doc: &Document| -> BTreeSet<String> {
        extract_endpoints(doc.text())
            .into_iter()
            .map(|endpoint| endpoint.path)
            .collect()
    };
    let contract_paths = paths(contract);
    let spec_paths = paths(api_spec);
    if spec_paths.is_empty() {
        return;
    }
    for path in contract_paths.difference(&spec_paths) {
        result.warn(
            scope.clone(),
            format!("Endpoint {} in {} but not in {}", path, API_CONTRACT, API_SPEC),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDocumentStore;
    use crate::domain::model::{Finding, Severity, IMPLEMENTATION_GUIDE};

    fn target() -> ServiceVersion {
        ServiceVersion::new("billing", "v1.0.0")
    }

    /// A fully consistent version with every document present.
    fn consistent_store() -> MemoryDocumentStore {
        let t = target();
        MemoryDocumentStore::new()
            .with(DocumentKey::service("billing", CONTEXT_MARKER), "# billing")
            .with(DocumentKey::version(&t, REQUIREMENTS), "## F001 결제 요청")
            .with(DocumentKey::version(&t, SCREEN_SPEC), "S001 checkout (F001)")
            .with(
                DocumentKey::version(&t, API_CONTRACT),
                "**상태**: `Locked`\n\nPOST /api/v1/payments\n",
            )
            .with(
                DocumentKey::version(&t, API_SPEC),
                "F001\nPOST /api/v1/payments\n",
            )
            .with(DocumentKey::version(&t, IMPLEMENTATION_GUIDE), "guide")
            .with(DocumentKey::version(&t, TEST_CASES), "TC-F001-01 pay")
    }

    fn run(store: &MemoryDocumentStore) -> ValidationResult {
        let mut result = ValidationResult::new();
        CrossReferenceValidator::new(store)
            .validate(&target(), &mut result)
            .unwrap();
        result
    }

    fn messages(result: &ValidationResult, severity: Severity) -> Vec<String> {
        result
            .findings()
            .iter()
            .filter(|f| f.severity == severity)
            .map(Finding::to_string)
            .collect()
    }

    #[test]
    fn test_consistent_version_has_no_findings() {
        let result = run(&consistent_store());
        assert!(result.ok());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_missing_api_spec_suppresses_reference_warning() {
        let mut store = consistent_store();
        store.remove(&DocumentKey::version(&target(), API_SPEC));

        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Error),
            vec!["[billing/v1.0.0] Missing required document: 05-api-spec.md"]
        );
        assert!(messages(&result, Severity::Warning)
            .iter()
            .all(|w| !w.contains("not referenced in 05-api-spec.md")));
    }

    #[test]
    fn test_feature_missing_from_api_spec() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, REQUIREMENTS), "F001, F002");
        store.insert(DocumentKey::version(&t, TEST_CASES), "TC-F001-01 TC-F002-01");

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(
            messages(&result, Severity::Warning),
            vec!["[billing/v1.0.0] F002 in requirements but not referenced in 05-api-spec.md"]
        );
    }

    #[test]
    fn test_feature_without_test_case() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, REQUIREMENTS), "F001 F002");
        store.insert(DocumentKey::version(&t, API_SPEC), "F001 F002 POST /api/v1/payments");

        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Warning),
            vec!["[billing/v1.0.0] F002 in requirements but no test case in 09-test-cases.md"]
        );
    }

    #[test]
    fn test_dangling_test_case_is_an_error() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, TEST_CASES), "TC-F001-01 TC-F099-01");

        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Error),
            vec!["[billing/v1.0.0] TC-F099-01 references F099 which is not in 01-requirements.md"]
        );
    }

    #[test]
    fn test_empty_requirements_baseline_suppresses_test_case_check() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, REQUIREMENTS), "요구사항 없음");
        store.insert(DocumentKey::version(&t, TEST_CASES), "TC-F099-01");
        store.insert(DocumentKey::version(&t, SCREEN_SPEC), "S001 F123");

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(
            messages(&result, Severity::Warning),
            vec!["[billing/v1.0.0] No F-IDs found in 01-requirements.md"]
        );
    }

    #[test]
    fn test_present_but_empty_requirements_does_not_warn() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, REQUIREMENTS), "");

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_screen_spec_feature_not_in_requirements() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, SCREEN_SPEC), "S001 F001 S002 F007");

        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Warning),
            vec!["[billing/v1.0.0] F007 in 02-screen-spec.md but not in 01-requirements.md"]
        );
    }

    #[test]
    fn test_contract_without_state_declaration() {
        let t = target();
        let mut store = consistent_store();
        store.insert(
            DocumentKey::version(&t, API_CONTRACT),
            "**상태**: `Final`\nPOST /api/v1/payments",
        );

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(
            messages(&result, Severity::Warning),
            vec!["[billing/v1.0.0] 03-api-contract.md does not declare a state (Draft/Review/Locked)"]
        );
    }

    #[test]
    fn test_endpoint_drift_compares_paths_only() {
        let t = target();
        let mut store = consistent_store();
        store.insert(
            DocumentKey::version(&t, API_CONTRACT),
            "**상태**: `Review`\nGET /api/v1/payments\nDELETE /api/v1/refunds\n",
        );

        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Warning),
            vec!["[billing/v1.0.0] Endpoint /api/v1/refunds in 03-api-contract.md but not in 05-api-spec.md"]
        );
    }

    #[test]
    fn test_endpoint_check_needs_spec_endpoints() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, API_SPEC), "F001 only prose here");

        let result = run(&store);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_missing_context_marker() {
        let mut store = consistent_store();
        store.remove(&DocumentKey::service("billing", CONTEXT_MARKER));

        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Error),
            vec!["[billing] Missing CONTEXT.md"]
        );
    }

    #[test]
    fn test_empty_version_reports_every_required_document() {
        let store = MemoryDocumentStore::new()
            .with(DocumentKey::service("billing", CONTEXT_MARKER), "")
            .with_dir(&["billing", "v1.0.0"]);

        let result = run(&store);
        assert_eq!(result.error_count(), REQUIRED_DOCS.len());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, REQUIREMENTS), "F003 F001 F002");
        store.insert(DocumentKey::version(&t, TEST_CASES), "TC-F009-01 TC-F001-02");

        assert_eq!(run(&store), run(&store));
    }

    #[test]
    fn test_empty_api_spec_and_test_cases_do_not_warn() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, API_SPEC), "");
        store.insert(DocumentKey::version(&t, TEST_CASES), "");

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_empty_contract_skips_state_and_endpoint_rules() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, API_CONTRACT), "");
        store.insert(
            DocumentKey::version(&t, API_SPEC),
            "F001\nPOST /api/v1/payments\nGET /api/v1/refunds\n",
        );

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_empty_api_spec_skips_endpoint_rule() {
        let t = target();
        let mut store = consistent_store();
        store.insert(DocumentKey::version(&t, API_SPEC), "");
        store.insert(
            DocumentKey::version(&t, API_CONTRACT),
            "**상태**: `Draft`\nDELETE /api/v1/refunds\n",
        );

        let result = run(&store);
        assert!(result.ok());
        assert_eq!(result.warning_count(), 0);
    }

    /// Fails any read of the implementation guide.
    struct GuideUnreadable(MemoryDocumentStore);

    impl DocumentStore for GuideUnreadable {
        fn read(&self, key: &DocumentKey) -> Result<Document> {
            if key.segments().last() == Some(&IMPLEMENTATION_GUIDE) {
                return Err(crate::utils::error::DocsError::io(
                    IMPLEMENTATION_GUIDE,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "unreadable"),
                ));
            }
            self.0.read(key)
        }

        fn exists(&self, key: &DocumentKey) -> Result<bool> {
            self.0.exists(key)
        }

        fn list_namespaces(&self, namespace: &crate::domain::model::Namespace) -> Result<Vec<String>> {
            self.0.list_namespaces(namespace)
        }
    }

    #[test]
    fn test_implementation_guide_is_only_checked_for_presence() {
        let store = GuideUnreadable(consistent_store());
        let mut result = ValidationResult::new();
        CrossReferenceValidator::new(&store)
            .validate(&target(), &mut result)
            .unwrap();
        assert!(result.ok());
        assert_eq!(result.warning_count(), 0);

        let mut store = consistent_store();
        store.remove(&DocumentKey::version(&target(), IMPLEMENTATION_GUIDE));
        let result = run(&store);
        assert_eq!(
            messages(&result, Severity::Error),
            vec!["[billing/v1.0.0] Missing required document: 08-implementation-guide.md"]
        );
    }
}
