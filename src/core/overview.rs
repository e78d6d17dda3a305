use crate::domain::model::{DocumentKey, Scope, ServiceVersion, ValidationResult, OVERVIEW};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;

/// Checks that the global overview mentions every discovered service.
///
/// Membership is plain substring containment: a service `auth` counts as
/// listed when the overview only says "author".
pub fn validate_overview<S: DocumentStore>(
    store: &S,
    targets: &[ServiceVersion],
    result: &mut ValidationResult,
) -> Result<()> {
    let overview = store.read(&DocumentKey::global(OVERVIEW))?;
    if !overview.has_content() {
        result.error(Scope::Global, format!("docs/{} not found", OVERVIEW));
        return Ok(());
    }

    let mut seen: Vec<&str> = Vec::new();
    for target in targets {
        let service = target.service.as_str();
        if seen.contains(&service) {
            continue;
        }
        seen.push(service);

        if !overview.text().contains(service) {
            result.error(
                Scope::Global,
                format!("Service '{}' not listed in docs/{}", service, OVERVIEW),
            );
        }
    }
    Ok(())
}
