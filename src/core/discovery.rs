use crate::domain::model::{DocumentKey, Namespace, ServiceVersion, CONTEXT_MARKER};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;

/// Enumerates every (service, version) pair in the store.
///
/// A service counts only when its context marker sits directly beneath it.
/// Namespaces starting with `exclude_prefix` are scaffolding and skipped at
/// both levels.
pub fn discover_services<S: DocumentStore>(
    store: &S,
    exclude_prefix: &str,
) -> Result<Vec<ServiceVersion>> {
    let is_excluded = |name: &str| !exclude_prefix.is_empty() && name.starts_with(exclude_prefix);

    let mut targets = Vec::new();
    for service in store.list_namespaces(&Namespace::Root)? {
        if is_excluded(service.as_str()) {
            tracing::debug!("Skipping excluded namespace '{}'", service);
            continue;
        }
        if !store.exists(&DocumentKey::service(&service, CONTEXT_MARKER))? {
            tracing::debug!("'{}' has no {}, not a service", service, CONTEXT_MARKER);
            continue;
        }

        let versions = store.list_namespaces(&Namespace::Service(service.clone()))?;
        for version in versions.into_iter().filter(|v| !is_excluded(v.as_str())) {
            targets.push(ServiceVersion::new(service.clone(), version));
        }
    }

    tracing::info!("Discovered {} service version(s)", targets.len());
    Ok(targets)
}
