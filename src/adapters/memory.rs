use crate::domain::model::{Document, DocumentKey, Namespace};
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use std::collections::{BTreeMap, BTreeSet};

/// In-process document store. Inserting a document creates its parent
/// namespaces, mirroring how directories come into existence on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    files: BTreeMap<Vec<String>, String>,
    dirs: BTreeSet<Vec<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: DocumentKey, text: impl Into<String>) {
        let segments: Vec<String> = key.segments().into_iter().map(str::to_string).collect();
        for depth in 1..segments.len() {
            self.dirs.insert(segments[..depth].to_vec());
        }
        self.files.insert(segments, text.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: DocumentKey, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    /// Registers an empty directory.
    pub fn with_dir(mut self, segments: &[&str]) -> Self {
        for depth in 1..=segments.len() {
            self.dirs
                .insert(segments[..depth].iter().map(|s| s.to_string()).collect());
        }
        self
    }

    pub fn remove(&mut self, key: &DocumentKey) -> Option<String> {
        let segments: Vec<String> = key.segments().into_iter().map(str::to_string).collect();
        self.files.remove(&segments)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, key: &DocumentKey) -> Result<Document> {
        let segments: Vec<String> = key.segments().into_iter().map(str::to_string).collect();
        Ok(self
            .files
            .get(&segments)
            .map(|text| Document::Present(text.clone()))
            .unwrap_or(Document::Absent))
    }

    fn list_namespaces(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let parent: Vec<String> = match namespace {
            Namespace::Root => Vec::new(),
            Namespace::Service(service) => vec![service.clone()],
        };

        // BTreeSet iteration keeps the result sorted
        Ok(self
            .dirs
            .iter()
            .filter(|dir| dir.len() == parent.len() + 1 && dir.starts_with(&parent))
            .filter_map(|dir| dir.last().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ServiceVersion;

    #[test]
    fn test_insert_creates_parent_namespaces() {
        let target = ServiceVersion::new("billing", "v1.0.0");
        let store = MemoryDocumentStore::new()
            .with(DocumentKey::service("billing", "CONTEXT.md"), "ctx")
            .with(DocumentKey::version(&target, "01-requirements.md"), "F001")
            .with(DocumentKey::global("overview.md"), "billing");

        assert_eq!(store.list_namespaces(&Namespace::Root).unwrap(), vec!["billing"]);
        assert_eq!(
            store
                .list_namespaces(&Namespace::Service("billing".into()))
                .unwrap(),
            vec!["v1.0.0"]
        );
        assert_eq!(
            store
                .read(&DocumentKey::version(&target, "01-requirements.md"))
                .unwrap()
                .text(),
            "F001"
        );
        assert_eq!(
            store
                .read(&DocumentKey::version(&target, "02-screen-spec.md"))
                .unwrap(),
            Document::Absent
        );
    }

    #[test]
    fn test_with_dir_registers_empty_namespace() {
        let store = MemoryDocumentStore::new().with_dir(&["auth", "v1"]);
        assert_eq!(store.list_namespaces(&Namespace::Root).unwrap(), vec!["auth"]);
        assert_eq!(
            store.list_namespaces(&Namespace::Service("auth".into())).unwrap(),
            vec!["v1"]
        );
    }
}
