use crate::domain::model::{Document, DocumentKey, Namespace};
use crate::utils::error::Result;

/// Read access to the document corpus.
///
/// A missing document is `Ok(Document::Absent)`; `Err` is reserved for faults
/// unrelated to existence (permissions, decoding).
pub trait DocumentStore {
    fn read(&self, key: &DocumentKey) -> Result<Document>;

    fn exists(&self, key: &DocumentKey) -> Result<bool> {
        Ok(self.read(key)?.is_present())
    }

    /// Directory-like children of `namespace`, sorted by name. Files are not
    /// included, neither are missing namespaces (those yield an empty list).
    fn list_namespaces(&self, namespace: &Namespace) -> Result<Vec<String>>;
}

pub trait ConfigProvider {
    fn docs_root(&self) -> &str;
    fn exclude_prefix(&self) -> &str;
}
