use crate::domain::model::{Document, DocumentKey, Namespace};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{DocsError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Documents laid out on disk as `<root>/<service>/<version>/<file>`.
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> PathBuf {
        let mut path = self.base_path.clone();
        path.extend(segments);
        path
    }
}

impl DocumentStore for LocalDocumentStore {
    fn read(&self, key: &DocumentKey) -> Result<Document> {
        let full_path = self.resolve(key.segments());

        let bytes = match fs::read(&full_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found", full_path.display());
                return Ok(Document::Absent);
            }
            Err(e) => return Err(DocsError::io(full_path, e)),
        };

        let text = String::from_utf8(bytes).map_err(|source| DocsError::Decoding {
            path: full_path,
            source,
        })?;
        Ok(Document::Present(text))
    }

    fn exists(&self, key: &DocumentKey) -> Result<bool> {
        Ok(self.resolve(key.segments()).is_file())
    }

    fn list_namespaces(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let dir = match namespace {
            Namespace::Root => self.base_path.clone(),
            Namespace::Service(service) => self.resolve([service.as_str()]),
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DocsError::io(dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DocsError::io(&dir, e))?;
            // follows symlinks, a linked version directory still counts
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 directory name {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }
}
