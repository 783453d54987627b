//! Loading of binary assets referenced by a branding profile (logos, mostly).
//!
//! The composition engine never touches the filesystem directly; it asks a
//! `ResourceProvider` for the bytes behind a `logoUrl` and treats any failure
//! as "no logo".

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Resource path escapes its base directory: {0}")]
    OutsideBase(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Reference-counted asset bytes.
pub type SharedResourceData = Arc<Vec<u8>>;

pub trait ResourceProvider: Send + Sync + Debug {
    /// Load the bytes stored under `path`.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Human-readable name used in log lines.
    fn name(&self) -> &'static str;
}

/// Assets registered up front, keyed by the exact string a profile refers to.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `path`, replacing any previous entry.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        resources.insert(path, Arc::new(data));
        Ok(())
    }

    /// Builder-style registration for fixtures and tests.
    pub fn with(self, path: impl Into<String>, data: Vec<u8>) -> Self {
        if let Ok(mut resources) = self.resources.write() {
            resources.insert(path.into(), Arc::new(data));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_registered_logo() {
        let provider = InMemoryResourceProvider::new().with("logo.png", vec![0x89, b'P', b'N', b'G']);
        assert!(provider.exists("logo.png"));
        assert_eq!(provider.load("logo.png").unwrap()[1], b'P');
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn missing_asset_is_not_found() {
        let provider = InMemoryResourceProvider::new();
        assert!(provider.is_empty());
        assert!(matches!(
            provider.load("missing.png"),
            Err(ResourceError::NotFound(_))
        ));
    }

    #[test]
    fn add_replaces_previous_bytes() {
        let provider = InMemoryResourceProvider::new();
        provider.add("a", vec![1]).unwrap();
        provider.add("a", vec![2, 3]).unwrap();
        assert_eq!(&*provider.load("a").unwrap(), &vec![2, 3]);
    }
}
