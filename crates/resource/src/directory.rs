//! Assets read from a directory on disk, typically the one holding the document spec.
//!
//! Lookups are confined to the directory: absolute paths and `..` components are
//! rejected, and a canonicalized target must still live under the canonical base.

use folio_traits::{ResourceError, ResourceProvider, SharedResourceData};
use log::debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct AssetDirectory {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
}

impl AssetDirectory {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a profile reference (`logo.png`, `file://brand/logo.png`) to a path under
    /// the root.
    fn resolve(&self, reference: &str) -> Result<PathBuf, ResourceError> {
        let reference = reference.trim();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Err(ResourceError::NotFound(format!(
                "{} (remote assets are not fetched)",
                reference
            )));
        }
        let relative = reference.strip_prefix("file://").unwrap_or(reference);
        let relative_path = Path::new(relative);
        if relative_path.is_absolute()
            || relative_path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ResourceError::OutsideBase(reference.to_string()));
        }

        let candidate = self.root.join(relative_path);
        match (candidate.canonicalize(), &self.canonical_root) {
            (Ok(canonical), Some(base)) if !canonical.starts_with(base) => {
                Err(ResourceError::OutsideBase(reference.to_string()))
            }
            (Ok(canonical), _) => Ok(canonical),
            (Err(_), _) => Ok(candidate),
        }
    }
}

impl ResourceProvider for AssetDirectory {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path)?;
        debug!("Loading asset {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "AssetDirectory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_logo_relative_to_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("brand")).unwrap();
        fs::write(dir.path().join("brand/logo.png"), b"png-bytes").unwrap();

        let assets = AssetDirectory::new(dir.path());
        assert!(assets.exists("brand/logo.png"));
        assert_eq!(&*assets.load("brand/logo.png").unwrap(), b"png-bytes");
        assert_eq!(&*assets.load("file://brand/logo.png").unwrap(), b"png-bytes");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let assets = AssetDirectory::new(dir.path());
        assert!(matches!(
            assets.load("logo.png"),
            Err(ResourceError::NotFound(_))
        ));
        assert!(!assets.exists("logo.png"));
    }

    #[test]
    fn refuses_to_leave_the_root() {
        let dir = tempdir().unwrap();
        let assets = AssetDirectory::new(dir.path());
        assert!(matches!(
            assets.load("../../../etc/passwd"),
            Err(ResourceError::OutsideBase(_))
        ));
        assert!(matches!(
            assets.load("/etc/passwd"),
            Err(ResourceError::OutsideBase(_))
        ));
        assert!(!assets.exists("brand/../../secret"));
    }

    #[test]
    fn remote_urls_are_not_fetched() {
        let dir = tempdir().unwrap();
        let assets = AssetDirectory::new(dir.path());
        assert!(matches!(
            assets.load("https://cdn.example/logo.png"),
            Err(ResourceError::NotFound(_))
        ));
    }
}
