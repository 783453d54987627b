use folio_style::BrandingProfile;
use folio_traits::{BrandingError, BrandingSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Profiles held in memory: per-tenant entries plus an optional catch-all.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    name: String,
    tenants: HashMap<String, BrandingProfile>,
    fallback: Option<BrandingProfile>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A source that answers every lookup with `profile`.
    pub fn always(name: impl Into<String>, profile: BrandingProfile) -> Self {
        Self::new(name).with_fallback(profile)
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>, profile: BrandingProfile) -> Self {
        self.tenants.insert(tenant.into(), profile);
        self
    }

    pub fn with_fallback(mut self, profile: BrandingProfile) -> Self {
        self.fallback = Some(profile);
        self
    }
}

impl BrandingSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, tenant: Option<&str>) -> Result<Option<BrandingProfile>, BrandingError> {
        let tenant_profile = tenant.and_then(|t| self.tenants.get(t));
        Ok(tenant_profile.or(self.fallback.as_ref()).cloned())
    }
}

fn read_profile(path: &Path) -> Result<Option<BrandingProfile>, BrandingError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| BrandingError::Parse(format!("{}: {}", path.display(), e)))
}

/// A single JSON profile on disk, used as the platform-wide default.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BrandingSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn lookup(&self, _tenant: Option<&str>) -> Result<Option<BrandingProfile>, BrandingError> {
        read_profile(&self.path)
    }
}

/// Per-tenant overrides stored as `<dir>/<tenant>.json`.
#[derive(Debug, Clone)]
pub struct TenantDirectorySource {
    dir: PathBuf,
}

impl TenantDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BrandingSource for TenantDirectorySource {
    fn name(&self) -> &str {
        "tenant-directory"
    }

    fn lookup(&self, tenant: Option<&str>) -> Result<Option<BrandingProfile>, BrandingError> {
        let Some(tenant) = tenant else {
            return Ok(None);
        };
        let valid = !tenant.is_empty()
            && tenant
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(BrandingError::Unavailable {
                source_name: self.name().to_string(),
                message: format!("invalid tenant id '{}'", tenant),
            });
        }
        read_profile(&self.dir.join(format!("{}.json", tenant)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn named(name: &str) -> BrandingProfile {
        BrandingProfile {
            company_name: name.to_string(),
            ..BrandingProfile::default()
        }
    }

    #[test]
    fn static_source_prefers_tenant_entry() {
        let source = StaticSource::new("memory")
            .with_tenant("acme", named("Acme"))
            .with_fallback(named("Platform"));
        assert_eq!(source.lookup(Some("acme")).unwrap().unwrap().company_name, "Acme");
        assert_eq!(source.lookup(Some("other")).unwrap().unwrap().company_name, "Platform");
        assert_eq!(source.lookup(None).unwrap().unwrap().company_name, "Platform");
        assert!(StaticSource::new("empty").lookup(Some("acme")).unwrap().is_none());
    }

    #[test]
    fn json_file_missing_is_empty_and_garbage_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("branding.json");
        let source = JsonFileSource::new(&path);
        assert!(source.lookup(None).unwrap().is_none());

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(source.lookup(None), Err(BrandingError::Parse(_))));

        fs::write(&path, r#"{"companyName": "Harbor Homes"}"#).unwrap();
        assert_eq!(source.lookup(None).unwrap().unwrap().company_name, "Harbor Homes");
    }

    #[test]
    fn tenant_directory_reads_per_tenant_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("acme.json"), r#"{"companyName": "Acme"}"#).unwrap();
        let source = TenantDirectorySource::new(dir.path());
        assert_eq!(source.lookup(Some("acme")).unwrap().unwrap().company_name, "Acme");
        assert!(source.lookup(Some("globex")).unwrap().is_none());
        assert!(source.lookup(None).unwrap().is_none());
        assert!(source.lookup(Some("../acme")).is_err());
    }
}
