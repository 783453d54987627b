use folio_style::BrandingProfile;
use folio_traits::BrandingSource;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Cache lifetime when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Where a resolved profile came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandingOrigin {
    Cache,
    Source(String),
    /// Every tier failed; an expired cache entry was reused.
    StaleCache,
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub profile: BrandingProfile,
    pub origin: BrandingOrigin,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    profile: BrandingProfile,
    stored_at: Instant,
}

pub struct BrandingResolver {
    sources: Vec<Arc<dyn BrandingSource>>,
    ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl fmt::Debug for BrandingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrandingResolver")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            )
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl Default for BrandingResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn cache_key(tenant: Option<&str>) -> String {
    tenant.unwrap_or_default().to_string()
}

impl BrandingResolver {
    pub fn builder() -> BrandingResolverBuilder {
        BrandingResolverBuilder::default()
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self, tenant: Option<&str>) -> Resolution {
        let key = cache_key(tenant);
        let cached = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(&key).cloned());

        if let Some(entry) = &cached
            && entry.stored_at.elapsed() < self.ttl
        {
            return Resolution {
                profile: entry.profile.clone(),
                origin: BrandingOrigin::Cache,
            };
        }

        for source in &self.sources {
            match source.lookup(tenant) {
                Ok(Some(profile)) => {
                    debug!("Branding for {:?} resolved by '{}'", tenant, source.name());
                    self.store(key, &profile);
                    return Resolution {
                        profile,
                        origin: BrandingOrigin::Source(source.name().to_string()),
                    };
                }
                Ok(None) => debug!("Branding source '{}' has no profile for {:?}", source.name(), tenant),
                Err(e) => warn!("Branding source '{}' failed: {}", source.name(), e),
            }
        }

        if let Some(entry) = cached {
            warn!("All branding sources failed for {:?}; reusing expired cache entry", tenant);
            return Resolution {
                profile: entry.profile,
                origin: BrandingOrigin::StaleCache,
            };
        }

        debug!("No branding found for {:?}; using the built-in default", tenant);
        Resolution {
            profile: BrandingProfile::default(),
            origin: BrandingOrigin::Default,
        }
    }

    /// Shorthand for `resolve(tenant).profile`.
    pub fn profile(&self, tenant: Option<&str>) -> BrandingProfile {
        self.resolve(tenant).profile
    }

    pub fn invalidate(&self, tenant: Option<&str>) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(&cache_key(tenant));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    fn store(&self, key: String, profile: &BrandingProfile) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(
                key,
                CacheEntry {
                    profile: profile.clone(),
                    stored_at: Instant::now(),
                },
            );
        }
    }
}

pub struct BrandingResolverBuilder {
    sources: Vec<Arc<dyn BrandingSource>>,
    ttl: Duration,
}

impl Default for BrandingResolverBuilder {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl BrandingResolverBuilder {
    /// Appends a tier; earlier tiers take priority.
    pub fn source(mut self, source: impl BrandingSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn shared_source(mut self, source: Arc<dyn BrandingSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn build(self) -> BrandingResolver {
        BrandingResolver {
            sources: self.sources,
            ttl: self.ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }
}
