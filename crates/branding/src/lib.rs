//! Resolves the branding profile for a document.
//!
//! Tiers are consulted in priority order (tenant override, platform default, ...);
//! the first one that yields a profile wins. Results are cached for a short time.
//! When every tier fails, a previously cached profile is reused even if it has
//! expired, and only then does resolution fall back to `BrandingProfile::default()`.
//! Resolution never fails.

mod resolver;
mod sources;

pub use folio_traits::{BrandingError, BrandingSource};
pub use resolver::{BrandingOrigin, BrandingResolver, BrandingResolverBuilder, Resolution};
pub use sources::{JsonFileSource, StaticSource, TenantDirectorySource};
