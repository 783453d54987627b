//! One tier of the branding lookup chain.

use folio_style::BrandingProfile;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrandingError {
    #[error("Branding source '{source_name}' is unavailable: {message}")]
    Unavailable { source_name: String, message: String },

    #[error("Invalid branding profile: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BrandingError {
    fn from(err: std::io::Error) -> Self {
        BrandingError::Io(err.to_string())
    }
}

/// A place a branding profile may come from: a tenant override store, a platform
/// default record, a file on disk.
///
/// `Ok(None)` means the tier has nothing for this tenant; `Err` means the tier could
/// not be consulted. The resolver treats both as "try the next tier".
pub trait BrandingSource: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn lookup(&self, tenant: Option<&str>) -> Result<Option<BrandingProfile>, BrandingError>;
}
