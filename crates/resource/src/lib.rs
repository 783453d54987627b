//! Asset providers for logos and other files a branding profile points at.

mod directory;

pub use directory::AssetDirectory;
pub use folio_traits::InMemoryResourceProvider;
