use super::orchestrator::DocumentPipeline;
use folio_branding::{BrandingResolver, JsonFileSource, TenantDirectorySource};
use folio_chart::SkiaRasterizer;
use folio_core::{DocumentEngine, EngineConfig, PipelineError, ReportCatalog, ReportConfig};
use folio_resource::AssetDirectory;
use folio_traits::{ChartRasterizer, ResourceProvider};
use log::info;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Builder;

/// A builder for creating a `DocumentPipeline`.
///
/// Every part has a default: A4 engine settings, the built-in branding profile, the
/// software chart rasterizer and the built-in report catalog. Without a resource
/// provider, logos are skipped.
pub struct DocumentPipelineBuilder {
    config: EngineConfig,
    branding: Option<BrandingResolver>,
    resources: Option<Arc<dyn ResourceProvider>>,
    rasterizer: Option<Arc<dyn ChartRasterizer>>,
    catalog: ReportCatalog,
    worker_threads: Option<usize>,
}

impl Default for DocumentPipelineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            branding: None,
            resources: None,
            rasterizer: None,
            catalog: ReportCatalog::builtin(),
            worker_threads: None,
        }
    }
}

impl DocumentPipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads engine settings from a JSON file. Absent fields keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = EngineConfig::from_json_file(path)?;
        Ok(self)
    }

    pub fn with_branding(mut self, resolver: BrandingResolver) -> Self {
        self.branding = Some(resolver);
        self
    }

    /// Branding from a single profile file, with optional per-tenant overrides stored
    /// as `<tenant_dir>/<tenant>.json` taking priority over it.
    pub fn with_branding_files<P: AsRef<Path>>(self, profile: P, tenant_dir: Option<P>) -> Self {
        let mut builder = BrandingResolver::builder();
        if let Some(dir) = tenant_dir {
            builder = builder.source(TenantDirectorySource::new(dir.as_ref()));
        }
        let resolver = builder.source(JsonFileSource::new(profile.as_ref())).build();
        self.with_branding(resolver)
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Resolves logo references against files under `root`.
    pub fn with_asset_dir<P: AsRef<Path>>(self, root: P) -> Self {
        self.with_resources(Arc::new(AssetDirectory::new(root)))
    }

    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn ChartRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn with_catalog(mut self, catalog: ReportCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Adds one report configuration on top of the current catalog.
    pub fn register_report(mut self, config: ReportConfig) -> Self {
        self.catalog.register(config);
        self
    }

    /// Threads available to chart rasterization. Defaults to the tokio default.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads.max(1));
        self
    }

    /// Consumes the builder and creates the `DocumentPipeline`.
    pub fn build(self) -> Result<DocumentPipeline, PipelineError> {
        let rasterizer = self
            .rasterizer
            .unwrap_or_else(|| Arc::new(SkiaRasterizer));
        info!("Chart rasterizer: {}", rasterizer.name());

        let mut engine = DocumentEngine::new(self.config, rasterizer)?.with_catalog(self.catalog);
        if let Some(resources) = self.resources {
            info!("Resources from: {}", resources.name());
            engine = engine.with_resources(resources);
        }

        let branding = self.branding.unwrap_or_default();
        info!("Branding sources: {:?}", branding.source_names());

        let mut runtime = Builder::new_multi_thread();
        runtime.enable_all();
        if let Some(threads) = self.worker_threads {
            runtime.worker_threads(threads);
        }
        let runtime = runtime.build()?;

        Ok(DocumentPipeline::new(engine, branding, runtime))
    }
}
