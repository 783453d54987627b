use chrono::NaiveDate;
use folio_branding::BrandingResolver;
use folio_core::{DocumentEngine, DocumentSpec, GeneratedDocument, PipelineError};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::runtime::Runtime;

/// Generates documents on the calling thread.
///
/// Branding is resolved per document from the document's tenant; chart rasterization runs
/// on the pipeline's own runtime.
pub struct DocumentPipeline {
    engine: DocumentEngine,
    branding: BrandingResolver,
    runtime: Runtime,
}

impl DocumentPipeline {
    pub(super) fn new(engine: DocumentEngine, branding: BrandingResolver, runtime: Runtime) -> Self {
        Self {
            engine,
            branding,
            runtime,
        }
    }

    pub fn engine(&self) -> &DocumentEngine {
        &self.engine
    }

    pub fn branding(&self) -> &BrandingResolver {
        &self.branding
    }

    /// Renders `spec` dated today.
    pub fn generate(&self, spec: &DocumentSpec) -> Result<GeneratedDocument, PipelineError> {
        self.generate_on(spec, chrono::Local::now().date_naive())
    }

    /// Renders `spec` as if generated on `date`, which drives the footer and filename.
    pub fn generate_on(&self, spec: &DocumentSpec, date: NaiveDate) -> Result<GeneratedDocument, PipelineError> {
        let start = Instant::now();
        let resolution = self.branding.resolve(spec.tenant.as_deref());
        info!(
            "Branding '{}' resolved from {:?}",
            resolution.profile.company_name, resolution.origin
        );
        let document = self
            .runtime
            .block_on(self.engine.generate_on(spec, Some(&resolution.profile), date))?;
        info!("Generated {} in {:.2?}", document.filename, start.elapsed());
        Ok(document)
    }

    /// Parses a JSON document spec and renders it dated today.
    pub fn generate_from_json(&self, json: &str) -> Result<GeneratedDocument, PipelineError> {
        self.generate(&DocumentSpec::from_json(json)?)
    }

    /// Renders `spec` and writes it under its generated filename in `dir`.
    pub fn generate_to_dir<P: AsRef<Path>>(&self, spec: &DocumentSpec, dir: P) -> Result<PathBuf, PipelineError> {
        self.generate(spec)?.save_to_dir(dir)
    }

    /// Renders the document spec stored in `path` and writes the PDF into `dir`.
    pub fn generate_file_to_dir<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        path: P,
        dir: Q,
    ) -> Result<PathBuf, PipelineError> {
        let json = fs::read_to_string(path.as_ref())?;
        self.generate_from_json(&json)?.save_to_dir(dir)
    }
}

#[cfg(test)]
mod tests {
    use crate::DocumentPipelineBuilder;
    use folio_branding::StaticSource;
    use folio_core::{BrandingProfile, DocumentSpec};
    use serde_json::json;

    #[test]
    fn tenant_branding_reaches_the_document() {
        let _ = env_logger::builder().is_test(true).try_init();
        let acme = BrandingProfile {
            company_name: "Acme Estates".to_string(),
            ..BrandingProfile::default()
        };
        let resolver = folio_branding::BrandingResolver::builder()
            .source(StaticSource::new("tenants").with_tenant("acme", acme))
            .build();
        let pipeline = DocumentPipelineBuilder::new()
            .with_branding(resolver)
            .build()
            .unwrap();

        let spec = DocumentSpec::from_value(json!({
            "type": "letter",
            "tenant": "acme",
            "content": { "recipient": { "name": "Amina Otieno" }, "body": ["Hello."] }
        }))
        .unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let document = pipeline.generate_on(&spec, date).unwrap();
        assert_eq!(document.filename, "letter_amina-otieno_03-05-2025.pdf");
        assert_eq!(document.page_count, 1);
    }
}
