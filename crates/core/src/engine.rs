//! `generate`: one document request in, one finished PDF out.
//!
//! Fatal errors (unknown type, unregistered report, impossible geometry) return
//! before anything is drawn. Everything recoverable (a chart, a cell, the logo) is
//! logged and replaced with a visible fallback.

use crate::catalog::ReportCatalog;
use crate::compose::Composer;
use crate::config::EngineConfig;
use crate::document::{DocumentBody, DocumentSpec};
use crate::documents::{compose_invoice, compose_letter, compose_report, ResolvedReport};
use crate::error::PipelineError;
use crate::filename::document_filename;
use chrono::{Local, NaiveDate};
use folio_chart::{ChartPipeline, ChartRasterizer};
use folio_format::Formatter;
use folio_layout::LayoutOptimizer;
use folio_render_lopdf::DocumentInfo;
use folio_style::BrandingProfile;
use folio_traits::ResourceProvider;
use image::{Rgb, RgbImage};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A finished document and the name it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub page_count: usize,
}

impl GeneratedDocument {
    /// Writes the document into `dir` under its generated filename.
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, PipelineError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        info!("Wrote {} ({} pages, {} bytes)", path.display(), self.page_count, self.bytes.len());
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct DocumentEngine {
    config: EngineConfig,
    optimizer: LayoutOptimizer,
    formatter: Formatter,
    charts: ChartPipeline,
    catalog: ReportCatalog,
    resources: Option<Arc<dyn ResourceProvider>>,
}

impl DocumentEngine {
    /// Fails only when the configured page geometry leaves no room for content.
    pub fn new(config: EngineConfig, rasterizer: Arc<dyn ChartRasterizer>) -> Result<Self, PipelineError> {
        let optimizer = LayoutOptimizer::new(config.constraints()?, config.layout_config());
        let formatter = config.formatter();
        let charts = ChartPipeline::new(rasterizer, formatter.clone(), config.chart_timeout());
        Ok(Self {
            config,
            optimizer,
            formatter,
            charts,
            catalog: ReportCatalog::builtin(),
            resources: None,
        })
    }

    pub fn with_catalog(mut self, catalog: ReportCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Where `logoUrl` references are loaded from. Without one, documents carry no logo.
    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    /// Generates `spec` dated today. `None` applies the built-in default branding.
    pub async fn generate(
        &self,
        spec: &DocumentSpec,
        profile: Option<&BrandingProfile>,
    ) -> Result<GeneratedDocument, PipelineError> {
        self.generate_on(spec, profile, Local::now().date_naive()).await
    }

    pub async fn generate_on(
        &self,
        spec: &DocumentSpec,
        profile: Option<&BrandingProfile>,
        today: NaiveDate,
    ) -> Result<GeneratedDocument, PipelineError> {
        let fallback;
        let profile = match profile {
            Some(profile) => profile,
            None => {
                fallback = BrandingProfile::default();
                &fallback
            }
        };
        let generated = self.formatter.format_naive_date(today);

        // Resolve everything that can fail fatally before drawing.
        let report = match &spec.body {
            DocumentBody::Report(content) => Some(ResolvedReport::resolve(content, &self.catalog)?),
            _ => None,
        };
        let outcomes = match &report {
            Some(report) => self.charts.render_all(report.visible_charts(), profile).await,
            None => Vec::new(),
        };

        let (title, owner) = match (&spec.body, &report) {
            (_, Some(report)) => (report.title.clone(), report.owner.clone()),
            (DocumentBody::Invoice(invoice), _) => (
                format!("Invoice {}", invoice.number),
                Some(invoice.bill_to.name.clone()),
            ),
            (DocumentBody::Letter(letter), _) => (
                letter.subject.clone().unwrap_or_else(|| "Letter".to_string()),
                Some(letter.recipient.name.clone()),
            ),
            (DocumentBody::Report(_), None) => ("Report".to_string(), None),
        };
        info!("Generating {} '{}' for {}", spec.kind(), title, profile.company_name);

        let logo = self.load_logo(profile);
        let info = DocumentInfo {
            title: title.clone(),
            author: profile.company_name.clone(),
            subject: spec.kind().to_string(),
            creation_date: Some(format!("D:{}000000", today.format("%Y%m%d"))),
        };
        let mut composer = Composer::new(
            self.optimizer,
            profile,
            &self.formatter,
            info,
            logo.as_ref(),
            self.config.kpi_font_floor,
        );

        match (&spec.body, &report) {
            (_, Some(report)) => {
                let table = compose_report(&mut composer, report, &outcomes, self.config.max_table_rows)?;
                if table.rows_rendered < table.rows_total {
                    info!(
                        "Detail table capped at {} of {} rows",
                        table.rows_rendered, table.rows_total
                    );
                }
            }
            (DocumentBody::Invoice(invoice), _) => compose_invoice(&mut composer, invoice)?,
            (DocumentBody::Letter(letter), _) => compose_letter(&mut composer, letter, &generated)?,
            (DocumentBody::Report(_), None) => {}
        }

        let (bytes, page_count) = composer.finish(&generated)?;
        let filename = document_filename(&title, owner.as_deref(), today);
        info!("Generated '{}': {} pages", filename, page_count);
        Ok(GeneratedDocument {
            bytes,
            filename,
            page_count,
        })
    }

    /// The profile's logo as an opaque RGB raster, or `None` with a warning.
    fn load_logo(&self, profile: &BrandingProfile) -> Option<RgbImage> {
        let reference = profile.logo_url.as_deref()?.trim();
        if reference.is_empty() {
            return None;
        }
        let Some(resources) = &self.resources else {
            warn!("Logo '{}' ignored: no resource provider configured", reference);
            return None;
        };
        let bytes = match resources.load(reference) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Logo unavailable from {}: {}", resources.name(), e);
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(decoded) => Some(flatten_on_white(&decoded.to_rgba8())),
            Err(e) => {
                warn!("Logo '{}' could not be decoded: {}", reference, e);
                None
            }
        }
    }
}

/// Composites an RGBA image over white; the PDF image stream carries no alpha.
fn flatten_on_white(rgba: &image::RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
