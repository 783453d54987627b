//! Async wrapper that isolates each chart.
//!
//! Rasterization runs on the blocking pool; awaiting its join handle is the signal
//! that drawing has settled. The wait is bounded. Charts are rendered one after
//! another and images come back in spec order. A single drawing permit is held for as
//! long as the rasterizer actually runs, so a chart that timed out still blocks the
//! next one from starting: at most one drawing surface is alive at a time.

use crate::palette::brand_palette;
use crate::placeholder::no_data_raster;
use folio_format::Formatter;
use folio_style::{BrandingProfile, ChartDimensions};
use folio_traits::{ChartError, ChartRasterizer, RasterChart, RasterKind, RasterRequest};
use folio_types::ChartSpec;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_millis(2000);

/// What the document gets for one chart. Only `Rendered` and `NoData` carry pixels;
/// `Unavailable` is drawn as a vector fallback block.
#[derive(Debug, Clone)]
pub enum ChartOutcome {
    Rendered(RasterChart),
    NoData(RasterChart),
    Unavailable { reason: String },
}

impl ChartOutcome {
    pub fn raster(&self) -> Option<&RasterChart> {
        match self {
            ChartOutcome::Rendered(r) | ChartOutcome::NoData(r) => Some(r),
            ChartOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, ChartOutcome::Rendered(_))
    }
}

#[derive(Debug, Clone)]
pub struct ChartPipeline {
    rasterizer: Arc<dyn ChartRasterizer>,
    formatter: Formatter,
    settle_timeout: Duration,
    drawing: Arc<Semaphore>,
}

impl ChartPipeline {
    pub fn new(
        rasterizer: Arc<dyn ChartRasterizer>,
        formatter: Formatter,
        settle_timeout: Duration,
    ) -> Self {
        Self {
            rasterizer,
            formatter,
            settle_timeout,
            drawing: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn request_for(
        &self,
        spec: &ChartSpec,
        profile: &BrandingProfile,
        dimensions: ChartDimensions,
    ) -> RasterRequest {
        let (width, height) = dimensions.pixel_box();
        RasterRequest::new(width, height, brand_palette(spec, profile), self.formatter.clone())
    }

    /// Renders `spec` at the profile's configured density.
    pub async fn render(&self, spec: &ChartSpec, profile: &BrandingProfile) -> ChartOutcome {
        self.render_sized(spec, profile, profile.layout.chart_dimensions)
            .await
    }

    pub async fn render_sized(
        &self,
        spec: &ChartSpec,
        profile: &BrandingProfile,
        dimensions: ChartDimensions,
    ) -> ChartOutcome {
        let request = self.request_for(spec, profile, dimensions);
        if spec.has_no_data() {
            debug!("Chart '{}' has no data; using placeholder", spec.id);
            return match no_data_raster(request.width, request.height) {
                Ok(raster) => ChartOutcome::NoData(raster),
                Err(e) => unavailable(spec, e),
            };
        }

        let rasterizer = Arc::clone(&self.rasterizer);
        let drawing = Arc::clone(&self.drawing);
        let owned = spec.clone();
        let task = async move {
            let permit = drawing
                .acquire_owned()
                .await
                .map_err(|e| ChartError::Worker(e.to_string()))?;
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                rasterizer.render(&owned, &request)
            })
            .await
            .map_err(|join_error| ChartError::Worker(join_error.to_string()))
        };
        match tokio::time::timeout(self.settle_timeout, task).await {
            Ok(Ok(Ok(raster))) => match raster.kind {
                RasterKind::Chart => ChartOutcome::Rendered(raster),
                RasterKind::NoData => ChartOutcome::NoData(raster),
            },
            Ok(Ok(Err(e))) | Ok(Err(e)) => unavailable(spec, e),
            Err(_) => unavailable(
                spec,
                ChartError::Timeout(spec.id.to_string(), self.settle_timeout.as_millis() as u64),
            ),
        }
    }

    /// Renders every spec in order.
    pub async fn render_all(
        &self,
        specs: &[ChartSpec],
        profile: &BrandingProfile,
    ) -> Vec<ChartOutcome> {
        let mut outcomes = Vec::with_capacity(specs.len());
        for spec in specs {
            outcomes.push(self.render(spec, profile).await);
        }
        outcomes
    }
}

fn unavailable(spec: &ChartSpec, error: ChartError) -> ChartOutcome {
    warn!("Chart '{}' unavailable: {}", spec.id, error);
    ChartOutcome::Unavailable {
        reason: error.to_string(),
    }
}
