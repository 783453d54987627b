use crate::error::PipelineError;
use folio_format::{FormatConfig, Formatter};
use folio_layout::{LayoutConfig, LayoutConstraints};
use folio_style::{Margins, PageSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

fn default_header_height() -> f32 {
    64.0
}

fn default_footer_height() -> f32 {
    40.0
}

fn default_max_table_rows() -> Option<usize> {
    Some(20)
}

fn default_chart_timeout_ms() -> u64 {
    2000
}

fn default_min_column_width() -> f32 {
    60.0
}

fn default_kpi_font_floor() -> f32 {
    9.0
}

/// Engine settings fixed for a generation run. Every field has a default, so `{}` is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Defaults to A4.
    #[serde(default)]
    pub page_size: PageSize,
    /// Defaults to 36pt on every side.
    #[serde(default)]
    pub margins: Margins,
    /// Band below the top margin holding the logo and company identity on every page.
    #[serde(default = "default_header_height")]
    pub header_height: f32,
    /// Space above the bottom margin kept free for the stamped footer.
    #[serde(default = "default_footer_height")]
    pub footer_height: f32,
    /// Cap on detail table rows per report. `null` removes the cap.
    ///
    /// Defaults to `20`.
    #[serde(default = "default_max_table_rows")]
    pub max_table_rows: Option<usize>,
    /// How long a single chart may take to rasterize before it is replaced by a
    /// fallback block.
    #[serde(default = "default_chart_timeout_ms")]
    pub chart_timeout_ms: u64,
    #[serde(default = "default_min_column_width")]
    pub min_column_width: f32,
    /// Smallest font size KPI values and labels shrink to before being truncated.
    #[serde(default = "default_kpi_font_floor")]
    pub kpi_font_floor: f32,
    #[serde(default)]
    pub format: FormatConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: Margins::default(),
            header_height: default_header_height(),
            footer_height: default_footer_height(),
            max_table_rows: default_max_table_rows(),
            chart_timeout_ms: default_chart_timeout_ms(),
            min_column_width: default_min_column_width(),
            kpi_font_floor: default_kpi_font_floor(),
            format: FormatConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json)
            .map_err(|e| PipelineError::Config(format!("invalid engine configuration: {}", e)))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }

    pub fn constraints(&self) -> Result<LayoutConstraints, PipelineError> {
        Ok(LayoutConstraints::new(
            self.page_size,
            self.margins,
            self.header_height,
            self.footer_height,
        )?)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            min_column_width: self.min_column_width,
            ..LayoutConfig::default()
        }
    }

    pub fn chart_timeout(&self) -> Duration {
        Duration::from_millis(self.chart_timeout_ms)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.format.clone())
    }
}
