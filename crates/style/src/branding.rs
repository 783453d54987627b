//! The branding profile applied uniformly across a generated document.

use folio_types::Color;
use serde::{Deserialize, Serialize};

/// Pixel box a chart is rasterized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChartDimensions {
    UltraCompact,
    Compact,
    #[default]
    Standard,
    Large,
}

impl ChartDimensions {
    /// `(width, height)` in pixels.
    pub fn pixel_box(&self) -> (u32, u32) {
        match self {
            ChartDimensions::UltraCompact => (400, 200),
            ChartDimensions::Compact => (500, 250),
            ChartDimensions::Standard => (600, 300),
            ChartDimensions::Large => (800, 400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KpiStyle {
    #[default]
    Cards,
    Minimal,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDensity {
    Compact,
    #[default]
    Standard,
    Spacious,
}

impl LayoutDensity {
    /// Multiplier applied to vertical spacing and row heights.
    pub fn spacing_factor(&self) -> f32 {
        match self {
            LayoutDensity::Compact => 0.8,
            LayoutDensity::Standard => 1.0,
            LayoutDensity::Spacious => 1.25,
        }
    }
}

fn default_kpis_per_row() -> usize {
    4
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPreferences {
    #[serde(default)]
    pub chart_dimensions: ChartDimensions,
    #[serde(default)]
    pub kpi_style: KpiStyle,
    #[serde(default)]
    pub layout_density: LayoutDensity,
    #[serde(default = "default_kpis_per_row")]
    pub max_kpis_per_row: usize,
}

impl Default for LayoutPreferences {
    fn default() -> Self {
        Self {
            chart_dimensions: ChartDimensions::default(),
            kpi_style: KpiStyle::default(),
            layout_density: LayoutDensity::default(),
            max_kpis_per_row: default_kpis_per_row(),
        }
    }
}

impl LayoutPreferences {
    /// Column count for the KPI grid, never zero.
    pub fn kpi_columns(&self) -> usize {
        self.max_kpis_per_row.clamp(1, 6)
    }
}

pub const DEFAULT_PRIMARY: Color = Color::rgb(0x1B, 0x36, 0x5D);
pub const DEFAULT_SECONDARY: Color = Color::rgb(0x6C, 0x75, 0x7D);

fn default_primary() -> Color {
    DEFAULT_PRIMARY
}

fn default_secondary() -> Color {
    DEFAULT_SECONDARY
}

/// Resolved once per document and passed by reference to every renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingProfile {
    pub company_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default = "default_primary")]
    pub primary_color: Color,
    #[serde(default = "default_secondary")]
    pub secondary_color: Color,
    #[serde(default)]
    pub footer_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default)]
    pub layout: LayoutPreferences,
}

impl Default for BrandingProfile {
    fn default() -> Self {
        Self {
            company_name: "Folio Property Reports".to_string(),
            tagline: "Property management reporting".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            logo_url: None,
            primary_color: DEFAULT_PRIMARY,
            secondary_color: DEFAULT_SECONDARY,
            footer_text: "Generated by Folio Property Reports".to_string(),
            website_url: None,
            layout: LayoutPreferences::default(),
        }
    }
}

impl BrandingProfile {
    /// The single contact line stamped into every footer, e.g. `phone | email | web`.
    pub fn contact_line(&self) -> String {
        [
            Some(self.phone.as_str()),
            Some(self.email.as_str()),
            self.website_url.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("  |  ")
    }

    pub fn success_color(&self) -> Color {
        Color::rgb(0x2E, 0x7D, 0x32)
    }

    pub fn danger_color(&self) -> Color {
        Color::rgb(0xC6, 0x28, 0x28)
    }

    pub fn muted_color(&self) -> Color {
        Color::rgb(0x75, 0x75, 0x75)
    }

    pub fn text_color(&self) -> Color {
        Color::rgb(0x21, 0x25, 0x29)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_fills_defaults() {
        let profile: BrandingProfile = serde_json::from_str(
            r##"{ "companyName": "Acme Estates", "primaryColor": "#004080", "layout": { "kpiStyle": "minimal" } }"##,
        )
        .unwrap();
        assert_eq!(profile.company_name, "Acme Estates");
        assert_eq!(profile.primary_color, Color::rgb(0, 0x40, 0x80));
        assert_eq!(profile.secondary_color, DEFAULT_SECONDARY);
        assert_eq!(profile.layout.kpi_style, KpiStyle::Minimal);
        assert_eq!(profile.layout.max_kpis_per_row, 4);
        assert_eq!(profile.layout.chart_dimensions, ChartDimensions::Standard);
    }

    #[test]
    fn contact_line_skips_blank_parts() {
        let profile = BrandingProfile {
            phone: "+254 700 000 000".into(),
            email: " ".into(),
            website_url: Some("acme.example".into()),
            ..BrandingProfile::default()
        };
        assert_eq!(profile.contact_line(), "+254 700 000 000  |  acme.example");
    }

    #[test]
    fn chart_dimensions_parse_kebab_case() {
        let d: ChartDimensions = serde_json::from_str("\"ultra-compact\"").unwrap();
        assert_eq!(d.pixel_box(), (400, 200));
    }
}
