//! Point sizes and colors derived from a branding profile.

use folio_layout::TableMetrics;
use folio_style::{BrandingProfile, KpiStyle};
use folio_types::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub danger: Color,
    pub rule: Color,
    pub zebra: Color,
    pub card_fill: Color,

    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub table_size: f32,
    pub line_height: f32,

    pub section_gap: f32,
    pub block_gap: f32,

    pub kpi_style: KpiStyle,
    pub kpi_card_height: f32,
    pub kpi_gap: f32,
    pub kpi_value_size: f32,
    pub kpi_label_size: f32,

    pub table: TableMetrics,
    pub cell_padding: f32,
}

impl Theme {
    pub fn from_profile(profile: &BrandingProfile) -> Self {
        let f = profile.layout.layout_density.spacing_factor();
        let kpi_style = profile.layout.kpi_style;
        let kpi_card_height = match kpi_style {
            KpiStyle::Minimal => 40.0,
            KpiStyle::Cards => 54.0,
            KpiStyle::Detailed => 66.0,
        } * f;

        Self {
            primary: profile.primary_color,
            secondary: profile.secondary_color,
            text: profile.text_color(),
            muted: profile.muted_color(),
            success: profile.success_color(),
            danger: profile.danger_color(),
            rule: Color::gray(0xDD),
            zebra: profile.primary_color.tint(0.94),
            card_fill: Color::gray(0xF7),

            title_size: 18.0,
            heading_size: 12.0,
            body_size: 10.0,
            small_size: 8.0,
            table_size: 8.5,
            line_height: 1.4,

            section_gap: 18.0 * f,
            block_gap: 8.0 * f,

            kpi_style,
            kpi_card_height,
            kpi_gap: 10.0 * f,
            kpi_value_size: 15.0,
            kpi_label_size: 8.5,

            table: TableMetrics {
                header_height: 20.0 * f,
                row_height: 17.0 * f,
                marker_height: 14.0,
                notice_height: 16.0,
            },
            cell_padding: 4.0,
        }
    }

    /// Height of one line of text set at `size`.
    pub fn line(&self, size: f32) -> f32 {
        size * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_style::LayoutDensity;

    #[test]
    fn density_scales_spacing() {
        let mut profile = BrandingProfile::default();
        let standard = Theme::from_profile(&profile);
        profile.layout.layout_density = LayoutDensity::Spacious;
        let spacious = Theme::from_profile(&profile);
        assert!(spacious.section_gap > standard.section_gap);
        assert!(spacious.table.row_height > standard.table.row_height);
        assert_eq!(spacious.title_size, standard.title_size);
    }

    #[test]
    fn card_height_follows_kpi_style() {
        let mut profile = BrandingProfile::default();
        profile.layout.kpi_style = KpiStyle::Minimal;
        let minimal = Theme::from_profile(&profile).kpi_card_height;
        profile.layout.kpi_style = KpiStyle::Detailed;
        assert!(Theme::from_profile(&profile).kpi_card_height > minimal);
    }
}
