use folio_format::{is_currency_label, Formatter};
use folio_style::BrandingProfile;
use folio_types::{ChartSpec, Color};

/// Series colors used after the brand's primary and secondary colors.
pub const ACCENT_COLORS: [Color; 6] = [
    Color::rgb(0x2E, 0x86, 0xAB),
    Color::rgb(0xF2, 0x9E, 0x4C),
    Color::rgb(0x3C, 0xA5, 0x5C),
    Color::rgb(0xC7, 0x3E, 0x3A),
    Color::rgb(0x8E, 0x6C, 0xB8),
    Color::rgb(0x17, 0xA2, 0xB8),
];

/// Palette for one chart: the chart's own colors when it names any, else the brand
/// colors followed by the accents.
pub fn brand_palette(spec: &ChartSpec, profile: &BrandingProfile) -> Vec<Color> {
    if !spec.options.colors.is_empty() {
        return spec.options.colors.clone();
    }
    let brand = [profile.primary_color, profile.secondary_color];
    brand
        .into_iter()
        .chain(ACCENT_COLORS.into_iter().filter(|c| !brand.contains(c)))
        .collect()
}

/// Whether axis values should carry the currency symbol.
pub fn is_currency_chart(spec: &ChartSpec) -> bool {
    if let Some(forced) = spec.options.currency {
        return forced;
    }
    spec.datasets()
        .iter()
        .any(|d| is_currency_label(&d.label) || is_currency_label(&d.key))
}

/// Axis or legend text for `value`; large values are compacted.
pub fn format_axis_value(formatter: &Formatter, value: f64, currency: bool, step: f64) -> String {
    let large = value.abs() >= 1000.0;
    match (currency, large) {
        (true, true) => formatter.format_compact_currency(value),
        (true, false) => formatter.format_currency(value),
        (false, true) => formatter.format_compact(value),
        (false, false) => {
            let decimals = if step.fract().abs() > f64::EPSILON { 1 } else { 0 };
            formatter.format_number(value, decimals)
        }
    }
}
