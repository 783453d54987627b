//! Fitting a single line of text into a fixed width.
//!
//! Tiers, in order: the text as given at the nominal size, a compact form at the
//! nominal size, a proportionally smaller size no lower than the floor, and finally an
//! ellipsis-truncated prefix at the floor size. The result is a fixed point: fitting
//! an already fitted string yields the same string and size.

use crate::EPSILON;
use folio_style::StandardFont;

pub const ELLIPSIS: char = '\u{2026}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStrategy {
    Full,
    Compact,
    Shrunk,
    Truncated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub text: String,
    pub size: f32,
    pub strategy: FitStrategy,
}

/// Largest half-point size not above `nominal` at which `text` fits in `max_width`.
fn shrink_size(font: StandardFont, text: &str, max_width: f32, nominal: f32) -> f32 {
    let width = font.text_width(text, nominal);
    if width <= 0.0 {
        return nominal;
    }
    let proportional = nominal * max_width / width;
    ((proportional * 2.0).floor() / 2.0).min(nominal)
}

fn fits(font: StandardFont, text: &str, size: f32, max_width: f32) -> bool {
    font.text_width(text, size) <= max_width + EPSILON
}

/// Longest prefix of `text` that fits in `max_width` at `size` once an ellipsis is
/// appended.
fn truncate_to_width(font: StandardFont, text: &str, size: f32, max_width: f32) -> String {
    let chars: Vec<char> = text.chars().collect();
    for len in (0..chars.len()).rev() {
        let prefix: String = chars[..len].iter().collect();
        let candidate = format!("{}{}", prefix.trim_end(), ELLIPSIS);
        if fits(font, &candidate, size, max_width) {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

/// Fits `text` into `max_width`. `compact` supplies the space-saving variant of a
/// string, or `None` when it has none.
pub fn fit_text<F>(
    text: &str,
    font: StandardFont,
    max_width: f32,
    nominal: f32,
    floor: f32,
    compact: F,
) -> FittedText
where
    F: Fn(&str) -> Option<String>,
{
    let floor = floor.min(nominal);
    if fits(font, text, nominal, max_width) {
        return FittedText {
            text: text.to_string(),
            size: nominal,
            strategy: FitStrategy::Full,
        };
    }

    let compacted = compact(text);
    if let Some(short) = &compacted
        && fits(font, short, nominal, max_width)
    {
        return FittedText {
            text: short.clone(),
            size: nominal,
            strategy: FitStrategy::Compact,
        };
    }

    let candidate = compacted.unwrap_or_else(|| text.to_string());
    let size = shrink_size(font, &candidate, max_width, nominal);
    if size >= floor {
        return FittedText {
            text: candidate,
            size,
            strategy: FitStrategy::Shrunk,
        };
    }

    let truncated = truncate_to_width(font, &candidate, floor, max_width);
    let size = shrink_size(font, &truncated, max_width, nominal).max(floor);
    FittedText {
        text: truncated,
        size,
        strategy: FitStrategy::Truncated,
    }
}

/// Number of average-width characters that fit in `width`.
pub fn char_budget(width: f32, font: StandardFont, size: f32) -> usize {
    let avg = font.average_char_width(size);
    if avg <= 0.0 {
        return 0;
    }
    (width / avg).floor().max(0.0) as usize
}

/// Cuts `text` to at most `budget` characters, ending in an ellipsis when cut.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    let count = text.chars().count();
    if count <= budget {
        return text.to_string();
    }
    if budget == 0 {
        return String::new();
    }
    let prefix: String = text.chars().take(budget - 1).collect();
    format!("{}{}", prefix.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: StandardFont = StandardFont::HelveticaBold;

    fn compact_money(text: &str) -> Option<String> {
        (text == "KSh 12,345,678").then(|| "KSh 12.3M".to_string())
    }

    fn no_compact(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn keeps_text_that_fits() {
        let fitted = fit_text("42", FONT, 100.0, 16.0, 9.0, no_compact);
        assert_eq!(fitted.strategy, FitStrategy::Full);
        assert_eq!(fitted.size, 16.0);
    }

    #[test]
    fn prefers_compact_form_over_truncation() {
        // Roughly eight digits wide at 16pt.
        let width = FONT.text_width("00000000", 16.0);
        let fitted = fit_text("KSh 12,345,678", FONT, width, 16.0, 9.0, compact_money);
        assert_eq!(fitted.text, "KSh 12.3M");
        assert_ne!(fitted.strategy, FitStrategy::Truncated);
        assert!(fitted.size >= 9.0);
    }

    #[test]
    fn shrinks_before_truncating() {
        let text = "Collection Rate";
        let width = FONT.text_width(text, 12.0);
        let fitted = fit_text(text, FONT, width, 16.0, 9.0, no_compact);
        assert_eq!(fitted.strategy, FitStrategy::Shrunk);
        assert_eq!(fitted.text, text);
        assert!(fitted.size <= 12.0 && fitted.size >= 11.5);
    }

    #[test]
    fn truncates_as_last_resort() {
        let text = "Outstanding Maintenance Requests";
        let fitted = fit_text(text, FONT, 60.0, 16.0, 9.0, no_compact);
        assert_eq!(fitted.strategy, FitStrategy::Truncated);
        assert!(fitted.text.ends_with(ELLIPSIS));
        assert!(FONT.text_width(&fitted.text, fitted.size) <= 60.0 + EPSILON);
        assert!(fitted.size >= 9.0);
    }

    #[test]
    fn fitting_is_idempotent() {
        let cases = [
            ("KSh 12,345,678", 70.0),
            ("KSh 12,345,678", 40.0),
            ("Outstanding Maintenance Requests", 60.0),
            ("Collection Rate", 90.0),
            ("Collection Rate", 300.0),
        ];
        for (text, width) in cases {
            let once = fit_text(text, FONT, width, 16.0, 9.0, compact_money);
            let twice = fit_text(&once.text, FONT, width, 16.0, 9.0, compact_money);
            assert_eq!((once.text.as_str(), once.size), (twice.text.as_str(), twice.size), "{}", text);
        }
    }

    #[test]
    fn character_budget_truncation() {
        assert_eq!(truncate_chars("Sunrise Apartments", 10), "Sunrise A\u{2026}");
        assert_eq!(truncate_chars("Unit 4B", 10), "Unit 4B");
        assert_eq!(char_budget(53.0, StandardFont::Helvetica, 10.0), 10);
    }
}
