//! The standard 14 Type1 faces the renderer relies on, with their advance widths.
//!
//! Widths are the Adobe AFM values in 1/1000 em for the printable ASCII range plus the
//! handful of WinAnsi punctuation characters the layout emits (ellipsis, bullet, dashes).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl StandardFont {
    pub fn postscript_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Resource name used inside content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
        }
    }

    pub fn all() -> [StandardFont; 3] {
        [
            StandardFont::Helvetica,
            StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique,
        ]
    }

    /// Advance width of a single character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> u16 {
        let table = match self {
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            // The oblique face shares the regular metrics.
            _ => &HELVETICA_WIDTHS,
        };
        match ch {
            ' '..='~' => table[ch as usize - 32],
            '\u{2026}' => 1000,
            '\u{2022}' => 350,
            '\u{2013}' => 556,
            '\u{2014}' => 1000,
            '\u{00A0}' => 278,
            _ => 556,
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }

    /// Average width of a digit/lowercase glyph, used for character budgets.
    pub fn average_char_width(&self, size: f32) -> f32 {
        0.52 * size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_share_a_width() {
        let f = StandardFont::Helvetica;
        assert_eq!(f.text_width("0", 10.0), f.text_width("9", 10.0));
        assert!((f.text_width("1000", 10.0) - 22.24).abs() < 0.01);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let text = "Rent Collection";
        assert!(
            StandardFont::HelveticaBold.text_width(text, 12.0)
                > StandardFont::Helvetica.text_width(text, 12.0)
        );
    }
}
