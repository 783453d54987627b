//! Greedy line splitting for paragraphs set in a single standard font.

use crate::EPSILON;
use folio_style::StandardFont;

/// Splits `text` into lines no wider than `max_width`. Explicit newlines are kept;
/// a word wider than a whole line is broken between characters.
pub fn split_lines(text: &str, font: StandardFont, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if font.text_width(&candidate, size) <= max_width + EPSILON {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if font.text_width(word, size) <= max_width + EPSILON {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, font, size, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, font: StandardFont, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if font.text_width(&piece, size) > max_width + EPSILON && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    pieces.push(piece);
    pieces
}
