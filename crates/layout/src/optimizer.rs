//! Advisory page-break and column-width decisions.

use crate::{EPSILON, LayoutConfig, LayoutConstraints};
use log::debug;

#[derive(Debug, Clone, Copy)]
pub struct LayoutOptimizer {
    constraints: LayoutConstraints,
    config: LayoutConfig,
}

impl LayoutOptimizer {
    pub fn new(constraints: LayoutConstraints, config: LayoutConfig) -> Self {
        Self {
            constraints,
            config,
        }
    }

    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Vertical space left between `cursor_y` and the footer reservation.
    pub fn available_height(&self, cursor_y: f32) -> f32 {
        (self.constraints.usable_bottom() - cursor_y).max(0.0)
    }

    /// Whether a block of `required_height` fits below `cursor_y`.
    ///
    /// Paginatable content (`allow_partial`) only needs the configured share of its
    /// height to fit, since it continues on the next page by itself.
    pub fn will_fit(&self, cursor_y: f32, required_height: f32, allow_partial: bool) -> bool {
        let available = self.available_height(cursor_y);
        let needed = if allow_partial {
            required_height * self.config.partial_fit_ratio
        } else {
            required_height
        };
        needed <= available + EPSILON
    }

    /// Whether the engine should start a new page before placing the block.
    ///
    /// A block that does not fit on an empty page never triggers a break; breaking
    /// again would not help.
    pub fn should_break(&self, cursor_y: f32, required_height: f32, allow_partial: bool) -> bool {
        let at_top = cursor_y <= self.constraints.content_top() + EPSILON;
        let should = !at_top && !self.will_fit(cursor_y, required_height, allow_partial);
        if should {
            debug!(
                "Page break: {:.1}pt required, {:.1}pt available",
                required_height,
                self.available_height(cursor_y)
            );
        }
        should
    }

    /// Splits `available_width` across columns.
    ///
    /// When every column can have at least the minimum width they share the width
    /// equally. Otherwise each column gets a reduced base width and the remainder goes
    /// to the highest-priority columns.
    pub fn column_widths<S: AsRef<str>>(&self, headers: &[S], available_width: f32) -> Vec<f32> {
        let count = headers.len();
        if count == 0 || available_width <= 0.0 {
            return vec![0.0; count];
        }
        let min_width = self.config.min_column_width.max(1.0);
        let capacity = (available_width / min_width).floor() as usize;
        if count <= capacity {
            return vec![available_width / count as f32; count];
        }

        let base = min_width.min(0.8 * available_width / count as f32);
        let mut widths = vec![base; count];
        let extra = available_width - base * count as f32;

        let mut ranked: Vec<(usize, u8)> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (i, column_priority(h.as_ref())))
            .collect();
        // Stable sort keeps header order among equal priorities.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let favored: Vec<usize> = ranked
            .iter()
            .take(self.config.favored_columns.clamp(1, count))
            .map(|(i, _)| *i)
            .collect();
        let share = extra / favored.len() as f32;
        for i in &favored {
            widths[*i] += share;
        }
        debug!(
            "Column widths: {} columns over {:.1}pt, favoring {:?}",
            count, available_width, favored
        );
        widths
    }

    /// Whether to break before a run of small sections so that at least two of them
    /// stay together. Returns `false` when all of them fit or there is only one.
    pub fn orphan_guard(&self, cursor_y: f32, section_heights: &[f32]) -> bool {
        if section_heights.len() < 2 || cursor_y <= self.constraints.content_top() + EPSILON {
            return false;
        }
        let available = self.available_height(cursor_y);
        let mut used = 0.0;
        let mut kept = 0;
        for height in section_heights {
            if used + height > available + EPSILON {
                break;
            }
            used += height;
            kept += 1;
        }
        let orphaned = kept < 2 && kept < section_heights.len();
        if orphaned {
            debug!(
                "Orphan guard: only {} of {} sections fit in {:.1}pt",
                kept,
                section_heights.len(),
                available
            );
        }
        orphaned
    }
}

fn header_words(header: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in header.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

const IDENTIFIER_WORDS: [&str; 7] = ["id", "ref", "reference", "no", "number", "code", "uuid"];
const TIMESTAMP_WORDS: [&str; 5] = ["timestamp", "created", "updated", "time", "at"];
const NAME_WORDS: [&str; 7] = ["name", "tenant", "property", "owner", "landlord", "vendor", "unit"];
const VALUE_WORDS: [&str; 14] = [
    "amount", "rent", "balance", "paid", "due", "total", "cost", "expense", "revenue", "income",
    "arrears", "date", "status", "rate",
];

/// Ranks a column header for width allocation: names (4) over amounts, dates and
/// statuses (3) over descriptive text (2) over identifiers and timestamps (1).
pub fn column_priority(header: &str) -> u8 {
    let words = header_words(header);
    let last = words.last().map(String::as_str).unwrap_or_default();
    let has = |set: &[&str]| words.iter().any(|w| set.contains(&w.as_str()));

    if IDENTIFIER_WORDS.contains(&last) || has(&TIMESTAMP_WORDS) {
        1
    } else if has(&NAME_WORDS) {
        4
    } else if has(&VALUE_WORDS) {
        3
    } else {
        2
    }
}
