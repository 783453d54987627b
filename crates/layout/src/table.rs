//! Row pagination for long tables.
//!
//! The plan is computed up front from row and band heights alone, so the same
//! inputs always produce the same split. Rows are never divided between pages.

use crate::{EPSILON, LayoutError};
use log::debug;
use std::ops::Range;

/// Rows a table wants on its first page before it is worth starting there.
pub const MIN_START_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableMetrics {
    pub header_height: f32,
    pub row_height: f32,
    /// Marker line opening every page after the first.
    pub marker_height: f32,
    /// Notice line closing every page that does not finish the table.
    pub notice_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    pub rows: Range<usize>,
    /// A page break precedes this slice.
    pub break_before: bool,
    /// This slice continues a table started on an earlier page.
    pub continued: bool,
    /// Rows still to come after this slice.
    pub remaining: usize,
}

impl TablePage {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Vertical space the slice occupies, bands included.
    pub fn height(&self, metrics: &TableMetrics) -> f32 {
        let mut height = metrics.header_height + self.row_count() as f32 * metrics.row_height;
        if self.continued {
            height += metrics.marker_height;
        }
        if self.remaining > 0 {
            height += metrics.notice_height;
        }
        height
    }
}

/// Rows that fit in `available`, reserving the notice when not all `remaining` rows do.
fn rows_that_fit(available: f32, continued: bool, remaining: usize, m: &TableMetrics) -> usize {
    let fixed = m.header_height + if continued { m.marker_height } else { 0.0 };
    let row_slots = |space: f32| ((space + EPSILON) / m.row_height).floor().max(0.0) as usize;
    let all = row_slots(available - fixed);
    if all >= remaining {
        remaining
    } else {
        row_slots(available - fixed - m.notice_height).min(remaining)
    }
}

/// Splits `row_count` rows into page slices.
///
/// `first_available` is the space left on the current page, `page_available` the
/// body height of a fresh page.
pub fn plan_table(
    row_count: usize,
    first_available: f32,
    page_available: f32,
    metrics: &TableMetrics,
) -> Result<Vec<TablePage>, LayoutError> {
    if row_count == 0 {
        return Ok(Vec::new());
    }
    if metrics.row_height <= 0.0 {
        return Err(LayoutError::InvalidConstraints(
            "table rows must have a positive height".to_string(),
        ));
    }
    let worst_case = metrics.header_height
        + metrics.marker_height
        + metrics.notice_height
        + metrics.row_height;
    if rows_that_fit(page_available, true, row_count, metrics) == 0 {
        return Err(LayoutError::ElementTooLarge(worst_case, page_available));
    }

    let start_rows = MIN_START_ROWS.min(row_count);
    let cramped =
        first_available + EPSILON < metrics.header_height + start_rows as f32 * metrics.row_height;
    let (mut available, mut break_before) = if cramped {
        debug!(
            "Table needs {} rows to start but only {:.1}pt remain; breaking first",
            start_rows, first_available
        );
        (page_available, true)
    } else {
        (first_available, false)
    };

    let mut pages = Vec::new();
    let mut start = 0;
    while start < row_count {
        let remaining = row_count - start;
        let continued = !pages.is_empty();
        let take = rows_that_fit(available, continued, remaining, metrics);
        if take == 0 {
            // Only possible on the first, partially used page.
            available = page_available;
            break_before = true;
            continue;
        }
        pages.push(TablePage {
            rows: start..start + take,
            break_before,
            continued,
            remaining: remaining - take,
        });
        start += take;
        available = page_available;
        break_before = true;
    }
    debug!("Table of {} rows planned over {} pages", row_count, pages.len());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: TableMetrics = TableMetrics {
        header_height: 20.0,
        row_height: 18.0,
        marker_height: 14.0,
        notice_height: 14.0,
    };

    #[test]
    fn thirty_seven_rows_at_twenty_per_page() {
        let plan = plan_table(37, 400.0, 400.0, &METRICS).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].rows, 0..20);
        assert_eq!(plan[0].remaining, 17);
        assert!(!plan[0].continued && !plan[0].break_before);
        assert_eq!(plan[1].rows, 20..37);
        assert!(plan[1].continued && plan[1].break_before);
        assert_eq!(plan[1].remaining, 0);
    }

    #[test]
    fn cramped_start_moves_table_to_next_page() {
        let plan = plan_table(10, 60.0, 400.0, &METRICS).unwrap();
        assert!(plan[0].break_before);
        assert!(!plan[0].continued);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn short_table_starts_in_small_space() {
        let plan = plan_table(2, 60.0, 400.0, &METRICS).unwrap();
        assert_eq!(plan.len(), 1);
        assert!(!plan[0].break_before);
    }

    #[test]
    fn empty_table_has_no_pages() {
        assert!(plan_table(0, 100.0, 400.0, &METRICS).unwrap().is_empty());
    }

    #[test]
    fn row_taller_than_a_page_is_an_error() {
        let result = plan_table(5, 40.0, 50.0, &METRICS);
        assert!(matches!(result, Err(LayoutError::ElementTooLarge(_, _))));
    }

    #[test]
    fn rows_are_conserved_and_slices_fit() {
        for first in [40.0_f32, 75.0, 130.0, 333.0, 700.0] {
            for page in [120.0_f32, 250.0, 400.0, 701.0] {
                for count in [1_usize, 3, 19, 20, 21, 57, 200] {
                    let plan = plan_table(count, first, page, &METRICS).unwrap();
                    let total: usize = plan.iter().map(TablePage::row_count).sum();
                    assert_eq!(total, count);
                    let mut expected_start = 0;
                    for (i, slice) in plan.iter().enumerate() {
                        assert_eq!(slice.rows.start, expected_start);
                        expected_start = slice.rows.end;
                        assert!(slice.row_count() > 0);
                        let space = if slice.break_before { page } else { first };
                        assert!(slice.height(&METRICS) <= space + EPSILON);
                        assert_eq!(slice.continued, i > 0);
                    }
                    assert_eq!(plan, plan_table(count, first, page, &METRICS).unwrap());
                }
            }
        }
    }
}
