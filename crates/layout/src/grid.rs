//! Fixed-column grids (KPI cards) and row packing of side-by-side blocks (charts).

/// Row-major grid of equally sized cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub item_count: usize,
    pub columns: usize,
    pub cell_width: f32,
    pub gap: f32,
}

impl GridLayout {
    pub fn new(item_count: usize, columns: usize, available_width: f32, gap: f32) -> Self {
        let columns = columns.max(1).min(item_count.max(1));
        let cell_width = ((available_width - gap * (columns - 1) as f32) / columns as f32).max(0.0);
        Self {
            item_count,
            columns,
            cell_width,
            gap,
        }
    }

    pub fn rows(&self) -> usize {
        self.item_count.div_ceil(self.columns)
    }

    /// `(column, row)` of item `index`.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// Horizontal offset of a column from the grid's left edge.
    pub fn column_x(&self, column: usize) -> f32 {
        column as f32 * (self.cell_width + self.gap)
    }

    /// Item indices of each row.
    pub fn row_ranges(&self) -> Vec<std::ops::Range<usize>> {
        (0..self.rows())
            .map(|r| r * self.columns..((r + 1) * self.columns).min(self.item_count))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    pub width: f32,
    /// Items that always take a row of their own.
    pub full_row: bool,
}

/// Groups consecutive items into rows of at most two, pairing neighbours only when
/// neither needs a full row and both fit across `available_width`.
pub fn pack_rows(items: &[PackItem], available_width: f32, gap: f32) -> Vec<Vec<usize>> {
    let mut rows = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let current = items[i];
        if let Some(next) = items.get(i + 1)
            && !current.full_row
            && !next.full_row
            && current.width + gap + next.width <= available_width + crate::EPSILON
        {
            rows.push(vec![i, i + 1]);
            i += 2;
            continue;
        }
        rows.push(vec![i]);
        i += 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_positions_row_major() {
        let grid = GridLayout::new(6, 4, 430.0, 10.0);
        assert_eq!(grid.cell_width, 100.0);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.position(5), (1, 1));
        assert_eq!(grid.column_x(2), 220.0);
        assert_eq!(grid.row_ranges(), vec![0..4, 4..6]);
    }

    #[test]
    fn fewer_items_than_columns_widen_cells() {
        let grid = GridLayout::new(2, 4, 210.0, 10.0);
        assert_eq!(grid.columns, 2);
        assert_eq!(grid.cell_width, 100.0);
    }

    #[test]
    fn pairs_narrow_items_and_isolates_full_rows() {
        let bar = PackItem { width: 250.0, full_row: false };
        let pie = PackItem { width: 250.0, full_row: true };
        let wide = PackItem { width: 400.0, full_row: false };
        let rows = pack_rows(&[bar, bar, pie, bar, wide, bar], 520.0, 12.0);
        assert_eq!(rows, vec![vec![0, 1], vec![2], vec![3], vec![4], vec![5]]);
    }
}
