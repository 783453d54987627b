#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Narrowest a table column may be before columns start competing for width.
    ///
    /// Defaults to `60.0` points.
    pub min_column_width: f32,
    /// Share of a paginatable block that must fit for it to start on the current page.
    ///
    /// Defaults to `0.3`.
    pub partial_fit_ratio: f32,
    /// How many top-ranked columns receive the width left over after every column got
    /// its base share.
    ///
    /// Defaults to `3`.
    pub favored_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_column_width: 60.0,
            partial_fit_ratio: 0.3,
            favored_columns: 3,
        }
    }
}
