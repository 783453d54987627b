pub mod color;
pub mod geometry;
pub mod ids;
pub mod report;

pub use color::Color;
pub use geometry::{Rect, Size};
pub use ids::{ChartId, ReportId};
pub use report::{
    humanize_key, value_as_f64, value_as_text, Align, ChartOptions, ChartSpec, ChartType,
    ColumnFormat, Dataset, KpiItem, KpiValue, ReportData, TableColumn, TableData, TableRow, Trend,
};
