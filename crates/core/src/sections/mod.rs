//! Section renderers. Each draws at the composer's cursor and leaves it below what
//! it drew.

pub mod charts;
pub mod kpi;
pub mod table;
pub mod title;

pub use charts::{chart_size, draw_unavailable, render_charts, UNAVAILABLE_TEXT};
pub use kpi::{fit_card, render_kpis, FittedCard};
pub use table::{format_cell, render_table, TableOptions, TableSummary, CONTINUED_TEXT};
pub use title::{render_summary, render_title};
