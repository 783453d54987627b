//! Page-geometry calculations for document composition.
//!
//! Everything here is pure: functions take the current cursor and the fixed page
//! constraints and return a decision or a new value. Nothing mutates shared state,
//! and the composition engine is free to ignore the advice.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Element has a height of {0:.2} which exceeds the usable page height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid page constraints: {0}")]
    InvalidConstraints(String),
}

pub mod config;
pub mod constraints;
pub mod cursor;
pub mod grid;
pub mod optimizer;
pub mod table;
pub mod text_fit;
pub mod wrap;

pub use self::config::LayoutConfig;
pub use self::constraints::LayoutConstraints;
pub use self::cursor::PageCursor;
pub use self::grid::{pack_rows, GridLayout, PackItem};
pub use self::optimizer::{column_priority, LayoutOptimizer};
pub use self::table::{plan_table, TableMetrics, TablePage};
pub use self::text_fit::{char_budget, fit_text, truncate_chars, FitStrategy, FittedText};
pub use self::wrap::split_lines;

/// Tolerance for floating point comparisons on point values.
pub const EPSILON: f32 = 0.01;
