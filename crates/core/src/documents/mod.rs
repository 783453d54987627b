//! Per-type page content: reports, invoices and letters.

pub mod invoice;
pub mod letter;
pub mod report;

pub use invoice::{compose_invoice, line_item_table};
pub use letter::compose_letter;
pub use report::{compose_report, ResolvedReport};
