mod arrears;
mod expenses;
mod financial;
mod generic;
mod maintenance;
mod occupancy;
mod rent;

pub use arrears::TenantArrears;
pub use expenses::ExpenseSummary;
pub use financial::FinancialSummary;
pub use generic::Generic;
pub use maintenance::Maintenance;
pub use occupancy::Occupancy;
pub use rent::RentCollection;
