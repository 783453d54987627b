use crate::ReportTransformer;
use crate::strategies::{
    ExpenseSummary, FinancialSummary, Generic, Maintenance, Occupancy, RentCollection,
    TenantArrears,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    RentCollection,
    Occupancy,
    ExpenseSummary,
    Maintenance,
    TenantArrears,
    FinancialSummary,
    Generic,
}

static RENT_COLLECTION: RentCollection = RentCollection;
static OCCUPANCY: Occupancy = Occupancy;
static EXPENSE_SUMMARY: ExpenseSummary = ExpenseSummary;
static MAINTENANCE: Maintenance = Maintenance;
static TENANT_ARREARS: TenantArrears = TenantArrears;
static FINANCIAL_SUMMARY: FinancialSummary = FinancialSummary;
static GENERIC: Generic = Generic;

impl ReportType {
    pub fn all() -> [ReportType; 7] {
        [
            ReportType::RentCollection,
            ReportType::Occupancy,
            ReportType::ExpenseSummary,
            ReportType::Maintenance,
            ReportType::TenantArrears,
            ReportType::FinancialSummary,
            ReportType::Generic,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ReportType::RentCollection => "rent_collection",
            ReportType::Occupancy => "occupancy",
            ReportType::ExpenseSummary => "expense_summary",
            ReportType::Maintenance => "maintenance",
            ReportType::TenantArrears => "tenant_arrears",
            ReportType::FinancialSummary => "financial_summary",
            ReportType::Generic => "generic",
        }
    }

    /// Resolves an id such as `rent-collection` or `Rent Collection`. Unknown ids map
    /// to [`ReportType::Generic`].
    pub fn from_id(id: &str) -> ReportType {
        let normalized: String = id
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        Self::all()
            .into_iter()
            .find(|t| t.id() == normalized)
            .unwrap_or(ReportType::Generic)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportType::RentCollection => "Rent Collection Report",
            ReportType::Occupancy => "Occupancy Report",
            ReportType::ExpenseSummary => "Expense Summary",
            ReportType::Maintenance => "Maintenance Report",
            ReportType::TenantArrears => "Tenant Arrears Report",
            ReportType::FinancialSummary => "Financial Summary",
            ReportType::Generic => "Report",
        }
    }

    pub fn transformer(&self) -> &'static dyn ReportTransformer {
        match self {
            ReportType::RentCollection => &RENT_COLLECTION,
            ReportType::Occupancy => &OCCUPANCY,
            ReportType::ExpenseSummary => &EXPENSE_SUMMARY,
            ReportType::Maintenance => &MAINTENANCE,
            ReportType::TenantArrears => &TENANT_ARREARS,
            ReportType::FinancialSummary => &FINANCIAL_SUMMARY,
            ReportType::Generic => &GENERIC,
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_and_normalize() {
        for t in ReportType::all() {
            assert_eq!(ReportType::from_id(t.id()), t);
            assert_eq!(t.transformer().report_type(), t);
        }
        assert_eq!(ReportType::from_id("Rent-Collection"), ReportType::RentCollection);
        assert_eq!(ReportType::from_id(" tenant arrears "), ReportType::TenantArrears);
        assert_eq!(ReportType::from_id("lease_renewals"), ReportType::Generic);
    }
}
