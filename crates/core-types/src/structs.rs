use crate::enums::StoreType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a store in the retail chain.
pub type StoreId = u32;

/// Identifier of a department within a store.
pub type DeptId = u32;

/// One transaction-level row of the raw weekly-sales table.
///
/// Store type and size are denormalized onto every record: a store has
/// exactly one type and one size across all of its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store: StoreId,
    pub dept: DeptId,
    pub date: NaiveDate,
    /// Sales for the week. Negative values represent returns.
    pub weekly_sales: f64,
    pub is_holiday: bool,
    pub store_type: StoreType,
    pub store_size: f64,
}

/// One row of a pre-aggregated yearly totals table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSales {
    pub year: i32,
    pub weekly_sales: f64,
}

/// One row of a pre-aggregated month-of-year totals table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthSales {
    pub month: u32,
    pub weekly_sales: f64,
}

/// One row of a pre-aggregated per-store totals table.
///
/// Carries the store's type and size so summary derivation can resolve the
/// reference store without the raw records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreSales {
    pub store: StoreId,
    pub store_type: StoreType,
    pub store_size: f64,
    pub weekly_sales: f64,
}

/// One row of a pre-aggregated per-department totals table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeptSales {
    pub dept: DeptId,
    pub weekly_sales: f64,
}

/// One row of a pre-aggregated holiday-status / store-type totals table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolidayTypeSales {
    pub is_holiday: bool,
    pub store_type: StoreType,
    pub weekly_sales: f64,
}

/// The full set of pre-aggregated tables, one per grouping dimension.
///
/// This is the alternative input shape to the raw record table; both shapes
/// reduce to the same report bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTables {
    pub by_year: Vec<YearSales>,
    pub by_month: Vec<MonthSales>,
    pub by_store: Vec<StoreSales>,
    pub by_dept: Vec<DeptSales>,
    pub by_holiday_and_type: Vec<HolidayTypeSales>,
}
