pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::StoreType;
pub use error::CoreError;
pub use structs::{
    DeptId, DeptSales, HolidayTypeSales, MonthSales, SalesRecord, StoreId, StoreSales,
    SummaryTables, YearSales,
};
