use crate::error::IngestError;
use core_types::{DeptSales, HolidayTypeSales, MonthSales, StoreSales, SummaryTables, YearSales};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// File names of the per-dimension summary tables inside the summary
/// directory.
pub const YEAR_TABLE: &str = "year.csv";
pub const MONTH_TABLE: &str = "month.csv";
pub const STORE_TABLE: &str = "stores.csv";
pub const DEPT_TABLE: &str = "departments.csv";
pub const HOLIDAY_TYPE_TABLE: &str = "holiday_type.csv";

/// Loads the full set of pre-aggregated tables from `dir`, one CSV per
/// grouping dimension.
pub fn load_summary_tables(dir: &Path) -> Result<SummaryTables, IngestError> {
    let tables = SummaryTables {
        by_year: read_table::<RawYearRow>(&std::fs::read_to_string(dir.join(YEAR_TABLE))?)?,
        by_month: read_table::<RawMonthRow>(&std::fs::read_to_string(dir.join(MONTH_TABLE))?)?,
        by_store: read_table::<RawStoreRow>(&std::fs::read_to_string(dir.join(STORE_TABLE))?)?,
        by_dept: read_table::<RawDeptRow>(&std::fs::read_to_string(dir.join(DEPT_TABLE))?)?,
        by_holiday_and_type: read_table::<RawHolidayTypeRow>(&std::fs::read_to_string(
            dir.join(HOLIDAY_TYPE_TABLE),
        )?)?,
    };
    info!(path = %dir.display(), "loaded pre-aggregated summary tables");
    Ok(tables)
}

/// Parses the full table set out of already-read CSV texts, in the same
/// order as the table-name constants.
pub fn read_summary_tables(
    year: &str,
    month: &str,
    stores: &str,
    departments: &str,
    holiday_type: &str,
) -> Result<SummaryTables, IngestError> {
    Ok(SummaryTables {
        by_year: read_table::<RawYearRow>(year)?,
        by_month: read_table::<RawMonthRow>(month)?,
        by_store: read_table::<RawStoreRow>(stores)?,
        by_dept: read_table::<RawDeptRow>(departments)?,
        by_holiday_and_type: read_table::<RawHolidayTypeRow>(holiday_type)?,
    })
}

/// A decoded summary-table row: CSV header spelling on one side, the
/// core-types row on the other.
trait SummaryRow: DeserializeOwned {
    type Row;

    /// The already-summed sales value, checked for finiteness before the row
    /// is accepted.
    fn weekly_sales(&self) -> f64;

    fn into_row(self) -> Self::Row;
}

fn read_table<R: SummaryRow>(text: &str) -> Result<Vec<R::Row>, IngestError> {
    // Strip a UTF-8 BOM if present.
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<R>().enumerate() {
        let line = idx as u64 + 2;
        let raw = result.map_err(|e| IngestError::malformed(line, e.to_string()))?;
        if !raw.weekly_sales().is_finite() {
            return Err(IngestError::malformed(line, "non-finite sales value"));
        }
        rows.push(raw.into_row());
    }
    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawYearRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Weekly_Sales")]
    weekly_sales: f64,
}

impl SummaryRow for RawYearRow {
    type Row = YearSales;

    fn weekly_sales(&self) -> f64 {
        self.weekly_sales
    }

    fn into_row(self) -> YearSales {
        YearSales {
            year: self.year,
            weekly_sales: self.weekly_sales,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMonthRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Weekly_Sales")]
    weekly_sales: f64,
}

impl SummaryRow for RawMonthRow {
    type Row = MonthSales;

    fn weekly_sales(&self) -> f64 {
        self.weekly_sales
    }

    fn into_row(self) -> MonthSales {
        MonthSales {
            month: self.month,
            weekly_sales: self.weekly_sales,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawStoreRow {
    #[serde(rename = "Store")]
    store: u32,
    #[serde(rename = "Type")]
    store_type: core_types::StoreType,
    #[serde(rename = "Size")]
    store_size: f64,
    #[serde(rename = "Weekly_Sales")]
    weekly_sales: f64,
}

impl SummaryRow for RawStoreRow {
    type Row = StoreSales;

    fn weekly_sales(&self) -> f64 {
        self.weekly_sales
    }

    fn into_row(self) -> StoreSales {
        StoreSales {
            store: self.store,
            store_type: self.store_type,
            store_size: self.store_size,
            weekly_sales: self.weekly_sales,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDeptRow {
    #[serde(rename = "Dept")]
    dept: u32,
    #[serde(rename = "Weekly_Sales")]
    weekly_sales: f64,
}

impl SummaryRow for RawDeptRow {
    type Row = DeptSales;

    fn weekly_sales(&self) -> f64 {
        self.weekly_sales
    }

    fn into_row(self) -> DeptSales {
        DeptSales {
            dept: self.dept,
            weekly_sales: self.weekly_sales,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHolidayTypeRow {
    #[serde(rename = "IsHoliday")]
    is_holiday: bool,
    #[serde(rename = "Type")]
    store_type: core_types::StoreType,
    #[serde(rename = "Weekly_Sales")]
    weekly_sales: f64,
}

impl SummaryRow for RawHolidayTypeRow {
    type Row = HolidayTypeSales;

    fn weekly_sales(&self) -> f64 {
        self.weekly_sales
    }

    fn into_row(self) -> HolidayTypeSales {
        HolidayTypeSales {
            is_holiday: self.is_holiday,
            store_type: self.store_type,
            weekly_sales: self.weekly_sales,
        }
    }
}
