use crate::error::IngestError;
use chrono::NaiveDate;
use core_types::{SalesRecord, StoreType};
use std::path::Path;
use tracing::info;

/// Loads the raw weekly-sales table from `path`.
///
/// Expected header row: `Store,Dept,Date,Weekly_Sales,IsHoliday,Type,Size`
/// (column order is free; headers are matched case-insensitively by name).
pub fn load_records(path: &Path) -> Result<Vec<SalesRecord>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    let records = read_records(&text)?;
    info!(rows = records.len(), path = %path.display(), "loaded raw sales table");
    Ok(records)
}

/// Parses the raw weekly-sales table out of CSV text.
pub fn read_records(text: &str) -> Result<Vec<SalesRecord>, IngestError> {
    // Strip a UTF-8 BOM if present.
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize, IngestError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
    };

    let store_col = column("Store")?;
    let dept_col = column("Dept")?;
    let date_col = column("Date")?;
    let sales_col = column("Weekly_Sales")?;
    let holiday_col = column("IsHoliday")?;
    let type_col = column("Type")?;
    let size_col = column("Size")?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Header occupies line 1, so data starts at line 2.
        let line = record
            .position()
            .map_or(row as u64 + 2, |p| p.line());

        let store = parse_id(field(&record, store_col, "Store", line)?, "Store", line)?;
        let dept = parse_id(field(&record, dept_col, "Dept", line)?, "Dept", line)?;
        let date = parse_date(field(&record, date_col, "Date", line)?, line)?;
        let weekly_sales = parse_sales(field(&record, sales_col, "Weekly_Sales", line)?, line)?;
        let is_holiday = parse_holiday(field(&record, holiday_col, "IsHoliday", line)?, line)?;
        let store_type: StoreType = field(&record, type_col, "Type", line)?
            .parse()
            .map_err(|e: core_types::CoreError| IngestError::malformed(line, e.to_string()))?;
        let store_size = parse_sales(field(&record, size_col, "Size", line)?, line)?;

        records.push(SalesRecord {
            store,
            dept,
            date,
            weekly_sales,
            is_holiday,
            store_type,
            store_size,
        });
    }

    Ok(records)
}

/// Pulls a required, non-empty field out of a row by column index.
fn field<'r>(
    record: &'r csv::StringRecord,
    col: usize,
    name: &str,
    line: u64,
) -> Result<&'r str, IngestError> {
    record
        .get(col)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| IngestError::malformed(line, format!("missing {name} value")))
}

fn parse_id(value: &str, name: &str, line: u64) -> Result<u32, IngestError> {
    value
        .parse()
        .map_err(|_| IngestError::malformed(line, format!("non-numeric {name} id '{value}'")))
}

fn parse_date(value: &str, line: u64) -> Result<NaiveDate, IngestError> {
    // ISO form first; the raw retail export writes day-first.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .map_err(|_| IngestError::malformed(line, format!("unparseable date '{value}'")))
}

fn parse_sales(value: &str, line: u64) -> Result<f64, IngestError> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| IngestError::malformed(line, format!("non-numeric value '{value}'")))?;
    // NaN and infinities would silently poison every downstream sum.
    if !parsed.is_finite() {
        return Err(IngestError::malformed(
            line,
            format!("non-finite value '{value}'"),
        ));
    }
    Ok(parsed)
}

fn parse_holiday(value: &str, line: u64) -> Result<bool, IngestError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ if value.eq_ignore_ascii_case("false") => Ok(false),
        _ if value.eq_ignore_ascii_case("true") => Ok(true),
        other => Err(IngestError::malformed(
            line,
            format!("unrecognized holiday flag '{other}'"),
        )),
    }
}
