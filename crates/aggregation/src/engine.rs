use crate::error::AggregationError;
use crate::report::SalesReport;
use chrono::Datelike;
use core_types::{DeptId, SalesRecord, StoreId, StoreType, SummaryTables};
use std::collections::BTreeMap;
use tracing::debug;

/// English month names indexed by month-of-year minus one.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A stateless calculator for reducing sales activity to a `SalesReport`.
#[derive(Debug, Default)]
pub struct AggregationEngine {}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for the raw-record input shape.
    ///
    /// # Arguments
    ///
    /// * `records` - The full transaction-level table of `SalesRecord`s.
    /// * `reference_store` - The store whose type is surfaced as the
    ///   `top_store_type` headline metric. Must be present in the input.
    /// * `holiday_label` - The fixed label for the most-selling-holiday tile.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `SalesReport` or an `AggregationError`. On
    /// failure no partial report is produced; the run is rejected wholesale.
    pub fn calculate(
        &self,
        records: &[SalesRecord],
        reference_store: StoreId,
        holiday_label: &str,
    ) -> Result<SalesReport, AggregationError> {
        if records.is_empty() {
            return Err(AggregationError::EmptyInput);
        }
        debug!(records = records.len(), "aggregating raw sales records");

        let sales_by_year = total_by(records, |r| r.date.year());
        let sales_by_month = total_by(records, |r| r.date.month());
        let sales_by_store = total_by(records, |r| r.store);
        let sales_by_dept = total_by(records, |r| r.dept);
        let sales_by_store_type = total_by(records, |r| r.store_type);
        let sales_by_holiday_and_type = total_by(records, |r| (r.is_holiday, r.store_type));

        // A store's type is denormalized across its records, so the first
        // matching record is authoritative.
        let top_store_type = records
            .iter()
            .find(|r| r.store == reference_store)
            .map(|r| r.store_type)
            .ok_or(AggregationError::ReferenceStoreNotFound(reference_store))?;

        self.finish(
            sales_by_year,
            sales_by_month,
            sales_by_store,
            sales_by_dept,
            sales_by_store_type,
            sales_by_holiday_and_type,
            top_store_type,
            holiday_label,
        )
    }

    /// The entry point for the pre-aggregated input shape: one table per
    /// grouping dimension, already summed upstream.
    ///
    /// Values pass straight through into the grouped maps; duplicate keys
    /// within a table are summed. Converges on the same `SalesReport` shape
    /// as [`AggregationEngine::calculate`].
    pub fn assemble(
        &self,
        tables: &SummaryTables,
        reference_store: StoreId,
        holiday_label: &str,
    ) -> Result<SalesReport, AggregationError> {
        debug!(
            stores = tables.by_store.len(),
            depts = tables.by_dept.len(),
            "assembling pre-aggregated summary tables"
        );

        // Month keys come from an external table here, not from parsed dates,
        // so they are validated before anything is derived from them.
        if let Some(row) = tables.by_month.iter().find(|r| !(1..=12).contains(&r.month)) {
            return Err(AggregationError::InvalidMonth(row.month));
        }

        let sales_by_year = sum_rows(tables.by_year.iter().map(|r| (r.year, r.weekly_sales)));
        let sales_by_month = sum_rows(tables.by_month.iter().map(|r| (r.month, r.weekly_sales)));
        let sales_by_store = sum_rows(tables.by_store.iter().map(|r| (r.store, r.weekly_sales)));
        let sales_by_dept = sum_rows(tables.by_dept.iter().map(|r| (r.dept, r.weekly_sales)));
        let sales_by_store_type = sum_rows(
            tables
                .by_store
                .iter()
                .map(|r| (r.store_type, r.weekly_sales)),
        );
        let sales_by_holiday_and_type = sum_rows(
            tables
                .by_holiday_and_type
                .iter()
                .map(|r| ((r.is_holiday, r.store_type), r.weekly_sales)),
        );

        let top_store_type = tables
            .by_store
            .iter()
            .find(|r| r.store == reference_store)
            .map(|r| r.store_type)
            .ok_or(AggregationError::ReferenceStoreNotFound(reference_store))?;

        self.finish(
            sales_by_year,
            sales_by_month,
            sales_by_store,
            sales_by_dept,
            sales_by_store_type,
            sales_by_holiday_and_type,
            top_store_type,
            holiday_label,
        )
    }

    /// Derives the headline metrics and assembles the final report. Shared by
    /// both input shapes.
    fn finish(
        &self,
        sales_by_year: BTreeMap<i32, f64>,
        sales_by_month: BTreeMap<u32, f64>,
        sales_by_store: BTreeMap<StoreId, f64>,
        sales_by_dept: BTreeMap<DeptId, f64>,
        sales_by_store_type: BTreeMap<StoreType, f64>,
        sales_by_holiday_and_type: BTreeMap<(bool, StoreType), f64>,
        top_store_type: StoreType,
        holiday_label: &str,
    ) -> Result<SalesReport, AggregationError> {
        let top_store = argmax_key(&sales_by_store)?;
        let top_dept = argmax_key(&sales_by_dept)?;
        let top_month = month_name(argmax_key(&sales_by_month)?)?.to_string();

        Ok(SalesReport {
            sales_by_year,
            sales_by_month,
            sales_by_store,
            sales_by_dept,
            sales_by_store_type,
            sales_by_holiday_and_type,
            top_store,
            top_store_type,
            top_dept,
            top_month,
            top_holiday_label: holiday_label.to_string(),
        })
    }
}

/// Groups `records` by the value of `key_fn` and sums `weekly_sales` per
/// group in a single pass.
///
/// Group keys with no matching records are absent from the result rather
/// than zero-valued. The returned map iterates in ascending key order, which
/// is the category order the presentation layer renders.
pub fn total_by<K, F>(records: &[SalesRecord], key_fn: F) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&SalesRecord) -> K,
{
    sum_rows(records.iter().map(|r| (key_fn(r), r.weekly_sales)))
}

/// Returns the key holding the strictly maximum value in `totals`.
///
/// Ties break to the lowest key in natural order (numeric ascending for ids,
/// chronological for months), so repeated calls on the same mapping always
/// agree.
pub fn argmax_key<K>(totals: &BTreeMap<K, f64>) -> Result<K, AggregationError>
where
    K: Ord + Copy,
{
    let mut best: Option<(K, f64)> = None;
    // Ascending key order plus a strict comparison: the lowest tied key wins.
    for (&key, &value) in totals {
        let replace = match best {
            Some((_, best_value)) => value > best_value,
            None => true,
        };
        if replace {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key)
        .ok_or(AggregationError::EmptyInput)
}

/// Maps a month-of-year number to its calendar name.
pub fn month_name(month: u32) -> Result<&'static str, AggregationError> {
    match month {
        1..=12 => Ok(MONTH_NAMES[(month - 1) as usize]),
        _ => Err(AggregationError::InvalidMonth(month)),
    }
}

/// Accumulates `(key, value)` pairs into per-key totals.
fn sum_rows<K, I>(rows: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut totals = BTreeMap::new();
    for (key, value) in rows {
        *totals.entry(key).or_insert(0.0) += value;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{DeptSales, HolidayTypeSales, MonthSales, StoreSales, YearSales};

    fn record(
        store: StoreId,
        dept: DeptId,
        date: &str,
        weekly_sales: f64,
        is_holiday: bool,
        store_type: StoreType,
    ) -> SalesRecord {
        SalesRecord {
            store,
            dept,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            weekly_sales,
            is_holiday,
            store_type,
            store_size: 150_000.0,
        }
    }

    fn sample_records() -> Vec<SalesRecord> {
        vec![
            record(1, 1, "2010-02-05", 100.0, false, StoreType::A),
            record(2, 1, "2010-02-05", 300.0, false, StoreType::B),
        ]
    }

    #[test]
    fn total_by_conserves_the_grand_total() {
        let records = vec![
            record(1, 1, "2010-02-05", 100.0, false, StoreType::A),
            record(1, 2, "2010-03-12", -40.0, false, StoreType::A),
            record(2, 1, "2011-02-05", 300.0, true, StoreType::B),
        ];
        let grand_total: f64 = records.iter().map(|r| r.weekly_sales).sum();

        let by_store = total_by(&records, |r| r.store);
        assert_eq!(by_store.values().sum::<f64>(), grand_total);

        let by_year = total_by(&records, |r| r.date.year());
        assert_eq!(by_year.values().sum::<f64>(), grand_total);
    }

    #[test]
    fn total_by_sums_each_group_exactly_and_invents_no_keys() {
        let records = vec![
            record(1, 1, "2010-02-05", 100.0, false, StoreType::A),
            record(1, 2, "2010-03-12", 50.0, false, StoreType::A),
            record(2, 1, "2010-02-05", 300.0, false, StoreType::B),
        ];
        let by_store = total_by(&records, |r| r.store);

        assert_eq!(by_store.len(), 2);
        assert_eq!(by_store[&1], 150.0);
        assert_eq!(by_store[&2], 300.0);
        assert!(!by_store.contains_key(&3));
    }

    #[test]
    fn argmax_key_returns_the_unique_maximum() {
        let totals = BTreeMap::from([(1u32, 10.0), (2, 30.0), (3, 20.0)]);
        assert_eq!(argmax_key(&totals).unwrap(), 2);
    }

    #[test]
    fn argmax_key_breaks_ties_toward_the_lowest_key() {
        let totals = BTreeMap::from([(4u32, 30.0), (2, 30.0), (9, 10.0)]);
        // Repeated calls must agree.
        for _ in 0..3 {
            assert_eq!(argmax_key(&totals).unwrap(), 2);
        }
    }

    #[test]
    fn argmax_key_fails_on_an_empty_mapping() {
        let totals: BTreeMap<u32, f64> = BTreeMap::new();
        assert!(matches!(
            argmax_key(&totals),
            Err(AggregationError::EmptyInput)
        ));
    }

    #[test]
    fn month_name_covers_the_calendar_and_rejects_the_rest() {
        assert_eq!(month_name(1).unwrap(), "January");
        assert_eq!(month_name(12).unwrap(), "December");
        assert!(matches!(
            month_name(0),
            Err(AggregationError::InvalidMonth(0))
        ));
        assert!(matches!(
            month_name(13),
            Err(AggregationError::InvalidMonth(13))
        ));
    }

    #[test]
    fn calculate_end_to_end_sample() {
        let engine = AggregationEngine::new();
        let report = engine
            .calculate(&sample_records(), 2, "Thanksgiving")
            .unwrap();

        assert_eq!(
            report.sales_by_store,
            BTreeMap::from([(1, 100.0), (2, 300.0)])
        );
        assert_eq!(report.top_store, 2);
        assert_eq!(report.sales_by_year, BTreeMap::from([(2010, 400.0)]));
        assert_eq!(report.top_dept, 1);
        assert_eq!(report.top_month, "February");
        assert_eq!(report.top_store_type, StoreType::B);
        assert_eq!(report.top_holiday_label, "Thanksgiving");
        assert_eq!(
            report.sales_by_holiday_and_type,
            BTreeMap::from([((false, StoreType::A), 100.0), ((false, StoreType::B), 300.0)])
        );
    }

    #[test]
    fn calculate_rejects_empty_input() {
        let engine = AggregationEngine::new();
        assert!(matches!(
            engine.calculate(&[], 20, "Thanksgiving"),
            Err(AggregationError::EmptyInput)
        ));
    }

    #[test]
    fn calculate_fails_when_the_reference_store_is_absent() {
        let engine = AggregationEngine::new();
        assert!(matches!(
            engine.calculate(&sample_records(), 20, "Thanksgiving"),
            Err(AggregationError::ReferenceStoreNotFound(20))
        ));
    }

    #[test]
    fn calculate_is_deterministic_across_reruns() {
        let engine = AggregationEngine::new();
        let records = vec![
            record(1, 1, "2010-02-05", 100.0, false, StoreType::A),
            record(2, 3, "2011-11-26", 250.0, true, StoreType::B),
            record(2, 3, "2012-06-15", -25.5, false, StoreType::B),
        ];
        let first = engine.calculate(&records, 1, "Thanksgiving").unwrap();
        let second = engine.calculate(&records, 1, "Thanksgiving").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn assemble_matches_calculate_on_equivalent_input() {
        let records = vec![
            record(1, 1, "2010-02-05", 100.0, false, StoreType::A),
            record(1, 4, "2010-11-26", 80.0, true, StoreType::A),
            record(2, 1, "2010-02-05", 300.0, false, StoreType::B),
        ];
        let tables = SummaryTables {
            by_year: vec![YearSales {
                year: 2010,
                weekly_sales: 480.0,
            }],
            by_month: vec![
                MonthSales {
                    month: 2,
                    weekly_sales: 400.0,
                },
                MonthSales {
                    month: 11,
                    weekly_sales: 80.0,
                },
            ],
            by_store: vec![
                StoreSales {
                    store: 1,
                    store_type: StoreType::A,
                    store_size: 150_000.0,
                    weekly_sales: 180.0,
                },
                StoreSales {
                    store: 2,
                    store_type: StoreType::B,
                    store_size: 150_000.0,
                    weekly_sales: 300.0,
                },
            ],
            by_dept: vec![
                DeptSales {
                    dept: 1,
                    weekly_sales: 400.0,
                },
                DeptSales {
                    dept: 4,
                    weekly_sales: 80.0,
                },
            ],
            by_holiday_and_type: vec![
                HolidayTypeSales {
                    is_holiday: false,
                    store_type: StoreType::A,
                    weekly_sales: 100.0,
                },
                HolidayTypeSales {
                    is_holiday: true,
                    store_type: StoreType::A,
                    weekly_sales: 80.0,
                },
                HolidayTypeSales {
                    is_holiday: false,
                    store_type: StoreType::B,
                    weekly_sales: 300.0,
                },
            ],
        };

        let engine = AggregationEngine::new();
        let from_raw = engine.calculate(&records, 2, "Thanksgiving").unwrap();
        let from_tables = engine.assemble(&tables, 2, "Thanksgiving").unwrap();
        assert_eq!(from_raw, from_tables);
    }

    #[test]
    fn assemble_sums_duplicate_keys_within_a_table() {
        let tables = SummaryTables {
            by_year: vec![
                YearSales {
                    year: 2010,
                    weekly_sales: 100.0,
                },
                YearSales {
                    year: 2010,
                    weekly_sales: 50.0,
                },
            ],
            by_month: vec![MonthSales {
                month: 2,
                weekly_sales: 150.0,
            }],
            by_store: vec![StoreSales {
                store: 20,
                store_type: StoreType::C,
                store_size: 40_000.0,
                weekly_sales: 150.0,
            }],
            by_dept: vec![DeptSales {
                dept: 7,
                weekly_sales: 150.0,
            }],
            by_holiday_and_type: vec![HolidayTypeSales {
                is_holiday: false,
                store_type: StoreType::C,
                weekly_sales: 150.0,
            }],
        };

        let engine = AggregationEngine::new();
        let report = engine.assemble(&tables, 20, "Thanksgiving").unwrap();
        assert_eq!(report.sales_by_year, BTreeMap::from([(2010, 150.0)]));
        assert_eq!(report.top_store_type, StoreType::C);
    }

    #[test]
    fn assemble_rejects_month_keys_outside_the_calendar() {
        let tables = SummaryTables {
            by_month: vec![MonthSales {
                month: 13,
                weekly_sales: 1.0,
            }],
            ..SummaryTables::default()
        };
        let engine = AggregationEngine::new();
        assert!(matches!(
            engine.assemble(&tables, 20, "Thanksgiving"),
            Err(AggregationError::InvalidMonth(13))
        ));
    }
}
