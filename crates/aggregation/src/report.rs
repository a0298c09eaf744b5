use core_types::{DeptId, StoreId, StoreType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete summary bundle produced by one aggregation run.
///
/// This struct is the final output of the `AggregationEngine` and is the data
/// transfer object the presentation shell renders from. It is recomputed
/// fresh on every run and never mutated in place.
///
/// All grouped totals are `BTreeMap`s so categories iterate in ascending key
/// order, which is the order the display layer renders. Groups with no
/// matching input rows are absent keys, never zero entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    // I. Grouped totals
    pub sales_by_year: BTreeMap<i32, f64>,
    /// Keyed by month-of-year, 1..=12.
    pub sales_by_month: BTreeMap<u32, f64>,
    pub sales_by_store: BTreeMap<StoreId, f64>,
    pub sales_by_dept: BTreeMap<DeptId, f64>,
    pub sales_by_store_type: BTreeMap<StoreType, f64>,
    /// JSON object keys must be strings, so this tuple-keyed map round-trips
    /// through a sequence of explicit rows.
    #[serde(with = "holiday_type_rows")]
    pub sales_by_holiday_and_type: BTreeMap<(bool, StoreType), f64>,

    // II. Headline metrics
    pub top_store: StoreId,
    /// Type of the configured reference store, not of `top_store`.
    pub top_store_type: StoreType,
    pub top_dept: DeptId,
    /// Calendar name of the strongest month, e.g. "November".
    pub top_month: String,
    /// Fixed configured label; never derived from the data.
    pub top_holiday_label: String,
}

mod holiday_type_rows {
    use core_types::{HolidayTypeSales, StoreType};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(
        map: &BTreeMap<(bool, StoreType), f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<HolidayTypeSales> = map
            .iter()
            .map(|(&(is_holiday, store_type), &weekly_sales)| HolidayTypeSales {
                is_holiday,
                store_type,
                weekly_sales,
            })
            .collect();
        rows.serialize(serializer)
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<(bool, StoreType), f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<HolidayTypeSales>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|row| ((row.is_holiday, row.store_type), row.weekly_sales))
            .collect())
    }
}
