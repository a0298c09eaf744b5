use core_types::StoreId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("No records to aggregate")]
    EmptyInput,

    #[error("Month number {0} is outside the calendar range 1..=12")]
    InvalidMonth(u32),

    #[error("Reference store {0} is absent from the input data")]
    ReferenceStoreNotFound(StoreId),
}
