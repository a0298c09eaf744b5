//! # Tally Ingestion
//!
//! Loads the two tabular input shapes the aggregation engine accepts: the
//! raw transaction-level weekly-sales export, and the per-dimension
//! pre-aggregated summary tables.
//!
//! Validation is strict and wholesale: any malformed row rejects the entire
//! load with a `MalformedRecord` error carrying the offending line number.
//! There is no row skipping and no recovery; the caller retries with
//! corrected input or surfaces the failure.

pub mod error;
pub mod records;
pub mod summary;

// Re-export the core functions to provide a clean public API.
pub use error::IngestError;
pub use records::{load_records, read_records};
pub use summary::{load_summary_tables, read_summary_tables};
