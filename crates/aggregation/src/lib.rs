//! # Tally Aggregation Engine
//!
//! This crate turns transaction-level retail sales records into the summary
//! totals and headline metrics that drive the dashboard shell.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files, terminals, or configuration sources. It depends only on
//!   `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AggregationEngine` is a stateless
//!   calculator. It borrows its input tables, produces a fresh `SalesReport`,
//!   and retains nothing between runs. Concurrent callers can each run their
//!   own invocation on independently loaded inputs with no coordination.
//!
//! ## Public API
//!
//! - `AggregationEngine`: the calculator, with one entry point per input shape.
//! - `SalesReport`: the standardized output bundle of grouped totals and
//!   headline metrics.
//! - `total_by` / `argmax_key` / `month_name`: the reduction primitives the
//!   engine is built from.
//! - `AggregationError`: the specific error types that can be returned from
//!   this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AggregationEngine, argmax_key, month_name, total_by};
pub use error::AggregationError;
pub use report::SalesReport;
