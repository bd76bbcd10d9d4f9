//! # Returns Analytics
//!
//! This crate turns canonical price series into daily return series and
//! derives the performance/risk metric catalog from them. It acts as the
//! "unbiased judge" of the pipeline.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** no knowledge of providers or renderers. It depends
//!   only on `core-types`.
//! - **Stateless calculation:** the `MetricsEngine` takes a return series as
//!   input and produces a `MetricsReport` as output, with no hidden state, so
//!   computing twice yields identical results.
//!
//! ## Public API
//!
//! - `to_returns` / `align`: series conversion and date-intersection alignment.
//! - `MetricsEngine`: the stateless metric calculator.
//! - `MetricsReport`: the ordered catalog of computed metrics.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod align;
pub mod constants;
pub mod engine;
pub mod error;
pub mod report;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use align::align;
pub use engine::MetricsEngine;
pub use error::AnalyticsError;
pub use report::{DisplayFormat, Metric, MetricEntry, MetricValue, MetricsReport};
pub use returns::to_returns;
