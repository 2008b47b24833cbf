//! # Driftlab Inference Engine
//!
//! This crate answers the laboratory's central question: does a sequence of
//! asset returns show statistically significant drift, or is it
//! indistinguishable from noise? It acts as the "unbiased judge" of the
//! system.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `InferenceEngine` is a stateless
//!   calculator. It takes a raw return series as input and produces an
//!   `InferenceReport` as output. This makes it highly reliable and easy to
//!   test.
//! - **Fail Fast:** Invalid input (too few observations, a confidence level
//!   outside (0, 1), non-finite values) is rejected before any arithmetic
//!   runs. No partial report is ever constructed.
//!
//! ## Public API
//!
//! - `InferenceEngine`: the one-sample t-test against H₀: true mean = 0.
//! - `build_histogram`: bins a return series and overlays the fitted normal
//!   density for charting.
//! - `InferenceReport` / `HistogramBin`: the immutable value objects.
//! - `InferenceError`: the specific error types that can be returned.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod histogram;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::InferenceEngine;
pub use error::InferenceError;
pub use histogram::{DEFAULT_BIN_COUNT, build_histogram};
pub use report::{HistogramBin, InferenceReport};
