//! # Driftlab Simulation Source
//!
//! The synthetic counterpart to the real-data path: fabricates a return
//! series of `drift + volatility * Z` samples, with `Z` drawn from a
//! standard normal via the Box-Muller transform.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure computation over an injected random source.
//!   No global generator is ever touched, so a fixed seed makes every run
//!   reproducible.
//! - **Caller Owns Randomness:** Both the per-run drift draw and the sample
//!   generation take `&mut impl Rng`.

pub mod error;
pub mod generator;

// Re-export the key components to create a clean, public-facing API.
pub use error::SimulationError;
pub use generator::{GeneratorConfig, generate};
