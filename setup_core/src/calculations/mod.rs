//! # Setup Calculations
//!
//! Pure calculation functions. Each module follows the pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - `*Result` / output types - results (JSON-serializable)
//! - `calculate(input)` - pure function, no shared state
//!
//! ## Available Calculations
//!
//! - [`pressure`] - cold tire pressure correction for temperature drift
//! - [`stiffness`] - ARB axle stiffness and front distribution
//! - [`setup_search`] - reverse lookup of bar positions for a target distribution

pub mod pressure;
pub mod setup_search;
pub mod stiffness;

// Re-export commonly used types
pub use pressure::{correct, correct_all, CornerReading, CorrectedPressure, PressureCorrectionInput, TemperatureSample};
pub use setup_search::{distribution_grid, find_setups, DistributionGrid, SetupCandidate};
pub use stiffness::{axle_stiffness, distribution, ArbInput, ArbResult};
