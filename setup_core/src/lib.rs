//! # setup_core - Trackside Setup Calculation Engine
//!
//! `setup_core` holds the domain logic behind a race-car setup sheet:
//! correcting cold tire pressures for temperature drift within a session,
//! logging sessions and exporting them as reports, and working with
//! anti-roll-bar (ARB) stiffness tables in both directions.
//!
//! ## Design Philosophy
//!
//! - **Stateless calculations**: pure functions over inputs and static tables
//! - **JSON-First**: inputs, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: a lookup miss is `PositionNotTabulated`, not a string
//! - **Host-agnostic**: no UI here; hosts collect inputs and render outputs
//!
//! ## Quick Start
//!
//! ```rust
//! use setup_core::calculations::{correct, find_setups, distribution, CornerReading, TemperatureSample};
//!
//! let reading = CornerReading { target_psi: 28.5, cold_psi: 25.0, hot_psi: 32.0 };
//! let temps = TemperatureSample { air_before_c: 30.0, track_before_c: 35.0, air_after_c: 32.0, track_after_c: 36.5 };
//! let corrected = correct(&reading, &temps);
//! assert_eq!(corrected.new_cold_psi, 22.27);
//!
//! let pct = distribution([2.0, 2.0], [6.0, 6.0]).unwrap();
//! let options = find_setups(pct, 0.5);
//! assert!(!options.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - pressure correction, ARB stiffness, setup search
//! - [`session`] - append-only session log
//! - [`report`] - tabular report export (xlsx with CSV fallback)
//! - [`tables`] - static ARB and wing tables
//! - [`settings`] - export and search configuration
//! - [`corners`] - corner enum and per-corner container
//! - [`units`] - unit newtypes and conversions
//! - [`errors`] - structured error types

pub mod calculations;
pub mod corners;
pub mod errors;
pub mod report;
pub mod session;
pub mod settings;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use corners::{Corner, PerCorner};
pub use errors::{CalcError, CalcResult};
pub use report::{export_report, ExportOutcome, ReportFormat};
pub use session::{SessionRecord, SessionStore, SharedSessionStore};
pub use settings::Settings;
pub use tables::Axle;
