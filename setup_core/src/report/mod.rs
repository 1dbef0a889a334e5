//! # Session Reports
//!
//! Exports stored sessions as a table: raw inputs plus the corrected cold
//! pressures for every corner, computed at export time.
//!
//! - [`table`] - joins records with the pressure engine and fixes column order
//! - [`writer`] - spreadsheet / delimited-text output with CSV fallback
//!
//! ## Example
//!
//! ```rust,no_run
//! use setup_core::report::export_report;
//! use setup_core::session::{SessionInput, SessionStore};
//! use setup_core::settings::ExportSettings;
//! use std::path::Path;
//!
//! let mut store = SessionStore::new();
//! store.add(SessionInput::default());
//!
//! let outcome = export_report(&store.sessions(), Path::new("sessions.xlsx"), &ExportSettings::default())?;
//! println!("wrote {} ({:?})", outcome.path.display(), outcome.format);
//! # Ok::<(), setup_core::errors::CalcError>(())
//! ```

pub mod table;
pub mod writer;

pub use table::{calculated_columns, ReportTable};
pub use writer::{export_report, ExportOutcome, ReportFormat};
