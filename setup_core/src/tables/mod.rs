//! # Static Setup Tables
//!
//! Read-only reference data for the car, fixed at compile time:
//!
//! - [`arb`] - anti-roll-bar position to stiffness tables, front and rear
//! - [`wing`] - rear wing position to aero balance shift map
//!
//! Tables are plain `const` slices; derived lookup maps are built once on
//! first use and shared process-wide.

pub mod arb;
pub mod wing;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use arb::{StiffnessEntry, FRONT_ARB_TABLE, REAR_ARB_TABLE};
pub use wing::{WingBalanceEntry, WING_BALANCE_TABLE};

/// Car axle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    /// The stiffness table for this axle's ARB
    pub fn table(&self) -> &'static [StiffnessEntry] {
        match self {
            Axle::Front => FRONT_ARB_TABLE,
            Axle::Rear => REAR_ARB_TABLE,
        }
    }
}

impl fmt::Display for Axle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axle::Front => f.write_str("front"),
            Axle::Rear => f.write_str("rear"),
        }
    }
}
