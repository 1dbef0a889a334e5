//! Anti-Roll-Bar Stiffness Tables
//!
//! Measured bar stiffness for each blade position, front and rear. Positions
//! run 1.0 to 7.0 in half steps. The curves are not monotonic: both bars peak
//! at 6.0 and soften again at 6.5 and 7.0, so values must be taken from the
//! table as-is, never fitted.
//!
//! ## Exact-Match Lookup
//!
//! Lookups compare positions for exact equality. The derived maps are keyed by
//! the bit pattern of the position, which is exact for the half and quarter
//! steps produced by averaging two tabulated positions.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Axle;

/// One tabulated bar position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StiffnessEntry {
    /// Blade position
    pub position: f64,
    /// Bar stiffness at that position (N/mm)
    pub stiffness_n_per_mm: f64,
}

const fn entry(position: f64, stiffness_n_per_mm: f64) -> StiffnessEntry {
    StiffnessEntry {
        position,
        stiffness_n_per_mm,
    }
}

/// Front ARB: position to stiffness (N/mm)
pub const FRONT_ARB_TABLE: &[StiffnessEntry] = &[
    entry(1.0, 9.3),
    entry(1.5, 10.15),
    entry(2.0, 11.0),
    entry(2.5, 12.65),
    entry(3.0, 14.3),
    entry(3.5, 17.0),
    entry(4.0, 19.7),
    entry(4.5, 23.1),
    entry(5.0, 26.5),
    entry(5.5, 28.2),
    entry(6.0, 29.9),
    entry(6.5, 26.9),
    entry(7.0, 23.9),
];

/// Rear ARB: position to stiffness (N/mm)
pub const REAR_ARB_TABLE: &[StiffnessEntry] = &[
    entry(1.0, 15.4),
    entry(1.5, 16.4),
    entry(2.0, 17.4),
    entry(2.5, 19.4),
    entry(3.0, 21.4),
    entry(3.5, 24.9),
    entry(4.0, 28.4),
    entry(4.5, 33.45),
    entry(5.0, 38.5),
    entry(5.5, 42.55),
    entry(6.0, 46.6),
    entry(6.5, 45.05),
    entry(7.0, 43.5),
];

static FRONT_LOOKUP: Lazy<HashMap<u64, f64>> = Lazy::new(|| build_lookup(FRONT_ARB_TABLE));
static REAR_LOOKUP: Lazy<HashMap<u64, f64>> = Lazy::new(|| build_lookup(REAR_ARB_TABLE));

fn position_key(position: f64) -> u64 {
    // -0.0 and 0.0 must hash alike
    (position + 0.0).to_bits()
}

fn build_lookup(table: &[StiffnessEntry]) -> HashMap<u64, f64> {
    table
        .iter()
        .map(|e| (position_key(e.position), e.stiffness_n_per_mm))
        .collect()
}

/// Exact-match stiffness for a single position, `None` if not tabulated.
pub fn stiffness_at(axle: Axle, position: f64) -> Option<f64> {
    let lookup = match axle {
        Axle::Front => &*FRONT_LOOKUP,
        Axle::Rear => &*REAR_LOOKUP,
    };
    lookup.get(&position_key(position)).copied()
}

/// Tabulated positions for an axle, in table order.
pub fn positions(axle: Axle) -> Vec<f64> {
    axle.table().iter().map(|e| e.position).collect()
}
