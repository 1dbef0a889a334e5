//! # Setup Search
//!
//! Reverse lookup: which front/rear bar positions give a wanted stiffness
//! distribution. The search walks the full cross product of the two tables
//! (13 x 13 entries), treating each entry as a single position with both
//! blades set alike.
//!
//! Also builds the distribution grid shown as a heatmap next to the search.

use serde::{Deserialize, Serialize};

use super::stiffness::distribution_of;
use crate::tables::arb::{positions, FRONT_ARB_TABLE, REAR_ARB_TABLE};
use crate::tables::Axle;

/// One front/rear position pair found by [`find_setups`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetupCandidate {
    pub front_position: f64,
    pub rear_position: f64,
    /// Front distribution achieved by this pair, 0-100
    pub achieved_pct: f64,
}

impl SetupCandidate {
    /// Absolute distance from a target distribution
    pub fn deviation_from(&self, target_pct: f64) -> f64 {
        (self.achieved_pct - target_pct).abs()
    }
}

/// All position pairs within `tolerance_pct` of `target_pct`, closest first.
///
/// Ties keep table order (front outer, rear inner). An empty result is a
/// valid answer, not an error.
pub fn find_setups(target_pct: f64, tolerance_pct: f64) -> Vec<SetupCandidate> {
    let mut found: Vec<SetupCandidate> = Vec::new();
    for front in FRONT_ARB_TABLE {
        for rear in REAR_ARB_TABLE {
            let pct = distribution_of(front.stiffness_n_per_mm, rear.stiffness_n_per_mm);
            if (pct - target_pct).abs() <= tolerance_pct {
                found.push(SetupCandidate {
                    front_position: front.position,
                    rear_position: rear.position,
                    achieved_pct: pct,
                });
            }
        }
    }

    sort_by_deviation(&mut found, target_pct);

    tracing::debug!(target_pct, tolerance_pct, matches = found.len(), "setup search complete");
    found
}

/// Closest first. `sort_by` is stable, so equal deviations keep insertion order.
fn sort_by_deviation(candidates: &mut [SetupCandidate], target_pct: f64) {
    candidates.sort_by(|a, b| a.deviation_from(target_pct).total_cmp(&b.deviation_from(target_pct)));
}

/// Distribution for every tabulated rear position (rows) and front position
/// (columns), both blades of each axle at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionGrid {
    pub front_positions: Vec<f64>,
    pub rear_positions: Vec<f64>,
    /// `cells[row][col]` = distribution for `rear_positions[row]`, `front_positions[col]`
    pub cells: Vec<Vec<f64>>,
}

impl DistributionGrid {
    pub fn min(&self) -> f64 {
        self.cells.iter().flatten().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.cells.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Cell value for a position pair, if both are tabulated
    pub fn at(&self, front_position: f64, rear_position: f64) -> Option<f64> {
        let col = self.front_positions.iter().position(|p| *p == front_position)?;
        let row = self.rear_positions.iter().position(|p| *p == rear_position)?;
        Some(self.cells[row][col])
    }
}

/// Build the full distribution grid.
pub fn distribution_grid() -> DistributionGrid {
    let cells = REAR_ARB_TABLE
        .iter()
        .map(|rear| {
            FRONT_ARB_TABLE
                .iter()
                .map(|front| distribution_of(front.stiffness_n_per_mm, rear.stiffness_n_per_mm))
                .collect()
        })
        .collect();

    DistributionGrid {
        front_positions: positions(Axle::Front),
        rear_positions: positions(Axle::Rear),
        cells,
    }
}
