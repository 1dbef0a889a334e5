//! # ARB Stiffness Lookup
//!
//! Axle roll stiffness from bar blade positions, and the front share of total
//! ARB stiffness ("distribution").
//!
//! Each axle takes two positions (left and right blade). Their mean must be a
//! tabulated position; there is no interpolation and no nearest-match.
//!
//! ## Example
//!
//! ```rust
//! use setup_core::calculations::stiffness::{axle_stiffness, distribution};
//! use setup_core::tables::Axle;
//!
//! assert_eq!(axle_stiffness(Axle::Front, [2.0, 2.0]).unwrap(), 11.0);
//! assert_eq!(axle_stiffness(Axle::Rear, [6.0, 6.0]).unwrap(), 46.6);
//!
//! let pct = distribution([2.0, 2.0], [6.0, 6.0]).unwrap();
//! assert!((pct - 19.10).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::arb::stiffness_at;
use crate::tables::Axle;

/// Blade positions for both axles.
///
/// ## JSON Example
///
/// ```json
/// { "front": [2.0, 2.5], "rear": [6.0, 6.5] }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbInput {
    /// Front left / front right blade positions
    pub front: [f64; 2],
    /// Rear left / rear right blade positions
    pub rear: [f64; 2],
}

/// Stiffness of both axles and the resulting distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbResult {
    pub front_n_per_mm: f64,
    pub rear_n_per_mm: f64,
    /// Front share of total ARB stiffness, 0-100
    pub front_distribution_pct: f64,
}

/// Stiffness of one axle from its two blade positions.
///
/// # Errors
///
/// `CalcError::PositionNotTabulated` if the mean position is not in the table.
pub fn axle_stiffness(axle: Axle, positions: [f64; 2]) -> CalcResult<f64> {
    let mean = (positions[0] + positions[1]) / 2.0;
    stiffness_at(axle, mean).ok_or_else(|| {
        tracing::debug!(%axle, position = mean, "ARB position not tabulated");
        CalcError::position_not_tabulated(axle, mean)
    })
}

/// Front and rear axle stiffness, in that order.
pub fn axle_stiffnesses(front: [f64; 2], rear: [f64; 2]) -> CalcResult<(f64, f64)> {
    Ok((axle_stiffness(Axle::Front, front)?, axle_stiffness(Axle::Rear, rear)?))
}

/// Front share of total stiffness, as a percentage.
pub fn distribution_of(front_n_per_mm: f64, rear_n_per_mm: f64) -> f64 {
    front_n_per_mm / (front_n_per_mm + rear_n_per_mm) * 100.0
}

/// Front ARB stiffness distribution for the given blade positions.
///
/// # Errors
///
/// Propagates `PositionNotTabulated` from either axle.
pub fn distribution(front: [f64; 2], rear: [f64; 2]) -> CalcResult<f64> {
    let (f, r) = axle_stiffnesses(front, rear)?;
    Ok(distribution_of(f, r))
}

/// Full stiffness calculation for a pair of axles.
pub fn calculate(input: &ArbInput) -> CalcResult<ArbResult> {
    let (front, rear) = axle_stiffnesses(input.front, input.rear)?;
    Ok(ArbResult {
        front_n_per_mm: front,
        rear_n_per_mm: rear,
        front_distribution_pct: distribution_of(front, rear),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_lookup() {
        assert_eq!(axle_stiffness(Axle::Front, [2.0, 2.0]).unwrap(), 11.0);
        assert_eq!(axle_stiffness(Axle::Rear, [6.0, 6.0]).unwrap(), 46.6);
    }

    #[test]
    fn test_mixed_positions_average_onto_table() {
        // mean 2.5
        assert_eq!(axle_stiffness(Axle::Front, [2.0, 3.0]).unwrap(), 12.65);
        // mean 6.5
        assert_eq!(axle_stiffness(Axle::Rear, [6.0, 7.0]).unwrap(), 45.05);
    }

    #[test]
    fn test_untabulated_mean_fails() {
        let err = axle_stiffness(Axle::Front, [2.0, 2.5]).unwrap_err();
        assert_eq!(err, CalcError::position_not_tabulated(Axle::Front, 2.25));
    }

    #[test]
    fn test_distribution() {
        let pct = distribution([2.0, 2.0], [6.0, 6.0]).unwrap();
        assert!((pct - 11.0 / 57.6 * 100.0).abs() < 1e-12);
        assert!((pct - 19.10).abs() < 0.01);
    }

    #[test]
    fn test_distribution_propagates_rear_miss() {
        let err = distribution([2.0, 2.0], [6.0, 6.5]).unwrap_err();
        match err {
            CalcError::PositionNotTabulated { axle, position } => {
                assert_eq!(axle, Axle::Rear);
                assert_eq!(position, 6.25);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_calculate_bundles_both_axles() {
        let result = calculate(&ArbInput {
            front: [4.0, 4.0],
            rear: [4.0, 4.0],
        })
        .unwrap();
        assert_eq!(result.front_n_per_mm, 19.7);
        assert_eq!(result.rear_n_per_mm, 28.4);
        assert!((result.front_distribution_pct - 19.7 / 48.1 * 100.0).abs() < 1e-9);
    }
}
