//! Rear wing position map.
//!
//! Aero balance shift (percentage points, relative to P6) for each rear wing
//! slot. Lower slot numbers move the balance forward.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One wing slot and its balance shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingBalanceEntry {
    /// Slot number (the `N` in `PN`)
    pub position: u8,
    /// Balance shift in percentage points
    pub balance_pct: f64,
}

/// Wing slots from P14 (most rearward balance) down to P4.
pub const WING_BALANCE_TABLE: &[WingBalanceEntry] = &[
    WingBalanceEntry { position: 14, balance_pct: -6.0 },
    WingBalanceEntry { position: 13, balance_pct: -5.3 },
    WingBalanceEntry { position: 12, balance_pct: -4.6 },
    WingBalanceEntry { position: 11, balance_pct: -3.9 },
    WingBalanceEntry { position: 10, balance_pct: -3.2 },
    WingBalanceEntry { position: 9, balance_pct: -2.4 },
    WingBalanceEntry { position: 8, balance_pct: -1.6 },
    WingBalanceEntry { position: 7, balance_pct: -0.8 },
    WingBalanceEntry { position: 6, balance_pct: 0.0 },
    WingBalanceEntry { position: 5, balance_pct: 1.1 },
    WingBalanceEntry { position: 4, balance_pct: 2.3 },
];

/// Balance shift for a wing slot.
///
/// # Errors
///
/// `CalcError::WingPositionUnknown` for slots outside P4..=P14.
pub fn wing_balance_pct(position: u8) -> CalcResult<f64> {
    WING_BALANCE_TABLE
        .iter()
        .find(|e| e.position == position)
        .map(|e| e.balance_pct)
        .ok_or(CalcError::WingPositionUnknown { position })
}

impl WingBalanceEntry {
    /// Display label, e.g. `P14`
    pub fn label(&self) -> String {
        format!("P{}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_slot_is_neutral() {
        assert_eq!(wing_balance_pct(6).unwrap(), 0.0);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(wing_balance_pct(14).unwrap(), -6.0);
        assert_eq!(wing_balance_pct(4).unwrap(), 2.3);
    }

    #[test]
    fn test_balance_increases_as_slot_decreases() {
        for pair in WING_BALANCE_TABLE.windows(2) {
            assert!(pair[0].position > pair[1].position);
            assert!(pair[0].balance_pct < pair[1].balance_pct);
        }
    }

    #[test]
    fn test_unknown_slot() {
        let err = wing_balance_pct(3).unwrap_err();
        assert_eq!(err, CalcError::WingPositionUnknown { position: 3 });
        assert_eq!(WING_BALANCE_TABLE[0].label(), "P14");
    }
}
