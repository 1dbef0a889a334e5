//! # Unit Types
//!
//! Thin newtype wrappers for the handful of units the engine works in. They
//! serialize as bare numbers so JSON inputs stay flat.
//!
//! - Temperature: degrees Celsius (inputs), Kelvin (inside the correction)
//! - Pressure: psi (inputs and outputs), bar-scaled psi inside the track formula
//! - Stiffness: N/mm (ARB tables)
//!
//! The only conversions performed are Celsius to Kelvin and the fixed
//! psi-to-bar scaling used by the track-temperature correction.
//!
//! ## Example
//!
//! ```rust
//! use setup_core::units::{Celsius, Kelvin};
//!
//! let ambient = Celsius(20.0);
//! let absolute: Kelvin = ambient.into();
//! assert!((absolute.0 - 293.15).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// psi per bar, as used by the track-temperature correction
pub const PSI_PER_BAR: f64 = 14.504;

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Absolute temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - KELVIN_OFFSET)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Tire pressure in psi
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Tire pressure in bar
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar(pub f64);

impl From<Psi> for Bar {
    fn from(psi: Psi) -> Self {
        Bar(psi.0 / PSI_PER_BAR)
    }
}

impl From<Bar> for Psi {
    fn from(bar: Bar) -> Self {
        Psi(bar.0 * PSI_PER_BAR)
    }
}

// ============================================================================
// Stiffness Units
// ============================================================================

/// Roll-bar stiffness in newtons per millimetre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NPerMm(pub f64);

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Celsius);
impl_arithmetic!(Kelvin);
impl_arithmetic!(Psi);
impl_arithmetic!(Bar);
impl_arithmetic!(NPerMm);

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_kelvin() {
        let k: Kelvin = Celsius(0.0).into();
        assert_eq!(k.0, 273.15);
        let c: Celsius = Kelvin(300.0).into();
        assert!((c.0 - 26.85).abs() < 1e-9);
    }

    #[test]
    fn test_psi_bar_scaling() {
        let bar: Bar = Psi(PSI_PER_BAR * 2.0).into();
        assert!((bar.0 - 2.0).abs() < 1e-12);
        let psi: Psi = Bar(1.0).into();
        assert_eq!(psi.0, PSI_PER_BAR);
    }

    #[test]
    fn test_temperature_delta() {
        let before = Kelvin(300.0);
        let after = Kelvin(305.5);
        assert_eq!((after - before).value(), 5.5);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(28.004), 28.0);
        assert_eq!(round2(28.125), 28.13);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_serialization() {
        let p = Psi(27.5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "27.5");
        let roundtrip: Psi = serde_json::from_str(&json).unwrap();
        assert_eq!(p, roundtrip);
    }
}
