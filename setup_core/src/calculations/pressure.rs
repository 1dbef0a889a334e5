//! # Cold Pressure Correction
//!
//! Corrects a tire's cold pressure so that it reaches its target hot pressure,
//! then adjusts that corrected value for the change in ambient air temperature
//! and track temperature between two measurement points of a session.
//!
//! ## Method
//!
//! Per corner, with all temperatures converted to Kelvin:
//!
//! ```text
//! new_cold   = cold * target / hot
//! corr_air   = new_cold * T_air_after / T_air_before
//! b          = new_cold / 14.504
//! corr_track = ((b + 1) * T_air_after / (T_air_after + (T_track_after - T_track_before)) - 1) * 14.504
//! ```
//!
//! Each output is rounded to two decimals.
//!
//! ## Guards
//!
//! - A hot pressure of zero is replaced by 1.0
//! - `corr_air` is 0.0 when the air-before temperature is absolute zero
//! - `corr_track` is 0.0 when the track-before temperature is absolute zero
//!
//! ## Example
//!
//! ```rust
//! use setup_core::calculations::pressure::{correct, CornerReading, TemperatureSample};
//!
//! let reading = CornerReading { target_psi: 29.0, cold_psi: 28.0, hot_psi: 29.0 };
//! let temps = TemperatureSample::uniform(20.0);
//!
//! let out = correct(&reading, &temps);
//! assert_eq!(out.new_cold_psi, 28.0);
//! assert_eq!(out.corr_air_psi, 28.0);
//! assert_eq!(out.corr_track_psi, 28.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::corners::{Corner, PerCorner};
use crate::errors::{CalcError, CalcResult};
use crate::units::{round2, Bar, Celsius, Kelvin, Psi, PSI_PER_BAR};

/// Pressures measured on one tire (psi).
///
/// ## JSON Example
///
/// ```json
/// { "target_psi": 28.5, "cold_psi": 25.0, "hot_psi": 32.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerReading {
    /// Desired hot pressure
    pub target_psi: f64,
    /// Cold pressure set before the run
    pub cold_psi: f64,
    /// Hot pressure measured after the run
    pub hot_psi: f64,
}

/// Air and track temperatures at the two measurement points (°C).
///
/// Shared by all four corners of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub air_before_c: f64,
    pub track_before_c: f64,
    pub air_after_c: f64,
    pub track_after_c: f64,
}

impl TemperatureSample {
    /// Same air and track temperature before and after.
    pub fn uniform(temp_c: f64) -> Self {
        TemperatureSample {
            air_before_c: temp_c,
            track_before_c: temp_c,
            air_after_c: temp_c,
            track_after_c: temp_c,
        }
    }
}

/// Corrected cold pressures for one tire (psi, two decimals).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrectedPressure {
    /// Cold pressure that would have produced the target hot pressure
    pub new_cold_psi: f64,
    /// `new_cold_psi` adjusted for the air temperature change
    pub corr_air_psi: f64,
    /// `new_cold_psi` adjusted for the track temperature change
    pub corr_track_psi: f64,
}

/// A full four-corner correction request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PressureCorrectionInput {
    pub readings: PerCorner<CornerReading>,
    pub temps: TemperatureSample,
}

impl PressureCorrectionInput {
    /// Reject NaN and infinite inputs.
    ///
    /// [`correct`] itself never fails; hosts call this before showing results
    /// that came from free-form entry.
    pub fn validate(&self) -> CalcResult<()> {
        for (corner, reading) in self.readings.iter() {
            check_finite(&format!("target_{corner}"), reading.target_psi)?;
            check_finite(&format!("cold_{corner}"), reading.cold_psi)?;
            check_finite(&format!("hot_{corner}"), reading.hot_psi)?;
        }
        check_finite("air1", self.temps.air_before_c)?;
        check_finite("track1", self.temps.track_before_c)?;
        check_finite("air2", self.temps.air_after_c)?;
        check_finite("track2", self.temps.track_after_c)?;
        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Correct one tire's cold pressure for the given temperature sample.
pub fn correct(reading: &CornerReading, temps: &TemperatureSample) -> CorrectedPressure {
    let air_before: Kelvin = Celsius(temps.air_before_c).into();
    let track_before: Kelvin = Celsius(temps.track_before_c).into();
    let air_after: Kelvin = Celsius(temps.air_after_c).into();
    let track_after: Kelvin = Celsius(temps.track_after_c).into();

    let hot = if reading.hot_psi == 0.0 { 1.0 } else { reading.hot_psi };
    let new_cold = Psi(reading.cold_psi * reading.target_psi / hot);

    let corr_air = if air_before.0 == 0.0 {
        0.0
    } else {
        new_cold.0 * air_after.0 / air_before.0
    };

    // The raw form multiplies air_after by (b + 1) / (b + 1); it cancels for
    // every physical pressure, so only the closed form is evaluated.
    let corr_track = if track_before.0 == 0.0 {
        0.0
    } else {
        let b: Bar = new_cold.into();
        let track_delta = track_after - track_before;
        ((b.0 + 1.0) * air_after.0 / (air_after.0 + track_delta.0) - 1.0) * PSI_PER_BAR
    };

    CorrectedPressure {
        new_cold_psi: round2(new_cold.0),
        corr_air_psi: round2(corr_air),
        corr_track_psi: round2(corr_track),
    }
}

/// Correct all four corners against one shared temperature sample.
pub fn correct_all(readings: &PerCorner<CornerReading>, temps: &TemperatureSample) -> PerCorner<CorrectedPressure> {
    readings.map(|reading| correct(reading, temps))
}

/// Convenience wrapper over [`correct_all`] for a bundled request.
pub fn calculate(input: &PressureCorrectionInput) -> PerCorner<CorrectedPressure> {
    correct_all(&input.readings, &input.temps)
}

/// Report column names of the three outputs for a corner, in export order.
pub fn output_columns(corner: Corner) -> [String; 3] {
    [
        format!("new_cold_{corner}"),
        format!("corr_air_{corner}"),
        format!("corr_track_{corner}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(target: f64, cold: f64, hot: f64) -> CornerReading {
        CornerReading {
            target_psi: target,
            cold_psi: cold,
            hot_psi: hot,
        }
    }

    #[test]
    fn test_scenario_steady_conditions() {
        let out = correct(&reading(29.0, 28.0, 29.0), &TemperatureSample::uniform(20.0));
        assert_eq!(
            out,
            CorrectedPressure {
                new_cold_psi: 28.0,
                corr_air_psi: 28.0,
                corr_track_psi: 28.0,
            }
        );
    }

    #[test]
    fn test_identity_when_temperatures_unchanged() {
        let temps = TemperatureSample {
            air_before_c: 24.0,
            track_before_c: 38.0,
            air_after_c: 24.0,
            track_after_c: 38.0,
        };
        let readings = PerCorner::new(
            reading(28.5, 25.0, 32.0),
            reading(28.5, 25.5, 31.8),
            reading(28.5, 24.8, 32.1),
            reading(28.5, 25.2, 31.9),
        );
        for (corner, out) in correct_all(&readings, &temps).iter() {
            assert!((out.corr_air_psi - out.new_cold_psi).abs() < 0.011, "{corner}: {out:?}");
            assert!((out.corr_track_psi - out.new_cold_psi).abs() < 0.011, "{corner}: {out:?}");
        }
    }

    #[test]
    fn test_zero_hot_pressure_is_treated_as_one() {
        let temps = TemperatureSample::uniform(25.0);
        let zero = correct(&reading(29.0, 28.0, 0.0), &temps);
        let one = correct(&reading(29.0, 28.0, 1.0), &temps);
        assert_eq!(zero.new_cold_psi, one.new_cold_psi);
        assert_eq!(zero.new_cold_psi, 812.0);
    }

    #[test]
    fn test_absolute_zero_guards() {
        let temps = TemperatureSample {
            air_before_c: -273.15,
            track_before_c: -273.15,
            air_after_c: 20.0,
            track_after_c: 20.0,
        };
        let out = correct(&reading(29.0, 28.0, 29.0), &temps);
        assert_eq!(out.new_cold_psi, 28.0);
        assert_eq!(out.corr_air_psi, 0.0);
        assert_eq!(out.corr_track_psi, 0.0);
    }

    #[test]
    fn test_warmer_air_raises_air_correction() {
        let temps = TemperatureSample {
            air_before_c: 20.0,
            track_before_c: 30.0,
            air_after_c: 30.0,
            track_after_c: 30.0,
        };
        let out = correct(&reading(29.0, 28.0, 29.0), &temps);
        // 28 * 303.15 / 293.15
        assert_eq!(out.corr_air_psi, 28.96);
        // Unchanged track temperature leaves the track correction at new_cold
        assert_eq!(out.corr_track_psi, 28.0);
    }

    #[test]
    fn test_hotter_track_lowers_track_correction() {
        let temps = TemperatureSample {
            air_before_c: 30.0,
            track_before_c: 35.0,
            air_after_c: 32.0,
            track_after_c: 36.5,
        };
        let out = correct(&reading(28.5, 25.0, 32.0), &temps);
        assert_eq!(out.new_cold_psi, 22.27);
        // b = 22.265625 / 14.504 ; ((b+1) * 305.15 / 306.65 - 1) * 14.504
        let b = 22.265625 / 14.504;
        let expected = ((b + 1.0) * 305.15 / 306.65 - 1.0) * 14.504;
        assert_eq!(out.corr_track_psi, round2(expected));
        assert!(out.corr_track_psi < out.new_cold_psi);
    }

    #[test]
    fn test_correct_all_uses_shared_sample() {
        let input = PressureCorrectionInput {
            readings: PerCorner::splat(reading(29.0, 28.0, 29.0)),
            temps: TemperatureSample::uniform(20.0),
        };
        let out = calculate(&input);
        for (_, c) in out.iter() {
            assert_eq!(c.new_cold_psi, 28.0);
        }
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut input = PressureCorrectionInput::default();
        input.readings.rl.hot_psi = f64::NAN;
        let err = input.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("hot_RL"));
    }

    #[test]
    fn test_output_columns() {
        assert_eq!(
            output_columns(Corner::FR),
            ["new_cold_FR".to_string(), "corr_air_FR".to_string(), "corr_track_FR".to_string()]
        );
    }
}
