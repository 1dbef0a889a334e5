//! Command implementations: call into `setup_core` and print the result.

use std::fs;
use std::path::Path;

use serde::Serialize;
use setup_core::calculations::pressure;
use setup_core::calculations::setup_search::{distribution_grid, find_setups};
use setup_core::calculations::stiffness::{self, ArbInput};
use setup_core::errors::{CalcError, CalcResult};
use setup_core::session::{SessionInput, SessionStore};
use setup_core::settings::ExportSettings;
use setup_core::tables::wing::{wing_balance_pct, WING_BALANCE_TABLE};

/// How results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn print_json<T: Serialize>(&self, value: &T) -> CalcResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

fn positions_pair(field: &str, values: &[f64]) -> CalcResult<[f64; 2]> {
    <[f64; 2]>::try_from(values).map_err(|_| {
        CalcError::invalid_input(field, format!("{values:?}"), "Expected exactly two blade positions")
    })
}

pub fn correct(input_path: &Path, output: Output) -> CalcResult<()> {
    let input: SessionInput = read_json(input_path)?;
    tracing::debug!(path = %input_path.display(), session = %input.info.session_name, "loaded session input");
    let request = input.correction_input();
    request.validate()?;
    let result = pressure::calculate(&request);

    if output.json {
        return output.print_json(&result);
    }

    println!("═══════════════════════════════════════════════");
    println!("  COLD PRESSURE CORRECTION  {}", input.info.session_name);
    println!("═══════════════════════════════════════════════");
    println!();
    println!(
        "  Air   {:>6.1} → {:>6.1} °C",
        request.temps.air_before_c, request.temps.air_after_c
    );
    println!(
        "  Track {:>6.1} → {:>6.1} °C",
        request.temps.track_before_c, request.temps.track_after_c
    );
    println!();
    println!("  Tire   New cold   Air corr   Track corr  (psi)");
    for (corner, out) in result.iter() {
        println!(
            "  {:<4} {:>10.2} {:>10.2} {:>12.2}",
            corner, out.new_cold_psi, out.corr_air_psi, out.corr_track_psi
        );
    }
    Ok(())
}

pub fn stiffness(front: &[f64], rear: &[f64], output: Output) -> CalcResult<()> {
    let input = ArbInput {
        front: positions_pair("front", front)?,
        rear: positions_pair("rear", rear)?,
    };
    let result = stiffness::calculate(&input)?;

    if output.json {
        return output.print_json(&result);
    }

    println!("Front ARB stiffness: {:>7.2} N/mm", result.front_n_per_mm);
    println!("Rear ARB stiffness:  {:>7.2} N/mm", result.rear_n_per_mm);
    println!("Front distribution:  {:>7.2} %", result.front_distribution_pct);
    Ok(())
}

pub fn search(target_pct: f64, tolerance_pct: f64, output: Output) -> CalcResult<()> {
    if !target_pct.is_finite() {
        return Err(CalcError::invalid_input("target", target_pct.to_string(), "Target must be a number"));
    }
    if !tolerance_pct.is_finite() || tolerance_pct < 0.0 {
        return Err(CalcError::invalid_input(
            "tolerance",
            tolerance_pct.to_string(),
            "Tolerance must be a non-negative number",
        ));
    }

    let results = find_setups(target_pct, tolerance_pct);

    if output.json {
        return output.print_json(&results);
    }

    if results.is_empty() {
        println!("No setups within {tolerance_pct:.2} of {target_pct:.2}%");
        return Ok(());
    }

    println!("Front   Rear   Distribution");
    for c in &results {
        println!("{:>5.1} {:>6.1} {:>12.2}%", c.front_position, c.rear_position, c.achieved_pct);
    }
    Ok(())
}

pub fn heatmap(output: Output) -> CalcResult<()> {
    let grid = distribution_grid();

    if output.json {
        return output.print_json(&grid);
    }

    print!("R\\F  ");
    for f in &grid.front_positions {
        print!("{f:>6.1}");
    }
    println!();
    for (rear, row) in grid.rear_positions.iter().zip(&grid.cells) {
        print!("{rear:>4.1} ");
        for pct in row {
            print!("{pct:>6.2}");
        }
        println!();
    }
    println!();
    println!("min {:.2}%  max {:.2}%", grid.min(), grid.max());
    Ok(())
}

pub fn wing(position: Option<u8>, output: Output) -> CalcResult<()> {
    match position {
        Some(position) => {
            let balance = wing_balance_pct(position)?;
            if output.json {
                return output.print_json(&serde_json::json!({ "position": position, "balance_pct": balance }));
            }
            println!("P{position}: {balance:+.1}%");
        }
        None => {
            if output.json {
                return output.print_json(&WING_BALANCE_TABLE);
            }
            for entry in WING_BALANCE_TABLE {
                println!("{:<4} {:+.1}%", entry.label(), entry.balance_pct);
            }
        }
    }
    Ok(())
}

pub fn report(sessions_path: &Path, out: &Path, settings: &ExportSettings, output: Output) -> CalcResult<()> {
    let inputs: Vec<SessionInput> = read_json(sessions_path)?;

    let mut store = SessionStore::new();
    for input in inputs {
        store.add(input);
    }

    let outcome = store.export_report(out, settings)?;

    if output.json {
        return output.print_json(&outcome);
    }

    if outcome.fell_back {
        println!(
            "Spreadsheet export unavailable; wrote CSV instead: {}",
            outcome.path.display()
        );
    } else {
        println!("Report saved to {}", outcome.path.display());
    }
    println!("{} session(s) exported", outcome.rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_pair() {
        assert_eq!(positions_pair("front", &[2.0, 2.5]).unwrap(), [2.0, 2.5]);
        let err = positions_pair("rear", &[2.0]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_report_from_sessions_file() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = dir.path().join("sessions.json");
        fs::write(
            &sessions,
            r#"[
                { "info": { "session_name": "FP1" },
                  "pressures": { "target": { "FL": 29.0 }, "cold": { "FL": 28.0 }, "hot": { "FL": 29.0 } },
                  "temps": { "air1": 20.0, "track1": 20.0, "air2": 20.0, "track2": 20.0 } }
            ]"#,
        )
        .unwrap();
        let out = dir.path().join("report.csv");

        report(&sessions, &out, &ExportSettings::default(), Output { json: true }).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("session_name,"));
        assert!(text.lines().count() == 2);
    }

    #[test]
    fn test_report_with_no_sessions_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = dir.path().join("sessions.json");
        fs::write(&sessions, "[]").unwrap();
        let err = report(&sessions, &dir.path().join("r.csv"), &ExportSettings::default(), Output { json: false })
            .unwrap_err();
        assert_eq!(err, CalcError::NothingToExport);
    }

    #[test]
    fn test_search_rejects_negative_tolerance() {
        assert!(search(19.1, -1.0, Output { json: true }).is_err());
    }
}
