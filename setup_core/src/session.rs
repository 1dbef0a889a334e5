//! # Session Records
//!
//! `SessionStore` is the in-memory, append-only log of a test day: one
//! [`SessionRecord`] per run, holding the raw inputs (session info, tire
//! pressures, temperatures, car setup) and a creation timestamp.
//!
//! Records never carry calculated values. The report exporter derives those at
//! export time, so a record is always a faithful copy of what was entered.
//!
//! ## Structure
//!
//! ```text
//! SessionRecord
//! ├── id: Uuid
//! ├── info: SessionInfo (name, start/end "HH:MM", observations)
//! ├── pressures: PressureInputs (target / cold / hot, per corner, psi)
//! ├── temps: TemperatureInputs (air1, track1, air2, track2, °C)
//! ├── setup: CarSetup (4 ARB blade positions + wing)
//! └── created: DateTime<Utc>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use setup_core::session::{SessionStore, SessionInfo, PressureInputs, TemperatureInputs, CarSetup};
//!
//! let mut store = SessionStore::new();
//! let info = SessionInfo::named("FP1");
//! store.new_session(info, PressureInputs::default(), TemperatureInputs::default(), CarSetup::default());
//!
//! let sessions = store.sessions();
//! assert_eq!(sessions.len(), 1);
//! assert_eq!(sessions[0].info.session_name, "FP1");
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::pressure::{CornerReading, PressureCorrectionInput, TemperatureSample};
use crate::corners::{Corner, PerCorner};
use crate::errors::CalcResult;
use crate::report::{export_report, ExportOutcome};
use crate::settings::ExportSettings;

/// Identifier assigned to each stored session
pub type SessionId = Uuid;

/// Hot pressure assumed when a record has none (keeps the correction finite)
pub const DEFAULT_HOT_PSI: f64 = 1.0;

/// Descriptive session metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInfo {
    pub session_name: String,
    /// Start time, "HH:MM"
    pub start_time: String,
    /// End time, "HH:MM"
    pub end_time: String,
    /// Free-text notes
    pub observations: String,
}

impl SessionInfo {
    pub fn named(session_name: impl Into<String>) -> Self {
        SessionInfo {
            session_name: session_name.into(),
            ..Default::default()
        }
    }
}

/// Pressure measurement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressurePhase {
    Target,
    Cold,
    Hot,
}

impl PressurePhase {
    pub const ALL: [PressurePhase; 3] = [PressurePhase::Target, PressurePhase::Cold, PressurePhase::Hot];

    /// Column prefix (`target`, `cold`, `hot`)
    pub fn prefix(&self) -> &'static str {
        match self {
            PressurePhase::Target => "target",
            PressurePhase::Cold => "cold",
            PressurePhase::Hot => "hot",
        }
    }
}

/// Raw tire pressures for a session, psi. Unset values stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureInputs {
    pub target: PerCorner<Option<f64>>,
    pub cold: PerCorner<Option<f64>>,
    pub hot: PerCorner<Option<f64>>,
}

impl PressureInputs {
    pub fn phase(&self, phase: PressurePhase) -> &PerCorner<Option<f64>> {
        match phase {
            PressurePhase::Target => &self.target,
            PressurePhase::Cold => &self.cold,
            PressurePhase::Hot => &self.hot,
        }
    }

    /// Set all three phases for one corner.
    pub fn with_corner(mut self, corner: Corner, target: f64, cold: f64, hot: f64) -> Self {
        *self.target.get_mut(corner) = Some(target);
        *self.cold.get_mut(corner) = Some(cold);
        *self.hot.get_mut(corner) = Some(hot);
        self
    }
}

/// Raw temperatures for a session, °C.
///
/// `air1`/`track1` are taken at the first measurement point, `air2`/`track2`
/// at the second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureInputs {
    pub air1: Option<f64>,
    pub track1: Option<f64>,
    pub air2: Option<f64>,
    pub track2: Option<f64>,
}

/// Car setup for a session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSetup {
    pub arb_fl: Option<f64>,
    pub arb_fr: Option<f64>,
    pub arb_rl: Option<f64>,
    pub arb_rr: Option<f64>,
    pub wing: Option<f64>,
}

/// Everything a host collects for one session.
///
/// ## JSON Example
///
/// ```json
/// {
///   "info": { "session_name": "FP1", "start_time": "10:00", "end_time": "10:30" },
///   "pressures": {
///     "target": { "FL": 28.5, "FR": 28.5, "RL": 28.5, "RR": 28.5 },
///     "cold":   { "FL": 25.0, "FR": 25.5, "RL": 24.8, "RR": 25.2 },
///     "hot":    { "FL": 32.0, "FR": 31.8, "RL": 32.1, "RR": 31.9 }
///   },
///   "temps": { "air1": 30.0, "track1": 35.0, "air2": 32.0, "track2": 36.5 },
///   "setup": { "arb_fl": 2.0, "arb_fr": 2.0, "arb_rl": 6.0, "arb_rr": 6.0, "wing": 6.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInput {
    pub info: SessionInfo,
    pub pressures: PressureInputs,
    pub temps: TemperatureInputs,
    pub setup: CarSetup,
}

impl SessionInput {
    /// The correction request this input describes, with missing values defaulted.
    pub fn correction_input(&self) -> PressureCorrectionInput {
        correction_input(&self.pressures, &self.temps)
    }
}

/// A value in a flattened record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Number)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One stored session. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub info: SessionInfo,
    pub pressures: PressureInputs,
    pub temps: TemperatureInputs,
    pub setup: CarSetup,
    pub created: DateTime<Utc>,
}

impl SessionRecord {
    /// Per-corner readings with missing pressures defaulted (hot defaults to 1.0).
    pub fn corner_readings(&self) -> PerCorner<CornerReading> {
        corner_readings(&self.pressures)
    }

    /// Temperature sample with missing temperatures defaulted to 0 °C.
    pub fn temperature_sample(&self) -> TemperatureSample {
        temperature_sample(&self.temps)
    }

    pub fn correction_input(&self) -> PressureCorrectionInput {
        correction_input(&self.pressures, &self.temps)
    }

    /// Flatten into `(column, value)` pairs in report order.
    pub fn raw_fields(&self) -> Vec<(String, FieldValue)> {
        let mut fields: Vec<(String, FieldValue)> = vec![
            ("session_name".into(), self.info.session_name.as_str().into()),
            ("start_time".into(), self.info.start_time.as_str().into()),
            ("end_time".into(), self.info.end_time.as_str().into()),
            ("observations".into(), self.info.observations.as_str().into()),
        ];

        for phase in PressurePhase::ALL {
            for (corner, value) in self.pressures.phase(phase).iter() {
                fields.push((format!("{}_{}", phase.prefix(), corner), (*value).into()));
            }
        }

        fields.extend([
            ("air1".to_string(), self.temps.air1.into()),
            ("track1".to_string(), self.temps.track1.into()),
            ("air2".to_string(), self.temps.air2.into()),
            ("track2".to_string(), self.temps.track2.into()),
            ("arb_fl".to_string(), self.setup.arb_fl.into()),
            ("arb_fr".to_string(), self.setup.arb_fr.into()),
            ("arb_rl".to_string(), self.setup.arb_rl.into()),
            ("arb_rr".to_string(), self.setup.arb_rr.into()),
            ("wing".to_string(), self.setup.wing.into()),
            ("timestamp".to_string(), FieldValue::Text(self.created.to_rfc3339())),
        ]);
        fields
    }

    /// Look up a single flattened field by column name.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.raw_fields().into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

fn corner_readings(pressures: &PressureInputs) -> PerCorner<CornerReading> {
    PerCorner::from_fn(|corner| CornerReading {
        target_psi: pressures.target.get(corner).unwrap_or(0.0),
        cold_psi: pressures.cold.get(corner).unwrap_or(0.0),
        hot_psi: pressures.hot.get(corner).unwrap_or(DEFAULT_HOT_PSI),
    })
}

fn temperature_sample(temps: &TemperatureInputs) -> TemperatureSample {
    TemperatureSample {
        air_before_c: temps.air1.unwrap_or(0.0),
        track_before_c: temps.track1.unwrap_or(0.0),
        air_after_c: temps.air2.unwrap_or(0.0),
        track_after_c: temps.track2.unwrap_or(0.0),
    }
}

fn correction_input(pressures: &PressureInputs, temps: &TemperatureInputs) -> PressureCorrectionInput {
    PressureCorrectionInput {
        readings: corner_readings(pressures),
        temps: temperature_sample(temps),
    }
}

/// Append-only, in-memory session log.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<SessionRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Record a new session, stamped with the current time.
    ///
    /// No validation is done; missing values are defaulted where they are used.
    pub fn new_session(
        &mut self,
        info: SessionInfo,
        pressures: PressureInputs,
        temps: TemperatureInputs,
        setup: CarSetup,
    ) -> SessionId {
        let record = SessionRecord {
            id: Uuid::new_v4(),
            info,
            pressures,
            temps,
            setup,
            created: Utc::now(),
        };
        let id = record.id;
        tracing::info!(session = %record.info.session_name, %id, "session recorded");
        self.sessions.push(record);
        id
    }

    /// Record a session from a bundled input.
    pub fn add(&mut self, input: SessionInput) -> SessionId {
        self.new_session(input.info, input.pressures, input.temps, input.setup)
    }

    /// Snapshot of all sessions in insertion order.
    ///
    /// The returned vector is independent of the store.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.sessions.clone()
    }

    pub fn get(&self, id: &SessionId) -> Option<&SessionRecord> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Per-session values of a numeric column (e.g. `cold_FL`, `air1`), in
    /// insertion order. `None` where a session has no value.
    pub fn series(&self, field: &str) -> Vec<Option<f64>> {
        self.sessions
            .iter()
            .map(|s| s.field(field).and_then(|v| v.as_number()))
            .collect()
    }

    /// Export every stored session. See [`crate::report::export_report`].
    pub fn export_report(&self, path: &Path, settings: &ExportSettings) -> CalcResult<ExportOutcome> {
        export_report(&self.sessions, path, settings)
    }
}

/// Cloneable handle that serializes access to one [`SessionStore`].
///
/// Calculations are pure and need no locking; only appends and snapshots go
/// through the mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedSessionStore {
    inner: Arc<Mutex<SessionStore>>,
}

impl SharedSessionStore {
    pub fn new() -> Self {
        SharedSessionStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionStore> {
        // Appends are a single push, so a poisoned store is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn new_session(
        &self,
        info: SessionInfo,
        pressures: PressureInputs,
        temps: TemperatureInputs,
        setup: CarSetup,
    ) -> SessionId {
        self.lock().new_session(info, pressures, temps, setup)
    }

    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.lock().sessions()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn export_report(&self, path: &Path, settings: &ExportSettings) -> CalcResult<ExportOutcome> {
        let snapshot = self.sessions();
        export_report(&snapshot, path, settings)
    }
}
