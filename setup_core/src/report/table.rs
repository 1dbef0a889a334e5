//! Report table assembly.
//!
//! Turns stored sessions into a rectangular table: one row per session, raw
//! columns first (in first-seen order), then the twelve calculated columns
//! grouped by corner.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::calculations::pressure::{correct_all, output_columns};
use crate::corners::Corner;
use crate::session::{FieldValue, SessionRecord};

/// The twelve calculated column names in export order:
/// `new_cold_FL, corr_air_FL, corr_track_FL, new_cold_FR, ...`.
pub fn calculated_columns() -> Vec<String> {
    Corner::ALL.iter().flat_map(|c| output_columns(*c)).collect()
}

/// Sessions flattened into rows and columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    /// `rows[i][j]` is the value of `columns[j]` for session `i`
    pub rows: Vec<Vec<FieldValue>>,
}

impl ReportTable {
    /// Build the table for a set of sessions, including calculated columns.
    pub fn from_records(records: &[SessionRecord]) -> Self {
        let flattened: Vec<Vec<(String, FieldValue)>> = records.iter().map(flatten_with_calculations).collect();

        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for row in &flattened {
            for (name, _) in row {
                if seen.insert(name.clone()) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = flattened
            .into_iter()
            .map(|row| {
                let mut by_name: HashMap<String, FieldValue> = row.into_iter().collect();
                columns
                    .iter()
                    .map(|c| by_name.remove(c).unwrap_or(FieldValue::Missing))
                    .collect()
            })
            .collect();

        let mut table = ReportTable { columns, rows };
        table.order_calculated_last();
        table
    }

    /// Keep non-calculated columns in place, then the calculated ones in
    /// corner order.
    fn order_calculated_last(&mut self) {
        let calculated = calculated_columns();
        let mut order: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !calculated.contains(&self.columns[i]))
            .collect();
        order.extend(calculated.iter().filter_map(|name| self.column_index(name)));

        self.columns = order.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = order.iter().map(|&i| row[i].clone()).collect();
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&FieldValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn flatten_with_calculations(record: &SessionRecord) -> Vec<(String, FieldValue)> {
    let mut fields = record.raw_fields();
    let input = record.correction_input();
    for (corner, out) in correct_all(&input.readings, &input.temps).iter() {
        let [new_cold, corr_air, corr_track] = output_columns(corner);
        fields.push((new_cold, FieldValue::Number(out.new_cold_psi)));
        fields.push((corr_air, FieldValue::Number(out.corr_air_psi)));
        fields.push((corr_track, FieldValue::Number(out.corr_track_psi)));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corners::PerCorner;
    use crate::session::{CarSetup, PressureInputs, SessionInfo, SessionStore, TemperatureInputs};

    fn store_with_sessions(n: usize) -> SessionStore {
        let mut store = SessionStore::new();
        for i in 0..n {
            let pressures = PressureInputs {
                target: PerCorner::splat(Some(29.0)),
                cold: PerCorner::splat(Some(28.0)),
                hot: PerCorner::splat(Some(29.0)),
            };
            let temps = TemperatureInputs {
                air1: Some(20.0),
                track1: Some(20.0),
                air2: Some(20.0),
                track2: Some(20.0),
            };
            store.new_session(SessionInfo::named(format!("S{i}")), pressures, temps, CarSetup::default());
        }
        store
    }

    #[test]
    fn test_calculated_column_order() {
        let expected = [
            "new_cold_FL", "corr_air_FL", "corr_track_FL",
            "new_cold_FR", "corr_air_FR", "corr_track_FR",
            "new_cold_RL", "corr_air_RL", "corr_track_RL",
            "new_cold_RR", "corr_air_RR", "corr_track_RR",
        ];
        assert_eq!(calculated_columns(), expected);
    }

    #[test]
    fn test_last_twelve_columns_are_calculated() {
        let table = ReportTable::from_records(&store_with_sessions(3).sessions());
        let n = table.columns.len();
        assert_eq!(&table.columns[n - 12..], calculated_columns().as_slice());
        assert_eq!(table.columns[0], "session_name");
        assert_eq!(table.row_count(), 3);
        assert!(table.rows.iter().all(|r| r.len() == n));
    }

    #[test]
    fn test_calculated_values_attached() {
        let table = ReportTable::from_records(&store_with_sessions(1).sessions());
        for name in calculated_columns() {
            let values = table.column(&name).unwrap();
            assert_eq!(values, vec![&FieldValue::Number(28.0)], "{name}");
        }
    }

    #[test]
    fn test_missing_inputs_still_produce_all_calculations() {
        let mut store = SessionStore::new();
        store.new_session(
            SessionInfo::named("empty"),
            PressureInputs::default(),
            TemperatureInputs::default(),
            CarSetup::default(),
        );
        let table = ReportTable::from_records(&store.sessions());
        for name in calculated_columns() {
            let values = table.column(&name).unwrap();
            assert_eq!(values, vec![&FieldValue::Number(0.0)], "{name}");
        }
        assert_eq!(table.column("cold_FL").unwrap(), vec![&FieldValue::Missing]);
    }

    #[test]
    fn test_reorder_moves_calculated_columns_behind_raw() {
        let mut table = ReportTable {
            columns: vec!["corr_air_FL".into(), "session_name".into(), "new_cold_FL".into(), "wing".into()],
            rows: vec![vec![
                FieldValue::Number(1.0),
                FieldValue::Text("S".into()),
                FieldValue::Number(2.0),
                FieldValue::Number(6.0),
            ]],
        };
        table.order_calculated_last();
        assert_eq!(table.columns, vec!["session_name", "wing", "new_cold_FL", "corr_air_FL"]);
        assert_eq!(
            table.rows[0],
            vec![
                FieldValue::Text("S".into()),
                FieldValue::Number(6.0),
                FieldValue::Number(2.0),
                FieldValue::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_empty_records() {
        let table = ReportTable::from_records(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }
}
