//! # Settings
//!
//! User-tunable options for exports and the setup search. Settings are plain
//! JSON; every field has a default, so a settings file only needs the keys it
//! changes.
//!
//! ```json
//! {
//!   "export": { "delimiter": ";", "decimal_comma": true },
//!   "search": { "default_tolerance_pct": 1.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Root settings container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        Self::from_json(&contents).map_err(|e| match e {
            CalcError::SerializationError { reason } => {
                CalcError::serialization(format!("Invalid settings in {}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    /// Semicolon-delimited text with decimal commas, as spreadsheet tools
    /// in comma-decimal locales expect.
    pub fn european() -> Self {
        Settings {
            export: ExportSettings {
                delimiter: ';',
                decimal_comma: true,
                bom: true,
                ..ExportSettings::default()
            },
            ..Settings::default()
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.export.validate()?;
        self.search.validate()
    }
}

/// Report export options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Field delimiter for delimited text (single ASCII character)
    pub delimiter: char,
    /// Write numbers with `,` as the decimal separator in delimited text
    pub decimal_comma: bool,
    /// Start delimited text with a UTF-8 byte order mark
    pub bom: bool,
    /// Worksheet name for spreadsheet reports
    pub sheet_name: String,
    /// Size spreadsheet columns to their contents
    pub autofit_columns: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            delimiter: ',',
            decimal_comma: false,
            bom: false,
            sheet_name: "Tire Data".to_string(),
            autofit_columns: true,
        }
    }
}

impl ExportSettings {
    pub fn validate(&self) -> CalcResult<()> {
        let d = self.delimiter;
        let control = d.is_ascii_control() && d != '\t';
        if !d.is_ascii() || d.is_ascii_alphanumeric() || d == '"' || control {
            return Err(CalcError::invalid_input(
                "export.delimiter",
                d.escape_default().to_string(),
                "Delimiter must be a single ASCII punctuation character, space or tab",
            ));
        }
        if self.decimal_comma && self.delimiter == ',' {
            return Err(CalcError::invalid_input(
                "export.decimal_comma",
                "true",
                "Decimal comma needs a delimiter other than ','",
            ));
        }
        if self.sheet_name.trim().is_empty() || self.sheet_name.chars().count() > 31 {
            return Err(CalcError::invalid_input(
                "export.sheet_name",
                self.sheet_name.clone(),
                "Sheet name must be 1-31 characters",
            ));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV writer expects.
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }
}

/// Setup search defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Tolerance used when the caller gives none, percentage points
    pub default_tolerance_pct: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            default_tolerance_pct: 0.5,
        }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.default_tolerance_pct.is_finite() || self.default_tolerance_pct < 0.0 {
            return Err(CalcError::invalid_input(
                "search.default_tolerance_pct",
                self.default_tolerance_pct.to_string(),
                "Tolerance must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.export.delimiter, ',');
        assert!(!settings.export.decimal_comma);
        assert_eq!(settings.export.sheet_name, "Tire Data");
        assert_eq!(settings.search.default_tolerance_pct, 0.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "export": { "delimiter": ";" } }"#).unwrap();
        assert_eq!(settings.export.delimiter, ';');
        assert_eq!(settings.export.sheet_name, "Tire Data");
        assert_eq!(settings.search, SearchSettings::default());
    }

    #[test]
    fn test_european_style() {
        let settings = Settings::european();
        assert_eq!(settings.export.delimiter_byte(), b';');
        assert!(settings.export.decimal_comma);
        assert!(settings.export.bom);
        assert!(settings.validate().is_ok());
        assert!(!Settings::default().export.bom);
    }

    #[test]
    fn test_control_delimiters_rejected() {
        for delimiter in ['\n', '\r', '\0', '\x1f'] {
            let export = ExportSettings {
                delimiter,
                ..ExportSettings::default()
            };
            let err = export.validate().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{delimiter:?}");
        }
        for delimiter in ['\t', ' ', ';', '|'] {
            let export = ExportSettings {
                delimiter,
                ..ExportSettings::default()
            };
            assert!(export.validate().is_ok(), "{delimiter:?}");
        }
        assert!(Settings::from_json(r#"{ "export": { "delimiter": "\n" } }"#).is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(Settings::from_json(r#"{ "export": { "decimal_comma": true } }"#).is_err());
        assert!(Settings::from_json(r#"{ "export": { "delimiter": "x" } }"#).is_err());
        assert!(Settings::from_json(r#"{ "search": { "default_tolerance_pct": -1.0 } }"#).is_err());
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "search": { "default_tolerance_pct": 1.5 } }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.search.default_tolerance_pct, 1.5);

        let missing = Settings::load(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");
    }
}
