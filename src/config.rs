//! Grid presentation settings.
//!
//! Passed from JavaScript as a plain object; every field is optional.

use serde::{Deserialize, Serialize};

/// How sheets are laid out for the grid engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Workbook title shown by the engine.
    pub workbook_name: String,
    /// Version string the engine expects in workbook data.
    pub app_version: String,
    /// Engine locale identifier.
    pub locale: String,
    /// Column width (px) used when a column type has no width of its own.
    pub default_column_width: u32,
    /// Row height (px).
    pub default_row_height: u32,
    /// Every sheet shows at least this many rows.
    pub min_row_count: u32,
    /// Blank rows kept below the last data row.
    pub trailing_blank_rows: u32,
    /// Keep the header row visible while scrolling.
    pub freeze_header: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            workbook_name: "Project Budget".to_string(),
            app_version: "3.0.0-alpha".to_string(),
            locale: "enUS".to_string(),
            default_column_width: 120,
            default_row_height: 30,
            min_row_count: 100,
            trailing_blank_rows: 10,
            freeze_header: true,
        }
    }
}

impl GridConfig {
    /// Parse from JSON, filling in defaults for missing fields.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{ "minRowCount": 20 }"#).unwrap();
        assert_eq!(config.min_row_count, 20);
        assert_eq!(config.default_column_width, 120);
        assert!(config.freeze_header);
    }
}
