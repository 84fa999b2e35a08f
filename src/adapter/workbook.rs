//! Workbook data handed to the grid engine.
//!
//! The engine takes one JSON document per workbook. Each project sheet becomes
//! an engine worksheet: row 0 is the header (column titles, bold), rows 1.. are
//! the data rows, one engine column per project column in display order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::GridConfig;
use crate::hyperlinks::is_hyperlink_formula;
use crate::types::{CellValue, Column, ColumnType, ProjectState, Row, Sheet};

/// Cell value type tag understood by the engine.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    #[serde(rename = "s")]
    String,
    #[serde(rename = "n")]
    Number,
    #[serde(rename = "f")]
    Formula,
}

/// Cell style. Only the header uses one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    /// Bold (1) or not (0).
    pub bl: u8,
}

impl CellStyle {
    #[must_use]
    pub fn bold() -> Self {
        CellStyle { bl: 1 }
    }
}

/// One engine cell.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GridCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<CellValue>,
    pub t: CellKind,
    /// Formula text for formula cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<CellStyle>,
}

impl GridCell {
    fn text(s: impl Into<String>) -> Self {
        GridCell {
            v: Some(CellValue::Text(s.into())),
            t: CellKind::String,
            f: None,
            s: None,
        }
    }

    fn number(n: f64) -> Self {
        GridCell {
            v: Some(CellValue::Number(n)),
            t: CellKind::Number,
            f: None,
            s: None,
        }
    }

    fn formula(formula: &str) -> Self {
        GridCell {
            v: None,
            t: CellKind::Formula,
            f: Some(formula.to_string()),
            s: None,
        }
    }

    fn header(title: &str) -> Self {
        GridCell {
            s: Some(CellStyle::bold()),
            ..GridCell::text(title)
        }
    }

    /// Convert a stored value for a column of the given type.
    ///
    /// - missing or blank -> empty string cell
    /// - `=HYPERLINK(...)` text -> formula cell
    /// - numeric columns -> number cell when the value is (or parses as) a number
    /// - everything else -> string cell
    #[must_use]
    pub fn from_value(value: Option<&CellValue>, column_type: ColumnType) -> Self {
        match value {
            None => GridCell::text(""),
            Some(v) if v.is_blank() => GridCell::text(""),
            Some(CellValue::Text(s)) if is_hyperlink_formula(s) => GridCell::formula(s),
            Some(CellValue::Number(n)) if column_type.is_numeric() => GridCell::number(*n),
            Some(CellValue::Text(s)) if column_type.is_numeric() => match s.trim().parse::<f64>() {
                Ok(n) => GridCell::number(n),
                Err(_) => GridCell::text(s.as_str()),
            },
            Some(other) => GridCell::text(other.to_text()),
        }
    }
}

/// Per-column metadata the engine carries along, so its events can be mapped
/// back to project columns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnData {
    /// Width in pixels.
    pub w: u32,
    pub column_id: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Freeze {
    pub x_split: u32,
    pub y_split: u32,
    pub start_row: u32,
    pub start_column: u32,
}

/// One engine worksheet.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetData {
    pub id: String,
    pub name: String,
    pub row_count: u32,
    pub column_count: u32,
    pub default_column_width: u32,
    pub default_row_height: u32,
    /// Cells keyed by row, then column (both 0-based).
    pub cell_data: BTreeMap<u32, BTreeMap<u32, GridCell>>,
    pub column_data: BTreeMap<u32, ColumnData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze: Option<Freeze>,
}

impl WorksheetData {
    /// Cell at `(row, col)`.
    pub fn cell(&self, row: u32, col: u32) -> Option<&GridCell> {
        self.cell_data.get(&row).and_then(|r| r.get(&col))
    }
}

/// The whole engine workbook.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookData {
    pub id: String,
    pub name: String,
    pub app_version: String,
    pub locale: String,
    pub sheet_order: Vec<String>,
    pub sheets: BTreeMap<String, WorksheetData>,
    pub styles: BTreeMap<String, CellStyle>,
}

/// Build the engine workbook for a project.
#[must_use]
pub fn workbook_from_state(state: &ProjectState, config: &GridConfig) -> WorkbookData {
    let sheets: BTreeMap<String, WorksheetData> = state
        .sheets_in_order()
        .map(|sheet| (sheet.id.clone(), worksheet_from_sheet(sheet, config)))
        .collect();

    tracing::debug!(
        project_id = %state.project_id(),
        sheets = sheets.len(),
        "built workbook data"
    );

    WorkbookData {
        id: state.project_id().to_string(),
        name: config.workbook_name.clone(),
        app_version: config.app_version.clone(),
        locale: config.locale.clone(),
        sheet_order: state.metadata.sheet_order.clone(),
        sheets,
        styles: BTreeMap::new(),
    }
}

/// Build one engine worksheet.
#[must_use]
pub fn worksheet_from_sheet(sheet: &Sheet, config: &GridConfig) -> WorksheetData {
    let mut cell_data: BTreeMap<u32, BTreeMap<u32, GridCell>> = BTreeMap::new();

    let header: BTreeMap<u32, GridCell> = indexed(&sheet.columns)
        .map(|(col, column)| (col, GridCell::header(&column.title)))
        .collect();
    cell_data.insert(0, header);

    for (row_idx, row) in indexed(&sheet.data) {
        cell_data.insert(row_idx + 1, data_row(&sheet.columns, row));
    }

    let column_data = indexed(&sheet.columns)
        .map(|(col, column)| {
            (
                col,
                ColumnData {
                    w: column.column_type.default_width(),
                    column_id: column.id.clone(),
                    column_type: column.column_type,
                    title: column.title.clone(),
                },
            )
        })
        .collect();

    let data_rows = to_u32(sheet.data.len());
    let row_count = config
        .min_row_count
        .max(data_rows.saturating_add(config.trailing_blank_rows));

    WorksheetData {
        id: sheet.id.clone(),
        name: sheet.name.clone(),
        row_count,
        column_count: to_u32(sheet.columns.len()),
        default_column_width: config.default_column_width,
        default_row_height: config.default_row_height,
        cell_data,
        column_data,
        freeze: config.freeze_header.then_some(Freeze {
            x_split: 0,
            y_split: 1,
            start_row: 1,
            start_column: 0,
        }),
    }
}

fn data_row(columns: &[Column], row: &Row) -> BTreeMap<u32, GridCell> {
    indexed(columns)
        .map(|(col, column)| {
            (
                col,
                GridCell::from_value(row.get(&column.column_type), column.column_type),
            )
        })
        .collect()
}

/// Enumerate with `u32` indices, the engine's coordinate type.
fn indexed<T>(items: &[T]) -> impl Iterator<Item = (u32, &T)> {
    (0u32..).zip(items.iter())
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
