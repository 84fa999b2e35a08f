//! Sheet adapter: project state to grid engine data, and engine events back
//! to state mutations.

pub mod events;
pub mod workbook;

pub use events::{apply_grid_event, GridEvent};
pub use workbook::{
    workbook_from_state, worksheet_from_sheet, CellKind, CellStyle, ColumnData, Freeze, GridCell,
    WorkbookData, WorksheetData,
};
