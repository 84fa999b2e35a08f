//! Grid engine events relayed back into the project state.
//!
//! The JS host listens to the engine and forwards the interesting events as
//! tagged objects, e.g. `{ "type": "columnMoved", "sheetId": "...",
//! "fromIndex": 0, "toIndex": 2 }`.

use serde::{Deserialize, Serialize};

use crate::hyperlinks::sheet_id_from_url;
use crate::store::mutation;
use crate::types::ProjectState;

/// An edit or navigation made in the grid engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// A header cell was edited.
    #[serde(rename_all = "camelCase")]
    ColumnRenamed {
        sheet_id: String,
        column_index: usize,
        /// Id from the engine's column metadata. Preferred over the index.
        #[serde(default)]
        column_id: Option<String>,
        title: String,
    },
    /// A column was dragged to a new position.
    #[serde(rename_all = "camelCase")]
    ColumnMoved {
        sheet_id: String,
        from_index: usize,
        to_index: usize,
    },
    /// The user switched sheet tabs.
    #[serde(rename_all = "camelCase")]
    SheetActivated { sheet_id: String },
    /// A hyperlink cell was clicked.
    HyperlinkClicked { url: String },
}

/// Apply a grid event to the state.
///
/// Renames to a blank or unchanged title and moves onto the same index are
/// dropped, as are links that don't address a sheet.
#[must_use]
pub fn apply_grid_event(state: &ProjectState, event: &GridEvent) -> ProjectState {
    match event {
        GridEvent::ColumnRenamed {
            sheet_id,
            column_index,
            column_id,
            title,
        } => {
            let title = title.trim();
            let Some(sheet) = state.sheet(sheet_id) else {
                return state.clone();
            };
            let column = match column_id {
                Some(id) => sheet.column(id),
                None => sheet.columns.get(*column_index),
            };
            match column {
                Some(c) if !title.is_empty() && c.title != title => {
                    mutation::rename_column(state, sheet_id, &c.id, title)
                }
                _ => state.clone(),
            }
        }
        GridEvent::ColumnMoved {
            sheet_id,
            from_index,
            to_index,
        } => {
            if from_index == to_index {
                return state.clone();
            }
            mutation::move_column(state, sheet_id, *from_index, *to_index)
        }
        GridEvent::SheetActivated { sheet_id } => mutation::set_active_sheet(state, sheet_id),
        GridEvent::HyperlinkClicked { url } => match sheet_id_from_url(url) {
            Some(sheet_id) => mutation::set_active_sheet(state, sheet_id),
            None => {
                tracing::debug!(%url, "ignoring external hyperlink");
                state.clone()
            }
        },
    }
}
