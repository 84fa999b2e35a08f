//! Toolbar triggers and the dialog they open.
//!
//! At most one dialog is open at a time. Submitting it applies the result to
//! the store and closes it; invalid input keeps it open.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::dialog::{
    AddColumnDialog, AddDivisionDialog, BidBookDialog, Dialog, FieldError, RenameColumnDialog,
};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::store::Store;
use crate::types::{ColumnType, ProjectState, SheetKind};

/// Buttons on the toolbar.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarAction {
    AddColumn,
    AddDivision,
}

impl ToolbarAction {
    /// Parse the action name used by the JS host.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "addColumn" => Some(Self::AddColumn),
            "addDivision" => Some(Self::AddDivision),
            _ => None,
        }
    }
}

/// The dialog currently shown, with the sheet it acts on.
#[derive(Debug, Clone)]
pub enum OpenDialog {
    AddColumn {
        sheet_id: String,
        dialog: AddColumnDialog,
    },
    AddDivision(AddDivisionDialog),
    RenameColumn {
        sheet_id: String,
        dialog: RenameColumnDialog,
    },
    BidBook(BidBookDialog),
}

impl OpenDialog {
    pub fn is_valid(&self) -> bool {
        match self {
            OpenDialog::AddColumn { dialog, .. } => dialog.is_valid(),
            OpenDialog::AddDivision(dialog) => dialog.is_valid(),
            OpenDialog::RenameColumn { dialog, .. } => dialog.is_valid(),
            OpenDialog::BidBook(dialog) => dialog.is_valid(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OpenDialog::AddColumn { .. } => "addColumn",
            OpenDialog::AddDivision(_) => "addDivision",
            OpenDialog::RenameColumn { .. } => "renameColumn",
            OpenDialog::BidBook(_) => "bidBook",
        }
    }

    /// Feed one input into the dialog. Returns false for fields the dialog
    /// doesn't have, or choices it refuses.
    ///
    /// Fields:
    /// - add column: `title`, `type` (a column type key)
    /// - add division: `search`, `code`
    /// - rename column: `title`
    /// - bid book: `name`, `company`, `phone`, `email`
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        match (self, field) {
            (OpenDialog::AddColumn { dialog, .. }, "title") => dialog.set_title(value),
            (OpenDialog::AddColumn { dialog, .. }, "type") => {
                return ColumnType::from_key(value).is_some_and(|t| dialog.select_type(t));
            }
            (OpenDialog::AddDivision(dialog), "search") => dialog.set_search_term(value),
            (OpenDialog::AddDivision(dialog), "code") => return dialog.select(value),
            (OpenDialog::RenameColumn { dialog, .. }, "title") => dialog.set_title(value),
            (OpenDialog::BidBook(dialog), "name") => dialog.set_name(value),
            (OpenDialog::BidBook(dialog), "company") => dialog.set_company(value),
            (OpenDialog::BidBook(dialog), "phone") => dialog.set_phone(value),
            (OpenDialog::BidBook(dialog), "email") => dialog.set_email(value),
            _ => return false,
        }
        true
    }

    /// Snapshot for the host to render.
    pub fn view(&self) -> DialogView {
        let mut fields = BTreeMap::new();
        let mut options = Vec::new();
        let mut selected = None;
        let errors = match self {
            OpenDialog::AddColumn { dialog, .. } => {
                fields.insert("title", dialog.title().to_string());
                options = dialog
                    .choices()
                    .into_iter()
                    .map(|(t, label)| DialogOption {
                        value: t.key().to_string(),
                        label,
                    })
                    .collect();
                selected = dialog.column_type().map(|t| t.key().to_string());
                dialog.errors()
            }
            OpenDialog::AddDivision(dialog) => {
                fields.insert("search", dialog.search_term().to_string());
                options = dialog
                    .filtered()
                    .into_iter()
                    .map(|c| DialogOption {
                        value: c.code.clone(),
                        label: format!("{} - {}", c.code, c.trade),
                    })
                    .collect();
                selected = dialog.selected().map(|c| c.code.clone());
                dialog.errors()
            }
            OpenDialog::RenameColumn { dialog, .. } => {
                fields.insert("title", dialog.title().to_string());
                dialog.errors()
            }
            OpenDialog::BidBook(dialog) => {
                let input = dialog.input();
                fields.insert("name", input.name.clone());
                fields.insert("company", input.company.clone());
                fields.insert("phone", input.phone.clone());
                fields.insert("email", input.email.clone());
                dialog.errors()
            }
        };

        DialogView {
            kind: self.name(),
            valid: self.is_valid(),
            errors,
            fields,
            options,
            selected,
        }
    }
}

/// A selectable entry in a dialog list.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DialogOption {
    pub value: String,
    pub label: String,
}

/// What the host needs to draw the open dialog.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DialogView {
    pub kind: &'static str,
    pub valid: bool,
    pub errors: Vec<FieldError>,
    pub fields: BTreeMap<&'static str, String>,
    pub options: Vec<DialogOption>,
    pub selected: Option<String>,
}

#[derive(Debug, Default)]
pub struct Toolbar {
    open: Option<OpenDialog>,
}

impl Toolbar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions offered on a sheet of this kind. Divisions are only added from
    /// the budget summary.
    #[must_use]
    pub fn actions(kind: SheetKind) -> Vec<ToolbarAction> {
        match kind {
            SheetKind::Budget => vec![ToolbarAction::AddColumn, ToolbarAction::AddDivision],
            SheetKind::Division => vec![ToolbarAction::AddColumn],
        }
    }

    pub fn dialog(&self) -> Option<&OpenDialog> {
        self.open.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut OpenDialog> {
        self.open.as_mut()
    }

    /// Open the dialog behind a toolbar button for the active sheet.
    /// Returns false when the action isn't offered there.
    pub fn open(&mut self, action: ToolbarAction, state: &ProjectState) -> bool {
        let Some(sheet) = state.active_sheet() else {
            return false;
        };
        if !Self::actions(sheet.kind).contains(&action) {
            tracing::debug!(?action, sheet_id = %sheet.id, "action not offered on this sheet");
            return false;
        }
        self.open = Some(match action {
            ToolbarAction::AddColumn => OpenDialog::AddColumn {
                sheet_id: sheet.id.clone(),
                dialog: AddColumnDialog::new(sheet.kind),
            },
            ToolbarAction::AddDivision => OpenDialog::AddDivision(AddDivisionDialog::new()),
        });
        true
    }

    /// Open the rename dialog from a column header.
    pub fn open_rename(&mut self, state: &ProjectState, sheet_id: &str, column_id: &str) -> bool {
        let Some(column) = state.sheet(sheet_id).and_then(|s| s.column(column_id)) else {
            return false;
        };
        self.open = Some(OpenDialog::RenameColumn {
            sheet_id: sheet_id.to_string(),
            dialog: RenameColumnDialog::new(column),
        });
        true
    }

    /// Open the bid book of a subcontractor column.
    pub fn open_bid_book(&mut self, state: &ProjectState, sheet_id: &str, column_id: &str) -> bool {
        let Some(sheet) = state.sheet(sheet_id) else {
            return false;
        };
        let is_subcontractor = sheet
            .column(column_id)
            .is_some_and(|c| c.column_type == ColumnType::DivisionSubcontractor);
        if !is_subcontractor {
            return false;
        }
        self.open = Some(OpenDialog::BidBook(BidBookDialog::new(
            sheet_id,
            column_id,
            sheet.bid_book(column_id),
        )));
        true
    }

    /// Close without submitting.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Submit the open dialog into the store.
    ///
    /// Returns whether the state changed. With no dialog open, or invalid
    /// input, nothing happens and the dialog stays open.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut Store<S>) -> Result<bool> {
        let Some(open) = self.open.as_mut() else {
            return Ok(false);
        };

        let changed = match open {
            OpenDialog::AddColumn { sheet_id, dialog } => match dialog.submit() {
                Some((title, column_type)) => store.add_column(sheet_id, &title, column_type)?,
                None => return Ok(false),
            },
            OpenDialog::AddDivision(dialog) => match dialog.submit() {
                Some((code, trade)) => store.add_division(&code, &trade)?,
                None => return Ok(false),
            },
            OpenDialog::RenameColumn { sheet_id, dialog } => match dialog.submit() {
                Some((column_id, title)) => store.rename_column(sheet_id, &column_id, &title)?,
                None => return Ok(false),
            },
            OpenDialog::BidBook(dialog) => match dialog.submit() {
                Some(info) => {
                    let (sheet_id, column_id) =
                        (dialog.sheet_id().to_string(), dialog.column_id().to_string());
                    store.set_bid_book(&sheet_id, &column_id, info)?
                }
                None => return Ok(false),
            },
        };

        self.open = None;
        Ok(changed)
    }
}
