use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Column, ColumnType, SheetKind, SubcontractorInfo};

/// Id of the budget summary sheet created with every project.
pub const BUDGET_SHEET_ID: &str = "budget-summary";

/// Display name of the budget summary sheet.
pub const BUDGET_SHEET_NAME: &str = "Budget Summary";

/// Id of the division sheet for a cost code.
#[must_use]
pub fn division_sheet_id(code: &str) -> String {
    format!("division-{code}")
}

/// A single cell value in a data row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// True for the empty string. Numbers are never blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Text form of the value, as the user would type it.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// A data row: one value per column type.
pub type Row = BTreeMap<ColumnType, CellValue>;

/// A sheet of the project workbook.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SheetKind,
    pub columns: Vec<Column>,
    pub data: Vec<Row>,
    /// Subcontractor details keyed by the id of a subcontractor column.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bid_books: BTreeMap<String, SubcontractorInfo>,
}

impl Sheet {
    /// The budget summary sheet a new project starts with.
    #[must_use]
    pub fn budget_summary() -> Self {
        Sheet {
            id: BUDGET_SHEET_ID.to_string(),
            name: BUDGET_SHEET_NAME.to_string(),
            kind: SheetKind::Budget,
            columns: vec![
                Column::new("Cost Code", ColumnType::BudgetCostCode),
                Column::new("Division", ColumnType::BudgetDivision),
                Column::new("Details", ColumnType::BudgetDetails),
                Column::new("Cost", ColumnType::BudgetCost),
                Column::new("Notes", ColumnType::BudgetNotes),
            ],
            data: Vec::new(),
            bid_books: BTreeMap::new(),
        }
    }

    /// An empty division sheet for `code`.
    #[must_use]
    pub fn division(code: &str, name: &str) -> Self {
        Sheet {
            id: division_sheet_id(code),
            name: format!("{code} - {name}"),
            kind: SheetKind::Division,
            columns: vec![
                Column::new("Line Items", ColumnType::DivisionLineItems),
                Column::new("Units", ColumnType::DivisionUnits),
                Column::new("Required Quantity", ColumnType::DivisionRequiredQuantity),
                Column::new("Subcontractor", ColumnType::DivisionSubcontractor),
            ],
            data: Vec::new(),
            bid_books: BTreeMap::new(),
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Position of a column in display order.
    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Bid book attached to a column, if any.
    pub fn bid_book(&self, column_id: &str) -> Option<&SubcontractorInfo> {
        self.bid_books.get(column_id)
    }
}
