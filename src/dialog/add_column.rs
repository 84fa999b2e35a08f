use super::validation::is_present;
use super::Dialog;
use crate::types::{ColumnType, SheetKind};

/// Name a new column and pick its type. The type choices depend on the kind
/// of sheet the column goes on.
#[derive(Debug, Clone)]
pub struct AddColumnDialog {
    kind: SheetKind,
    title: String,
    column_type: Option<ColumnType>,
}

impl AddColumnDialog {
    #[must_use]
    pub fn new(kind: SheetKind) -> Self {
        AddColumnDialog {
            kind,
            title: String::new(),
            column_type: None,
        }
    }

    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// Selectable types with their labels.
    pub fn choices(&self) -> Vec<(ColumnType, String)> {
        ColumnType::for_kind(self.kind)
            .iter()
            .map(|t| (*t, t.label()))
            .collect()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Select a type. Types of the other sheet kind are refused.
    pub fn select_type(&mut self, column_type: ColumnType) -> bool {
        if column_type.kind() != self.kind {
            return false;
        }
        self.column_type = Some(column_type);
        true
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        self.column_type
    }
}

impl Dialog for AddColumnDialog {
    /// `(title, type)`
    type Output = (String, ColumnType);

    fn is_valid(&self) -> bool {
        is_present(&self.title) && self.column_type.is_some()
    }

    fn output(&self) -> Option<Self::Output> {
        if !is_present(&self.title) {
            return None;
        }
        self.column_type
            .map(|t| (self.title.trim().to_string(), t))
    }

    fn reset(&mut self) {
        self.title.clear();
        self.column_type = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn choices_follow_sheet_kind() {
        let budget = AddColumnDialog::new(SheetKind::Budget);
        assert_eq!(budget.choices().len(), 5);
        let division = AddColumnDialog::new(SheetKind::Division);
        assert_eq!(division.choices().len(), 11);
        assert!(division
            .choices()
            .iter()
            .any(|(_, label)| label == "unit cost"));
    }

    #[test]
    fn needs_title_and_type() {
        let mut dialog = AddColumnDialog::new(SheetKind::Division);
        dialog.set_title("  ");
        assert!(dialog.select_type(ColumnType::DivisionUnitCost));
        assert!(!dialog.is_valid());

        dialog.set_title(" Unit Cost ");
        assert!(!dialog.select_type(ColumnType::BudgetCost));
        let out = dialog.submit().unwrap();
        assert_eq!(out, ("Unit Cost".to_string(), ColumnType::DivisionUnitCost));
        assert_eq!(dialog.title(), "");
        assert_eq!(dialog.column_type(), None);
    }
}
