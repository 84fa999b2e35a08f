use super::validation::is_present;
use super::Dialog;
use crate::types::Column;

/// Rename a column from its header menu.
#[derive(Debug, Clone)]
pub struct RenameColumnDialog {
    column_id: String,
    current: String,
    title: String,
}

impl RenameColumnDialog {
    /// Open for `column`, pre-filled with its title.
    #[must_use]
    pub fn new(column: &Column) -> Self {
        RenameColumnDialog {
            column_id: column.id.clone(),
            current: column.title.clone(),
            title: column.title.clone(),
        }
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

impl Dialog for RenameColumnDialog {
    /// `(column_id, new_title)`
    type Output = (String, String);

    fn is_valid(&self) -> bool {
        is_present(&self.title) && self.title.trim() != self.current
    }

    fn output(&self) -> Option<Self::Output> {
        self.is_valid()
            .then(|| (self.column_id.clone(), self.title.trim().to_string()))
    }

    fn reset(&mut self) {
        self.title.clone_from(&self.current);
    }
}
