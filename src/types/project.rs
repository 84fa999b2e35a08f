use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{Sheet, BUDGET_SHEET_ID};

/// Project-level bookkeeping stored next to the sheets.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub project_id: String,
    pub active_sheet_id: String,
    /// Sheet ids in tab order. Older saves lack it; `normalize` rebuilds it.
    #[serde(default)]
    pub sheet_order: Vec<String>,
}

/// Everything the app knows about one project. This is what gets written to
/// local storage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub metadata: ProjectMetadata,
    pub sheets: BTreeMap<String, Sheet>,
}

impl ProjectState {
    /// Initial state: a single budget summary sheet, active.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        let budget = Sheet::budget_summary();
        let mut sheets = BTreeMap::new();
        sheets.insert(budget.id.clone(), budget);
        ProjectState {
            metadata: ProjectMetadata {
                project_id: project_id.into(),
                active_sheet_id: BUDGET_SHEET_ID.to_string(),
                sheet_order: vec![BUDGET_SHEET_ID.to_string()],
            },
            sheets,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.metadata.project_id
    }

    pub fn sheet(&self, sheet_id: &str) -> Option<&Sheet> {
        self.sheets.get(sheet_id)
    }

    pub fn sheet_mut(&mut self, sheet_id: &str) -> Option<&mut Sheet> {
        self.sheets.get_mut(sheet_id)
    }

    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(&self.metadata.active_sheet_id)
    }

    /// Sheets in tab order.
    pub fn sheets_in_order(&self) -> impl Iterator<Item = &Sheet> {
        self.metadata
            .sheet_order
            .iter()
            .filter_map(|id| self.sheets.get(id))
    }

    /// Restore the invariants after loading or bulk replacement:
    /// - the sheet order lists every sheet exactly once
    /// - the active sheet exists
    /// - the budget summary sheet exists
    /// - each sheet's id is its map key
    /// - column ids are unique and non-empty within a sheet
    pub fn normalize(&mut self) {
        if !self.sheets.contains_key(BUDGET_SHEET_ID) {
            let budget = Sheet::budget_summary();
            self.sheets.insert(budget.id.clone(), budget);
        }

        for (key, sheet) in &mut self.sheets {
            if sheet.id != *key {
                tracing::warn!(sheet_id = %sheet.id, %key, "sheet id differs from its key");
                sheet.id.clone_from(key);
            }
            let mut seen = HashSet::with_capacity(sheet.columns.len());
            for column in &mut sheet.columns {
                if column.id.is_empty() || !seen.insert(column.id.clone()) {
                    let fresh = uuid::Uuid::new_v4().to_string();
                    tracing::warn!(
                        sheet_id = %key,
                        old = %column.id,
                        new = %fresh,
                        "reassigned column id"
                    );
                    column.id = fresh;
                    seen.insert(column.id.clone());
                }
            }
        }

        let mut order: Vec<String> = Vec::with_capacity(self.sheets.len());
        for id in &self.metadata.sheet_order {
            if self.sheets.contains_key(id) && !order.contains(id) {
                order.push(id.clone());
            }
        }
        for id in self.sheets.keys() {
            if !order.contains(id) {
                if id == BUDGET_SHEET_ID {
                    order.insert(0, id.clone());
                } else {
                    order.push(id.clone());
                }
            }
        }
        self.metadata.sheet_order = order;

        if !self.sheets.contains_key(&self.metadata.active_sheet_id) {
            self.metadata.active_sheet_id = BUDGET_SHEET_ID.to_string();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::SheetKind;

    #[test]
    fn new_project_has_active_budget_sheet() {
        let state = ProjectState::new("p1");
        let active = state.active_sheet().unwrap();
        assert_eq!(active.id, BUDGET_SHEET_ID);
        assert_eq!(active.kind, SheetKind::Budget);
        assert_eq!(active.columns.len(), 5);
        assert!(active.data.is_empty());
    }

    #[test]
    fn normalize_rebuilds_missing_order() {
        let mut state = ProjectState::new("p1");
        let div = Sheet::division("03", "Concrete");
        state.sheets.insert(div.id.clone(), div);
        state.metadata.sheet_order.clear();
        state.metadata.active_sheet_id = "gone".into();

        state.normalize();

        assert_eq!(
            state.metadata.sheet_order,
            vec!["budget-summary".to_string(), "division-03".to_string()]
        );
        assert_eq!(state.metadata.active_sheet_id, BUDGET_SHEET_ID);
    }

    #[test]
    fn normalize_reassigns_duplicate_column_ids() {
        let mut state = ProjectState::new("p1");
        let budget = state.sheet_mut(BUDGET_SHEET_ID).unwrap();
        let shared = budget.columns[0].id.clone();
        budget.columns[1].id.clone_from(&shared);
        budget.columns[2].id.clear();

        state.normalize();

        let budget = state.sheet(BUDGET_SHEET_ID).unwrap();
        let ids: HashSet<&str> = budget.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), budget.columns.len());
        assert!(!ids.contains(""));
        assert_eq!(budget.columns[0].id, shared);
        assert_eq!(budget.columns[1].title, "Division");
    }

    #[test]
    fn normalize_aligns_sheet_id_with_key() {
        let mut state = ProjectState::new("p1");
        let mut div = Sheet::division("03", "Concrete");
        div.id = "division-99".into();
        state.sheets.insert("division-03".into(), div);

        state.normalize();

        assert_eq!(state.sheet("division-03").unwrap().id, "division-03");
        assert!(state.sheet("division-99").is_none());
        assert_eq!(state.metadata.sheet_order.last().unwrap(), "division-03");
    }

    #[test]
    fn metadata_without_sheet_order_still_parses() {
        let json = r#"{
            "metadata": { "projectId": "p1", "activeSheetId": "budget-summary" },
            "sheets": {}
        }"#;
        let mut state: ProjectState = serde_json::from_str(json).unwrap();
        assert!(state.metadata.sheet_order.is_empty());
        state.normalize();
        assert_eq!(state.sheets.len(), 1);
        assert_eq!(state.metadata.sheet_order[0], BUDGET_SHEET_ID);
    }
}
