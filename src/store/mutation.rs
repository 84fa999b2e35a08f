//! State mutations.
//!
//! Every operation takes the previous state and returns the next one. None of
//! them fail: references to sheets or columns that don't exist leave the
//! state unchanged.

use crate::hyperlinks::sheet_link_formula;
use crate::types::{
    division_sheet_id, CellValue, Column, ColumnType, ProjectState, Row, Sheet,
    SubcontractorInfo, BUDGET_SHEET_ID,
};

/// Add a division: one row on the budget summary and one new division sheet,
/// linked by the row's Details hyperlink.
///
/// A code whose division sheet already exists is ignored.
#[must_use]
pub fn add_division(state: &ProjectState, code: &str, name: &str) -> ProjectState {
    let mut next = state.clone();
    let sheet_id = division_sheet_id(code);

    if code.trim().is_empty() {
        tracing::debug!("ignoring division with blank code");
        return next;
    }
    // The sheet id ends up inside a quoted formula argument.
    if code.contains('"') {
        tracing::debug!(code, "ignoring division code with a quote");
        return next;
    }
    if next.sheets.contains_key(&sheet_id) {
        tracing::debug!(%sheet_id, "division already exists");
        return next;
    }
    let Some(budget) = next.sheet_mut(BUDGET_SHEET_ID) else {
        tracing::debug!("budget summary sheet missing");
        return next;
    };

    let mut row = Row::new();
    row.insert(ColumnType::BudgetCostCode, CellValue::from(code));
    row.insert(ColumnType::BudgetDivision, CellValue::from(name));
    row.insert(
        ColumnType::BudgetDetails,
        CellValue::Text(sheet_link_formula(&sheet_id)),
    );
    row.insert(ColumnType::BudgetCost, CellValue::from(""));
    row.insert(ColumnType::BudgetNotes, CellValue::from(""));
    budget.data.push(row);

    next.sheets.insert(sheet_id.clone(), Sheet::division(code, name));
    next.metadata.sheet_order.push(sheet_id.clone());

    tracing::info!(%sheet_id, code, name, "added division");
    next
}

/// Append a column to a sheet.
///
/// The column type must belong to the sheet's kind.
#[must_use]
pub fn add_column(
    state: &ProjectState,
    sheet_id: &str,
    title: &str,
    column_type: ColumnType,
) -> ProjectState {
    let mut next = state.clone();
    let Some(sheet) = next.sheet_mut(sheet_id) else {
        tracing::debug!(%sheet_id, "add_column: sheet not found");
        return next;
    };
    if column_type.kind() != sheet.kind {
        tracing::debug!(%sheet_id, column_type = column_type.key(), "add_column: wrong sheet kind");
        return next;
    }

    let column = Column::new(title, column_type);
    tracing::info!(%sheet_id, column_id = %column.id, title, "added column");
    sheet.columns.push(column);
    next
}

/// Change a column's title.
#[must_use]
pub fn rename_column(
    state: &ProjectState,
    sheet_id: &str,
    column_id: &str,
    title: &str,
) -> ProjectState {
    let mut next = state.clone();
    match next.sheet_mut(sheet_id).and_then(|s| s.column_mut(column_id)) {
        Some(column) => {
            tracing::info!(%sheet_id, %column_id, title, "renamed column");
            column.title = title.to_string();
        }
        None => tracing::debug!(%sheet_id, %column_id, "rename_column: column not found"),
    }
    next
}

/// Move the column at `from` so it ends up at `to`.
///
/// `from` past the end is ignored; `to` past the end moves the column last.
#[must_use]
pub fn move_column(state: &ProjectState, sheet_id: &str, from: usize, to: usize) -> ProjectState {
    let mut next = state.clone();
    let Some(sheet) = next.sheet_mut(sheet_id) else {
        tracing::debug!(%sheet_id, "move_column: sheet not found");
        return next;
    };
    if from >= sheet.columns.len() {
        tracing::debug!(%sheet_id, from, "move_column: index out of range");
        return next;
    }

    let column = sheet.columns.remove(from);
    let to = to.min(sheet.columns.len());
    sheet.columns.insert(to, column);
    tracing::info!(%sheet_id, from, to, "moved column");
    next
}

/// Switch the active sheet. Unknown ids are ignored.
#[must_use]
pub fn set_active_sheet(state: &ProjectState, sheet_id: &str) -> ProjectState {
    let mut next = state.clone();
    if next.sheets.contains_key(sheet_id) {
        next.metadata.active_sheet_id = sheet_id.to_string();
    } else {
        tracing::debug!(%sheet_id, "set_active_sheet: sheet not found");
    }
    next
}

/// Replace the whole state, restoring the model's invariants.
#[must_use]
pub fn replace_state(mut state: ProjectState) -> ProjectState {
    state.normalize();
    state
}

/// Attach subcontractor details to a subcontractor column.
#[must_use]
pub fn set_bid_book(
    state: &ProjectState,
    sheet_id: &str,
    column_id: &str,
    info: SubcontractorInfo,
) -> ProjectState {
    let mut next = state.clone();
    let Some(sheet) = next.sheet_mut(sheet_id) else {
        tracing::debug!(%sheet_id, "set_bid_book: sheet not found");
        return next;
    };
    let is_subcontractor = sheet
        .column(column_id)
        .is_some_and(|c| c.column_type == ColumnType::DivisionSubcontractor);
    if !is_subcontractor {
        tracing::debug!(%sheet_id, %column_id, "set_bid_book: not a subcontractor column");
        return next;
    }

    tracing::info!(%sheet_id, %column_id, subcontractor = %info.name, "saved bid book");
    sheet.bid_books.insert(column_id.to_string(), info);
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::SheetKind;

    fn column_ids(state: &ProjectState, sheet_id: &str) -> Vec<String> {
        state.sheet(sheet_id).unwrap().columns.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn add_division_links_row_and_sheet() {
        let state = add_division(&ProjectState::new("p"), "03", "Concrete");

        let budget = state.sheet(BUDGET_SHEET_ID).unwrap();
        assert_eq!(budget.data.len(), 1);
        let row = &budget.data[0];
        assert_eq!(row[&ColumnType::BudgetCostCode], CellValue::from("03"));
        assert_eq!(row[&ColumnType::BudgetDivision], CellValue::from("Concrete"));
        assert_eq!(
            row[&ColumnType::BudgetDetails],
            CellValue::from("=HYPERLINK(\"#sheet=division-03\", \"View Division\")")
        );

        let division = state.sheet("division-03").unwrap();
        assert_eq!(division.name, "03 - Concrete");
        assert_eq!(division.kind, SheetKind::Division);
        assert_eq!(division.columns.len(), 4);
        assert_eq!(state.metadata.sheet_order.last().unwrap(), "division-03");
    }

    #[test]
    fn duplicate_division_is_ignored() {
        let once = add_division(&ProjectState::new("p"), "03", "Concrete");
        let twice = add_division(&once, "03", "Concrete again");
        assert_eq!(once, twice);
    }

    #[test]
    fn division_code_with_quote_is_ignored() {
        let state = ProjectState::new("p");
        let next = add_division(&state, "03\"x", "Concrete");
        assert_eq!(next, state);
    }

    #[test]
    fn division_links_parse_back_to_their_sheet() {
        let state = add_division(&ProjectState::new("p"), "09 A", "Finishes");
        let row = &state.sheet(BUDGET_SHEET_ID).unwrap().data[0];
        let CellValue::Text(link) = &row[&ColumnType::BudgetDetails] else {
            panic!("details cell is not text");
        };
        assert_eq!(crate::hyperlinks::linked_sheet_id(link), Some("division-09 A"));
    }

    #[test]
    fn add_column_rejects_wrong_kind() {
        let state = ProjectState::new("p");
        let next = add_column(&state, BUDGET_SHEET_ID, "Units", ColumnType::DivisionUnits);
        assert_eq!(state, next);
    }

    #[test]
    fn add_column_appends() {
        let state = ProjectState::new("p");
        let next = add_column(&state, BUDGET_SHEET_ID, "Notes 2", ColumnType::BudgetNotes);
        let cols = &next.sheet(BUDGET_SHEET_ID).unwrap().columns;
        assert_eq!(cols.len(), 6);
        assert_eq!(cols[5].title, "Notes 2");
    }

    #[test]
    fn move_column_clamps_destination() {
        let state = ProjectState::new("p");
        let before = column_ids(&state, BUDGET_SHEET_ID);
        let next = move_column(&state, BUDGET_SHEET_ID, 0, 99);
        let after = column_ids(&next, BUDGET_SHEET_ID);
        assert_eq!(after[4], before[0]);
        assert_eq!(after[..4], before[1..]);
    }

    #[test]
    fn move_column_out_of_range_is_noop() {
        let state = ProjectState::new("p");
        assert_eq!(move_column(&state, BUDGET_SHEET_ID, 5, 0), state);
        assert_eq!(move_column(&state, "nope", 0, 1), state);
    }

    #[test]
    fn set_active_sheet_ignores_unknown_ids() {
        let state = add_division(&ProjectState::new("p"), "03", "Concrete");
        let next = set_active_sheet(&state, "division-03");
        assert_eq!(next.metadata.active_sheet_id, "division-03");
        let same = set_active_sheet(&next, "division-99");
        assert_eq!(same.metadata.active_sheet_id, "division-03");
    }

    #[test]
    fn bid_book_only_on_subcontractor_columns() {
        let state = add_division(&ProjectState::new("p"), "03", "Concrete");
        let sheet = state.sheet("division-03").unwrap();
        let units = sheet.columns[1].id.clone();
        let sub = sheet.columns[3].id.clone();
        let info = SubcontractorInfo {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "555-123-4567".into(),
            company: "Forms Inc".into(),
        };

        let ignored = set_bid_book(&state, "division-03", &units, info.clone());
        assert_eq!(ignored, state);

        let saved = set_bid_book(&state, "division-03", &sub, info.clone());
        assert_eq!(saved.sheet("division-03").unwrap().bid_book(&sub), Some(&info));
    }
}
