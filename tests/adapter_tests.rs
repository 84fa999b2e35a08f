//! Workbook data generation and grid event relay.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use costbook::adapter::{apply_grid_event, workbook_from_state, CellKind, GridEvent};
    use costbook::config::GridConfig;
    use costbook::store::mutation;
    use costbook::types::{CellValue, ColumnType, ProjectState, BUDGET_SHEET_ID};

    fn project_with_division() -> ProjectState {
        mutation::add_division(&ProjectState::new("p1"), "03", "Concrete")
    }

    #[test]
    fn test_workbook_mirrors_sheet_order() {
        let state = mutation::add_division(&project_with_division(), "01", "General Requirements");
        let wb = workbook_from_state(&state, &GridConfig::default());

        assert_eq!(wb.id, "p1");
        assert_eq!(
            wb.sheet_order,
            vec!["budget-summary", "division-03", "division-01"]
        );
        assert_eq!(wb.sheets.len(), 3);
        assert_eq!(wb.sheets["division-01"].name, "01 - General Requirements");
    }

    #[test]
    fn test_header_row_and_data_rows() {
        let wb = workbook_from_state(&project_with_division(), &GridConfig::default());
        let budget = &wb.sheets[BUDGET_SHEET_ID];

        assert_eq!(budget.column_count, 5);
        let header = budget.cell(0, 1).unwrap();
        assert_eq!(header.v, Some(CellValue::from("Division")));
        assert!(header.s.is_some());

        let code = budget.cell(1, 0).unwrap();
        assert_eq!(code.t, CellKind::String);
        assert_eq!(code.v, Some(CellValue::from("03")));

        let details = budget.cell(1, 2).unwrap();
        assert_eq!(details.t, CellKind::Formula);
        assert_eq!(
            details.f.as_deref(),
            Some("=HYPERLINK(\"#sheet=division-03\", \"View Division\")")
        );

        // Cost is blank until filled in.
        let cost = budget.cell(1, 3).unwrap();
        assert_eq!(cost.t, CellKind::String);
        assert_eq!(cost.v, Some(CellValue::from("")));
    }

    #[test]
    fn test_numeric_columns_produce_numbers() {
        let mut state = project_with_division();
        let budget = state.sheet_mut(BUDGET_SHEET_ID).unwrap();
        budget.data[0].insert(ColumnType::BudgetCost, CellValue::Number(125_000.0));

        let wb = workbook_from_state(&state, &GridConfig::default());
        let cost = wb.sheets[BUDGET_SHEET_ID].cell(1, 3).unwrap();
        assert_eq!(cost.t, CellKind::Number);
        assert_eq!(cost.v, Some(CellValue::Number(125_000.0)));
    }

    #[test]
    fn test_cells_follow_column_order() {
        let state = project_with_division();
        let moved = mutation::move_column(&state, BUDGET_SHEET_ID, 1, 0);
        let wb = workbook_from_state(&moved, &GridConfig::default());
        let budget = &wb.sheets[BUDGET_SHEET_ID];

        assert_eq!(budget.cell(0, 0).unwrap().v, Some(CellValue::from("Division")));
        assert_eq!(budget.cell(1, 0).unwrap().v, Some(CellValue::from("Concrete")));
        assert_eq!(
            budget.column_data[&0].column_type,
            ColumnType::BudgetDivision
        );
    }

    #[test]
    fn test_row_count_honours_config() {
        let mut state = ProjectState::new("p1");
        for code in 0..30 {
            state = mutation::add_division(&state, &format!("{code:02}"), "Trade");
        }
        let config = GridConfig {
            min_row_count: 20,
            trailing_blank_rows: 5,
            freeze_header: false,
            ..GridConfig::default()
        };
        let wb = workbook_from_state(&state, &config);
        let budget = &wb.sheets[BUDGET_SHEET_ID];
        assert_eq!(budget.row_count, 35);
        assert!(budget.freeze.is_none());
        assert_eq!(wb.sheets["division-00"].row_count, 20);
    }

    #[test]
    fn test_workbook_json_shape() {
        let wb = workbook_from_state(&project_with_division(), &GridConfig::default());
        let json = serde_json::to_value(&wb).unwrap();
        assert_eq!(json["sheetOrder"][0], "budget-summary");
        assert_eq!(json["appVersion"], "3.0.0-alpha");
        let details = &json["sheets"]["budget-summary"]["cellData"]["1"]["2"];
        assert_eq!(details["t"], "f");
        assert!(details.get("v").is_none());
    }

    #[test]
    fn test_moved_event_reorders_columns() {
        let state = project_with_division();
        let first = state.sheet("division-03").unwrap().columns[0].id.clone();
        let next = apply_grid_event(
            &state,
            &GridEvent::ColumnMoved {
                sheet_id: "division-03".into(),
                from_index: 0,
                to_index: 3,
            },
        );
        assert_eq!(next.sheet("division-03").unwrap().columns[3].id, first);
    }

    #[test]
    fn test_rename_event_by_column_id() {
        let state = project_with_division();
        let units = state.sheet("division-03").unwrap().columns[1].id.clone();
        let event: GridEvent = serde_json::from_value(serde_json::json!({
            "type": "columnRenamed",
            "sheetId": "division-03",
            "columnIndex": 0,
            "columnId": units,
            "title": "UoM"
        }))
        .unwrap();
        let next = apply_grid_event(&state, &event);
        let sheet = next.sheet("division-03").unwrap();
        assert_eq!(sheet.columns[1].title, "UoM");
        assert_eq!(sheet.columns[0].title, "Line Items");
    }

    #[test]
    fn test_sheet_activated_event() {
        let state = project_with_division();
        let next = apply_grid_event(
            &state,
            &GridEvent::SheetActivated {
                sheet_id: "division-03".into(),
            },
        );
        assert_eq!(next.metadata.active_sheet_id, "division-03");
    }
}
