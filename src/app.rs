//! The application object exported to JavaScript.
//!
//! `BudgetApp` owns the store, the toolbar/dialog state and the grid engine
//! host. Every change flows the same way: dialog or grid event -> store
//! mutation (persisted) -> workbook data rebuilt -> engine remounted.

use wasm_bindgen::prelude::*;

use crate::adapter::{workbook_from_state, GridEvent, WorkbookData};
use crate::config::GridConfig;
use crate::dialog::FieldError;
use crate::engine::{EngineHost, GridEngine};
use crate::error::Result;
use crate::storage;
use crate::store::Store;
use crate::toolbar::{DialogView, Toolbar, ToolbarAction};
use crate::types::{ColumnType, ProjectState, SubcontractorInfo};

#[cfg(target_arch = "wasm32")]
use crate::engine::JsGridEngine;
#[cfg(target_arch = "wasm32")]
use crate::storage::BrowserStorage;

/// Storage backing the app: local storage in the browser, memory elsewhere.
#[cfg(target_arch = "wasm32")]
pub type AppStorage = BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type AppStorage = storage::MemoryStorage;

/// The main app struct exported to JavaScript.
#[wasm_bindgen]
pub struct BudgetApp {
    store: Store<AppStorage>,
    toolbar: Toolbar,
    config: GridConfig,
    engine: Option<EngineHost<Box<dyn GridEngine>>>,
}

// ============================================================================
// Rust API (all targets)
// ============================================================================

impl BudgetApp {
    /// Open a project on the given storage.
    pub fn with_storage(project_id: &str, storage: AppStorage, config: GridConfig) -> Result<Self> {
        Ok(BudgetApp {
            store: Store::open(project_id, storage)?,
            toolbar: Toolbar::new(),
            config,
            engine: None,
        })
    }

    pub fn state(&self) -> &ProjectState {
        self.store.state()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Engine workbook data for the current state.
    pub fn workbook(&self) -> WorkbookData {
        workbook_from_state(self.store.state(), &self.config)
    }

    /// Attach a grid engine and mount the current workbook on it. A previously
    /// attached engine is disposed.
    pub fn attach_engine(&mut self, engine: Box<dyn GridEngine>) -> Result<()> {
        self.engine = None;
        let mut host = EngineHost::new(engine);
        host.mount(&self.workbook())?;
        self.engine = Some(host);
        Ok(())
    }

    /// Dispose and forget the attached engine.
    pub fn detach_engine(&mut self) {
        self.engine = None;
    }

    /// Remount the engine with fresh workbook data.
    pub fn render(&mut self) -> Result<()> {
        let workbook = self.workbook();
        if let Some(host) = self.engine.as_mut() {
            host.mount(&workbook)?;
        }
        Ok(())
    }

    /// Re-render after a mutation that changed the state.
    fn after_change(&mut self, changed: bool) -> Result<bool> {
        if changed {
            self.render()?;
        }
        Ok(changed)
    }

    pub fn add_division(&mut self, code: &str, name: &str) -> Result<bool> {
        let changed = self.store.add_division(code, name)?;
        self.after_change(changed)
    }

    pub fn add_column(&mut self, sheet_id: &str, title: &str, column_type: ColumnType) -> Result<bool> {
        let changed = self.store.add_column(sheet_id, title, column_type)?;
        self.after_change(changed)
    }

    pub fn rename_column(&mut self, sheet_id: &str, column_id: &str, title: &str) -> Result<bool> {
        let changed = self.store.rename_column(sheet_id, column_id, title)?;
        self.after_change(changed)
    }

    pub fn move_column(&mut self, sheet_id: &str, from: usize, to: usize) -> Result<bool> {
        let changed = self.store.move_column(sheet_id, from, to)?;
        self.after_change(changed)
    }

    /// Switch sheets. Any open dialog belongs to the old sheet and is closed.
    pub fn set_active_sheet(&mut self, sheet_id: &str) -> Result<bool> {
        let changed = self.store.set_active_sheet(sheet_id)?;
        if changed {
            self.toolbar.close();
        }
        self.after_change(changed)
    }

    pub fn replace_state(&mut self, state: ProjectState) -> Result<bool> {
        self.toolbar.close();
        let changed = self.store.replace_state(state)?;
        self.after_change(changed)
    }

    pub fn set_bid_book(
        &mut self,
        sheet_id: &str,
        column_id: &str,
        info: SubcontractorInfo,
    ) -> Result<bool> {
        let changed = self.store.set_bid_book(sheet_id, column_id, info)?;
        self.after_change(changed)
    }

    /// Relay an event from the grid engine.
    ///
    /// Edits the engine already shows (rename, move) don't remount it; sheet
    /// navigation does, so the engine switches tabs.
    pub fn handle_grid_event(&mut self, event: &GridEvent) -> Result<bool> {
        let changed = self.store.apply_grid_event(event)?;
        match event {
            GridEvent::SheetActivated { .. } | GridEvent::HyperlinkClicked { .. } => {
                if changed {
                    self.toolbar.close();
                }
                self.after_change(changed)
            }
            GridEvent::ColumnRenamed { .. } | GridEvent::ColumnMoved { .. } => Ok(changed),
        }
    }

    /// Save the engine's own snapshot of the workbook.
    pub fn save_grid_snapshot(&self, snapshot: &serde_json::Value) -> Result<()> {
        storage::save_grid_snapshot(self.store.storage(), self.store.state().project_id(), snapshot)
    }

    pub fn load_grid_snapshot(&self) -> Option<serde_json::Value> {
        storage::load_grid_snapshot(self.store.storage(), self.store.state().project_id())
    }

    /// Toolbar buttons for the active sheet.
    pub fn toolbar_actions(&self) -> Vec<ToolbarAction> {
        self.store
            .state()
            .active_sheet()
            .map(|s| Toolbar::actions(s.kind))
            .unwrap_or_default()
    }

    pub fn open_dialog(&mut self, action: ToolbarAction) -> bool {
        self.toolbar.open(action, self.store.state())
    }

    pub fn open_rename_dialog(&mut self, sheet_id: &str, column_id: &str) -> bool {
        self.toolbar.open_rename(self.store.state(), sheet_id, column_id)
    }

    pub fn open_bid_book(&mut self, sheet_id: &str, column_id: &str) -> bool {
        self.toolbar.open_bid_book(self.store.state(), sheet_id, column_id)
    }

    pub fn set_dialog_field(&mut self, field: &str, value: &str) -> bool {
        self.toolbar
            .dialog_mut()
            .is_some_and(|d| d.set_field(field, value))
    }

    pub fn dialog_view(&self) -> Option<DialogView> {
        self.toolbar.dialog().map(|d| d.view())
    }

    pub fn dialog_errors(&self) -> Vec<FieldError> {
        self.dialog_view().map(|v| v.errors).unwrap_or_default()
    }

    pub fn close_dialog(&mut self) {
        self.toolbar.close();
    }

    /// Submit the open dialog. Returns whether the state changed.
    pub fn submit_dialog(&mut self) -> Result<bool> {
        let changed = self.toolbar.submit(&mut self.store)?;
        self.after_change(changed)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BudgetApp {
    /// Open a project on fresh in-memory storage (tests, tooling).
    pub fn new_test(project_id: &str) -> Result<Self> {
        Self::with_storage(project_id, storage::MemoryStorage::new(), GridConfig::default())
    }
}

// ============================================================================
// WASM32 bindings
// ============================================================================

#[cfg(target_arch = "wasm32")]
fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[cfg(target_arch = "wasm32")]
fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> std::result::Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl BudgetApp {
    /// Open (or create) a project backed by `window.localStorage`.
    ///
    /// `config` is an optional grid config object; missing fields take
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(project_id: &str, config: JsValue) -> std::result::Result<BudgetApp, JsValue> {
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            from_js(config)?
        };
        let storage = BrowserStorage::local()?;
        Ok(Self::with_storage(project_id, storage, config)?)
    }

    /// Attach the grid engine through two callbacks: `mount(workbookData)`
    /// and `dispose()`. Mounts immediately.
    #[wasm_bindgen(js_name = attachEngine)]
    pub fn js_attach_engine(
        &mut self,
        mount: js_sys::Function,
        dispose: js_sys::Function,
    ) -> std::result::Result<(), JsValue> {
        Ok(self.attach_engine(Box::new(JsGridEngine::new(mount, dispose)))?)
    }

    #[wasm_bindgen(js_name = detachEngine)]
    pub fn js_detach_engine(&mut self) {
        self.detach_engine();
    }

    #[wasm_bindgen(js_name = render)]
    pub fn js_render(&mut self) -> std::result::Result<(), JsValue> {
        Ok(self.render()?)
    }

    /// Current project state, as stored.
    #[wasm_bindgen(js_name = state)]
    pub fn js_state(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(self.store.state())
    }

    /// Engine workbook data for the current state.
    #[wasm_bindgen(js_name = workbook)]
    pub fn js_workbook(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.workbook())
    }

    #[wasm_bindgen(js_name = activeSheetId)]
    pub fn js_active_sheet_id(&self) -> String {
        self.store.state().metadata.active_sheet_id.clone()
    }

    #[wasm_bindgen(js_name = addDivision)]
    pub fn js_add_division(&mut self, code: &str, name: &str) -> std::result::Result<bool, JsValue> {
        Ok(self.add_division(code, name)?)
    }

    /// `column_type` is a column type key such as `DIVISION_UNIT_COST`.
    #[wasm_bindgen(js_name = addColumn)]
    pub fn js_add_column(
        &mut self,
        sheet_id: &str,
        title: &str,
        column_type: &str,
    ) -> std::result::Result<bool, JsValue> {
        let column_type = ColumnType::from_key(column_type)
            .ok_or_else(|| JsValue::from_str(&format!("unknown column type: {column_type}")))?;
        Ok(self.add_column(sheet_id, title, column_type)?)
    }

    #[wasm_bindgen(js_name = renameColumn)]
    pub fn js_rename_column(
        &mut self,
        sheet_id: &str,
        column_id: &str,
        title: &str,
    ) -> std::result::Result<bool, JsValue> {
        Ok(self.rename_column(sheet_id, column_id, title)?)
    }

    #[wasm_bindgen(js_name = moveColumn)]
    pub fn js_move_column(
        &mut self,
        sheet_id: &str,
        from: usize,
        to: usize,
    ) -> std::result::Result<bool, JsValue> {
        Ok(self.move_column(sheet_id, from, to)?)
    }

    #[wasm_bindgen(js_name = setActiveSheet)]
    pub fn js_set_active_sheet(&mut self, sheet_id: &str) -> std::result::Result<bool, JsValue> {
        Ok(self.set_active_sheet(sheet_id)?)
    }

    #[wasm_bindgen(js_name = replaceState)]
    pub fn js_replace_state(&mut self, state: JsValue) -> std::result::Result<bool, JsValue> {
        let state: ProjectState = from_js(state)?;
        Ok(self.replace_state(state)?)
    }

    #[wasm_bindgen(js_name = setBidBook)]
    pub fn js_set_bid_book(
        &mut self,
        sheet_id: &str,
        column_id: &str,
        info: JsValue,
    ) -> std::result::Result<bool, JsValue> {
        let info: SubcontractorInfo = from_js(info)?;
        Ok(self.set_bid_book(sheet_id, column_id, info)?)
    }

    /// Relay a grid engine event (`{ type: "columnMoved", ... }`).
    #[wasm_bindgen(js_name = handleGridEvent)]
    pub fn js_handle_grid_event(&mut self, event: JsValue) -> std::result::Result<bool, JsValue> {
        let event: GridEvent = from_js(event)?;
        Ok(self.handle_grid_event(&event)?)
    }

    #[wasm_bindgen(js_name = saveGridSnapshot)]
    pub fn js_save_grid_snapshot(&self, snapshot: JsValue) -> std::result::Result<(), JsValue> {
        let snapshot: serde_json::Value = from_js(snapshot)?;
        Ok(self.save_grid_snapshot(&snapshot)?)
    }

    #[wasm_bindgen(js_name = loadGridSnapshot)]
    pub fn js_load_grid_snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        match self.load_grid_snapshot() {
            Some(snapshot) => to_js(&snapshot),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = toolbarActions)]
    pub fn js_toolbar_actions(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.toolbar_actions())
    }

    /// Open the dialog for a toolbar action (`addColumn`, `addDivision`).
    #[wasm_bindgen(js_name = openDialog)]
    pub fn js_open_dialog(&mut self, action: &str) -> bool {
        ToolbarAction::from_name(action).is_some_and(|a| self.open_dialog(a))
    }

    #[wasm_bindgen(js_name = openRenameDialog)]
    pub fn js_open_rename_dialog(&mut self, sheet_id: &str, column_id: &str) -> bool {
        self.open_rename_dialog(sheet_id, column_id)
    }

    #[wasm_bindgen(js_name = openBidBook)]
    pub fn js_open_bid_book(&mut self, sheet_id: &str, column_id: &str) -> bool {
        self.open_bid_book(sheet_id, column_id)
    }

    #[wasm_bindgen(js_name = setDialogField)]
    pub fn js_set_dialog_field(&mut self, field: &str, value: &str) -> bool {
        self.set_dialog_field(field, value)
    }

    /// The open dialog's fields, options and validation state, or `null`.
    #[wasm_bindgen(js_name = dialogView)]
    pub fn js_dialog_view(&self) -> std::result::Result<JsValue, JsValue> {
        match self.dialog_view() {
            Some(view) => to_js(&view),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = submitDialog)]
    pub fn js_submit_dialog(&mut self) -> std::result::Result<bool, JsValue> {
        Ok(self.submit_dialog()?)
    }

    #[wasm_bindgen(js_name = closeDialog)]
    pub fn js_close_dialog(&mut self) {
        self.close_dialog();
    }
}
