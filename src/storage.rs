//! Key-value persistence for project state.
//!
//! In the browser this is `window.localStorage`; tests and non-wasm builds
//! use [`MemoryStorage`]. Keys follow the layout the web app has always used:
//! - `spreadsheet_<projectId>`: the full [`ProjectState`] as JSON
//! - `univer-sheet-<workbookId>`: the grid engine's own workbook snapshot

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use crate::error::CostbookError;
use crate::error::Result;
use crate::types::ProjectState;

/// Minimal string key-value store, shaped like the Web Storage API.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Storage key of a project's state.
#[must_use]
pub fn state_key(project_id: &str) -> String {
    format!("spreadsheet_{project_id}")
}

/// Storage key of the grid engine's snapshot of a workbook.
#[must_use]
pub fn grid_snapshot_key(workbook_id: &str) -> String {
    format!("univer-sheet-{workbook_id}")
}

/// Load a project's saved state.
///
/// Returns `None` when nothing is stored, the storage can't be read, or the
/// stored JSON is malformed. The caller falls back to a fresh project.
pub fn load_state<S: KeyValueStore + ?Sized>(storage: &S, project_id: &str) -> Option<ProjectState> {
    let key = state_key(project_id);
    let raw = match storage.get_item(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(%key, "no saved state");
            return None;
        }
        Err(e) => {
            tracing::warn!(%key, error = %e, "failed to read saved state");
            return None;
        }
    };

    match serde_json::from_str::<ProjectState>(&raw) {
        Ok(mut state) => {
            state.normalize();
            tracing::debug!(%key, sheets = state.sheets.len(), "rehydrated saved state");
            Some(state)
        }
        Err(e) => {
            tracing::warn!(%key, error = %e, "saved state is malformed, starting fresh");
            None
        }
    }
}

/// Write a project's state under its key.
pub fn save_state<S: KeyValueStore + ?Sized>(storage: &S, state: &ProjectState) -> Result<()> {
    let json = serde_json::to_string(state)?;
    storage.set_item(&state_key(state.project_id()), &json)
}

/// Save the grid engine's snapshot of a workbook.
pub fn save_grid_snapshot<S: KeyValueStore + ?Sized>(
    storage: &S,
    workbook_id: &str,
    snapshot: &serde_json::Value,
) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    storage.set_item(&grid_snapshot_key(workbook_id), &json)
}

/// Load the grid engine's snapshot of a workbook. Malformed JSON is logged
/// and treated as missing.
pub fn load_grid_snapshot<S: KeyValueStore + ?Sized>(
    storage: &S,
    workbook_id: &str,
) -> Option<serde_json::Value> {
    let key = grid_snapshot_key(workbook_id);
    let raw = storage.get_item(&key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(%key, error = %e, "grid snapshot is malformed");
            None
        }
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// In-memory storage. Clones share the same entries.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// ============================================================================
// Browser backend
// ============================================================================

/// `window.localStorage`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    /// Open the window's local storage.
    pub fn local() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| CostbookError::Storage("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CostbookError::Storage(format!("{e:?}")))?
            .ok_or_else(|| CostbookError::Storage("localStorage unavailable".into()))?;
        Ok(BrowserStorage { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| CostbookError::Storage(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CostbookError::Storage(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| CostbookError::Storage(format!("{e:?}")))
    }
}
