//! The project state store.
//!
//! `Store` owns the current [`ProjectState`] and a storage backend. Each
//! mutation computes the next state with the pure functions in [`mutation`],
//! swaps it in, and writes it to storage when it changed.

pub mod mutation;

use crate::adapter::{apply_grid_event, GridEvent};
use crate::error::Result;
use crate::storage::{self, KeyValueStore};
use crate::types::{ColumnType, ProjectState, SubcontractorInfo};

pub struct Store<S: KeyValueStore> {
    state: ProjectState,
    storage: S,
}

impl<S: KeyValueStore> Store<S> {
    /// Open a project, rehydrating saved state when there is any.
    ///
    /// The resulting state is written back immediately so a fresh project is
    /// persisted from the start.
    pub fn open(project_id: &str, storage: S) -> Result<Self> {
        let state = match storage::load_state(&storage, project_id) {
            Some(mut saved) => {
                if saved.metadata.project_id != project_id {
                    tracing::warn!(
                        stored = %saved.metadata.project_id,
                        project_id,
                        "saved state carries another project id"
                    );
                    saved.metadata.project_id = project_id.to_string();
                }
                saved
            }
            None => {
                tracing::info!(project_id, "creating initial state");
                ProjectState::new(project_id)
            }
        };
        storage::save_state(&storage, &state)?;
        Ok(Store { state, storage })
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Swap in `next` and persist it. Returns whether anything changed.
    fn commit(&mut self, next: ProjectState) -> Result<bool> {
        if next == self.state {
            return Ok(false);
        }
        self.state = next;
        storage::save_state(&self.storage, &self.state)?;
        Ok(true)
    }

    pub fn add_division(&mut self, code: &str, name: &str) -> Result<bool> {
        let next = mutation::add_division(&self.state, code, name);
        self.commit(next)
    }

    pub fn add_column(
        &mut self,
        sheet_id: &str,
        title: &str,
        column_type: ColumnType,
    ) -> Result<bool> {
        let next = mutation::add_column(&self.state, sheet_id, title, column_type);
        self.commit(next)
    }

    pub fn rename_column(&mut self, sheet_id: &str, column_id: &str, title: &str) -> Result<bool> {
        let next = mutation::rename_column(&self.state, sheet_id, column_id, title);
        self.commit(next)
    }

    pub fn move_column(&mut self, sheet_id: &str, from: usize, to: usize) -> Result<bool> {
        let next = mutation::move_column(&self.state, sheet_id, from, to);
        self.commit(next)
    }

    pub fn set_active_sheet(&mut self, sheet_id: &str) -> Result<bool> {
        let next = mutation::set_active_sheet(&self.state, sheet_id);
        self.commit(next)
    }

    /// Replace the whole state. The project id stays the store's own.
    pub fn replace_state(&mut self, state: ProjectState) -> Result<bool> {
        let mut next = mutation::replace_state(state);
        next.metadata.project_id = self.state.metadata.project_id.clone();
        self.commit(next)
    }

    /// Relay an edit made in the grid engine.
    pub fn apply_grid_event(&mut self, event: &GridEvent) -> Result<bool> {
        let next = apply_grid_event(&self.state, event);
        self.commit(next)
    }

    pub fn set_bid_book(
        &mut self,
        sheet_id: &str,
        column_id: &str,
        info: SubcontractorInfo,
    ) -> Result<bool> {
        let next = mutation::set_bid_book(&self.state, sheet_id, column_id, info);
        self.commit(next)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn open_persists_initial_state() {
        let storage = MemoryStorage::new();
        let store = Store::open("p1", storage.clone()).unwrap();
        assert_eq!(storage::load_state(&storage, "p1").as_ref(), Some(store.state()));
    }

    #[test]
    fn noop_mutations_report_unchanged() {
        let mut store = Store::open("p1", MemoryStorage::new()).unwrap();
        assert!(!store.set_active_sheet("missing").unwrap());
        assert!(store.add_division("03", "Concrete").unwrap());
        assert!(!store.add_division("03", "Concrete").unwrap());
    }

    #[test]
    fn replace_state_keeps_project_id() {
        let mut store = Store::open("p1", MemoryStorage::new()).unwrap();
        let other = mutation::add_division(&ProjectState::new("p2"), "05", "Metals");
        assert!(store.replace_state(other).unwrap());
        assert_eq!(store.state().project_id(), "p1");
        assert!(store.state().sheet("division-05").is_some());
    }
}
