//! Lifecycle of the external grid engine.
//!
//! The engine is an opaque collaborator: we hand it workbook data and tear it
//! down again. A previous instance is always disposed before a new one is
//! mounted, and the host disposes whatever is still mounted when dropped.

use crate::adapter::WorkbookData;
use crate::error::Result;

/// The operations we need from a grid engine.
pub trait GridEngine {
    /// Create an engine instance showing `workbook`.
    fn mount(&mut self, workbook: &WorkbookData) -> Result<()>;

    /// Tear down the current instance.
    fn dispose(&mut self);
}

impl<E: GridEngine + ?Sized> GridEngine for Box<E> {
    fn mount(&mut self, workbook: &WorkbookData) -> Result<()> {
        (**self).mount(workbook)
    }

    fn dispose(&mut self) {
        (**self).dispose();
    }
}

pub struct EngineHost<E: GridEngine> {
    engine: E,
    mounted: bool,
}

impl<E: GridEngine> EngineHost<E> {
    pub fn new(engine: E) -> Self {
        EngineHost {
            engine,
            mounted: false,
        }
    }

    /// Mount `workbook`, disposing the previous instance first.
    pub fn mount(&mut self, workbook: &WorkbookData) -> Result<()> {
        self.unmount();
        self.engine.mount(workbook)?;
        self.mounted = true;
        tracing::debug!(workbook_id = %workbook.id, "grid engine mounted");
        Ok(())
    }

    /// Dispose the current instance, if any.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.engine.dispose();
            self.mounted = false;
            tracing::debug!("grid engine disposed");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: GridEngine> Drop for EngineHost<E> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Engine driven through two JS callbacks: `mount(workbookData)` and
/// `dispose()`.
#[cfg(target_arch = "wasm32")]
pub struct JsGridEngine {
    mount_fn: js_sys::Function,
    dispose_fn: js_sys::Function,
}

#[cfg(target_arch = "wasm32")]
impl JsGridEngine {
    pub fn new(mount_fn: js_sys::Function, dispose_fn: js_sys::Function) -> Self {
        JsGridEngine {
            mount_fn,
            dispose_fn,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl GridEngine for JsGridEngine {
    fn mount(&mut self, workbook: &WorkbookData) -> Result<()> {
        use serde::Serialize;
        use wasm_bindgen::JsValue;

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let data = workbook.serialize(&serializer)?;
        self.mount_fn
            .call1(&JsValue::NULL, &data)
            .map_err(|e| crate::error::CostbookError::Engine(format!("{e:?}")))?;
        Ok(())
    }

    fn dispose(&mut self) {
        if let Err(e) = self.dispose_fn.call0(&wasm_bindgen::JsValue::NULL) {
            tracing::warn!(error = ?e, "grid engine dispose failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::adapter::workbook_from_state;
    use crate::config::GridConfig;
    use crate::types::ProjectState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl GridEngine for Recorder {
        fn mount(&mut self, workbook: &WorkbookData) -> Result<()> {
            self.calls.borrow_mut().push(format!("mount {}", workbook.id));
            Ok(())
        }

        fn dispose(&mut self) {
            self.calls.borrow_mut().push("dispose".into());
        }
    }

    #[test]
    fn remount_disposes_first_and_drop_cleans_up() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let workbook = workbook_from_state(&ProjectState::new("p1"), &GridConfig::default());
        {
            let mut host = EngineHost::new(Recorder {
                calls: Rc::clone(&calls),
            });
            host.mount(&workbook).unwrap();
            host.mount(&workbook).unwrap();
            assert!(host.is_mounted());
        }
        assert_eq!(
            *calls.borrow(),
            vec!["mount p1", "dispose", "mount p1", "dispose"]
        );
    }

    #[test]
    fn unmounted_host_never_disposes() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut host = EngineHost::new(Recorder {
            calls: Rc::clone(&calls),
        });
        host.unmount();
        drop(host);
        assert!(calls.borrow().is_empty());
    }
}
