//! costbook - budget spreadsheets for construction estimates
//!
//! Keeps the state of a project budget in the browser via WebAssembly:
//! - A "Budget Summary" sheet of cost-code divisions
//! - One linked "Division" sheet of line items per division
//! - Column add / rename / move, subcontractor bid books
//! - Persistence to `localStorage` on every change
//!
//! Rendering, formulas and the grid itself belong to an external spreadsheet
//! engine; this crate builds its workbook data and consumes its edit events.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { BudgetApp, init_logging } from 'costbook';
//! await init();
//! init_logging("info");
//! const app = new BudgetApp(projectId, { minRowCount: 50 });
//! app.attachEngine((data) => engine.create(data), () => engine.dispose());
//! app.openDialog("addDivision");
//! app.setDialogField("code", "03");
//! app.submitDialog();
//! ```

// Model
pub mod config;
pub mod cost_codes;
pub mod error;
pub mod hyperlinks;
pub mod types;

// State and persistence
pub mod storage;
pub mod store;

// Engine glue
pub mod adapter;
pub mod engine;

// UI state
pub mod dialog;
pub mod toolbar;

pub mod app;
pub mod logging;

use wasm_bindgen::prelude::*;

pub use app::BudgetApp;

pub use types::*;

/// Install the `tracing` subscriber (browser console on wasm).
///
/// `level` is a level name such as `"debug"`; unknown names mean `"info"`.
/// Returns false if logging was already initialized.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> bool {
    logging::init(logging::parse_level(level))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
