//! Data types for the project budget model.

mod column;
mod project;
mod sheet;
mod subcontractor;

pub use column::*;
pub use project::*;
pub use sheet::*;
pub use subcontractor::*;
