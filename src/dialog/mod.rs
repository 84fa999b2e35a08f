//! Dialog form models.
//!
//! Each dialog owns its input state while open. The host renders the fields,
//! feeds keystrokes in through the setters, greys out the submit button while
//! [`Dialog::is_valid`] is false and shows [`Dialog::errors`] inline.
//! [`Dialog::submit`] hands back validated output and resets the form.

mod add_column;
mod add_division;
mod bid_book;
mod rename_column;
pub mod validation;

pub use add_column::AddColumnDialog;
pub use add_division::AddDivisionDialog;
pub use bid_book::BidBookDialog;
pub use rename_column::RenameColumnDialog;

use serde::Serialize;

/// An inline validation message for one field.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub trait Dialog {
    type Output;

    /// Whether the current input may be submitted.
    fn is_valid(&self) -> bool;

    /// The validated output, or `None` while the input is invalid.
    fn output(&self) -> Option<Self::Output>;

    /// Clear the input back to how the dialog opened.
    fn reset(&mut self);

    /// Inline messages for fields holding bad input. Empty fields never
    /// produce a message.
    fn errors(&self) -> Vec<FieldError> {
        Vec::new()
    }

    /// Take the output and reset. Invalid input is kept as-is.
    fn submit(&mut self) -> Option<Self::Output> {
        let output = self.output()?;
        self.reset();
        Some(output)
    }
}
