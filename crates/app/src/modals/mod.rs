//! Modal dialogs for the application.
//!
//! Provides the decision prompt shown in the native window.

pub mod decision_dialog;

pub use decision_dialog::DecisionDialog;

use egui::Context;

/// Trait for modal dialogs.
pub trait Modal {
    /// Update and render the modal. Returns true if the modal should close.
    fn update(&mut self, ctx: &Context) -> bool;

    /// Returns true if the modal is currently open.
    fn is_open(&self) -> bool;

    /// Close the modal without an answer.
    fn close(&mut self);
}
