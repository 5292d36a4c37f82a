//! View trait definition
//!
//! Everything the controller needs from a UI. Implementations decide how a
//! table, an invalid field or a notice actually looks.

use std::collections::BTreeMap;

use crate::models::{BookDraft, BookRow, FormField};

/// Per-field messages to attach to form inputs
pub type FieldErrors = BTreeMap<FormField, String>;

/// Which action the form's submit control performs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit => "Update",
        }
    }

    pub fn cancel_visible(&self) -> bool {
        matches!(self, FormMode::Edit)
    }
}

pub trait BookView: Send + Sync {
    /// Replace every table row with `rows`
    fn render_list(&self, rows: &[BookRow]);

    /// Mark `fields` invalid and show `summary` in the error notice.
    /// Hides any success notice.
    fn render_error(&self, fields: &FieldErrors, summary: &str);

    /// Remove invalid markers, help texts and the error notice
    fn clear_errors(&self);

    fn show_success(&self, message: &str);

    fn hide_success(&self);

    /// Fill the form inputs with `draft`
    fn fill_form(&self, draft: &BookDraft);

    /// Empty the inputs, return to create mode and hide notices
    fn reset_form(&self);

    fn set_mode(&self, mode: FormMode);

    /// Ask the user to confirm a destructive action
    fn confirm(&self, prompt: &str) -> bool;
}
