//! Services Layer
//!
//! Validation and request orchestration, free of transport and UI code.

pub mod book_form;
pub mod validation;

// Re-export for convenience
pub use book_form::{BookForm, FormState};
pub use validation::{normalize_isbn, validate_book};
