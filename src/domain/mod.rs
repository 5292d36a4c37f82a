//! Domain layer - Pure client abstractions
//!
//! This layer contains NO transport or UI code.
//! Only trait definitions and error types.

pub mod api;
pub mod errors;
pub mod view;

pub use api::BookApi;
pub use errors::{ClientError, ErrorBody, ValidationError};
pub use view::{BookView, FieldErrors, FormMode};
