//! Infrastructure layer - Concrete implementations
//!
//! This layer contains:
//! - The reqwest backend client (http_api)
//! - The headless HTML page projection (html_view)
//! - Terminal rendering for the binary (terminal_view)

pub mod html_view;
pub mod http_api;
pub mod terminal_view;

pub use html_view::HtmlView;
pub use http_api::HttpBookApi;
pub use terminal_view::TerminalView;
