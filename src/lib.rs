pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use infrastructure::{HtmlView, HttpBookApi, TerminalView};
pub use services::{BookForm, FormState};
