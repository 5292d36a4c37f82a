pub mod book;

pub use book::{Book, BookDraft, BookId, BookPayload, BookRow, FormField};
