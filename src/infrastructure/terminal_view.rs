//! Terminal rendering for the interactive binary

use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};

use crate::domain::{BookView, FieldErrors, FormMode};
use crate::infrastructure::html_view::render_row;
use crate::models::{BookDraft, BookRow};

const HEADERS: [&str; 6] = ["ID", "Title", "Author", "ISBN", "Price", "Published"];

#[derive(Default)]
struct FormSlot {
    draft: BookDraft,
    mode: FormMode,
}

/// Prints the table and notices to stdout and asks confirmations on stdin.
///
/// Confirmation reads block the calling worker, so this view must be used
/// from a multi-threaded tokio runtime.
pub struct TerminalView {
    html: bool,
    form: Mutex<FormSlot>,
}

impl TerminalView {
    /// `html` prints table rows as markup instead of aligned text
    pub fn new(html: bool) -> Self {
        Self {
            html,
            form: Mutex::new(FormSlot::default()),
        }
    }

    /// Values currently loaded in the form
    pub fn current_draft(&self) -> BookDraft {
        self.slot().draft.clone()
    }

    pub fn mode(&self) -> FormMode {
        self.slot().mode
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, FormSlot> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lay rows out as a fixed-width text table
pub fn format_table(rows: &[BookRow]) -> String {
    let cells: Vec<[&str; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.id.as_str(),
                r.title.as_str(),
                r.author.as_str(),
                r.isbn.as_str(),
                r.price.as_str(),
                r.publish_date.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |row: &[&str; 6]| {
        row.iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&HEADERS);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}

impl BookView for TerminalView {
    fn render_list(&self, rows: &[BookRow]) {
        if self.html {
            for row in rows {
                println!("{}", render_row(row));
            }
        } else if rows.is_empty() {
            println!("(no books)");
        } else {
            println!("{}", format_table(rows));
        }
    }

    fn render_error(&self, fields: &FieldErrors, summary: &str) {
        eprintln!("error: {}", summary);
        for (field, message) in fields {
            eprintln!("  {}: {}", field, message);
        }
    }

    fn clear_errors(&self) {}

    fn show_success(&self, message: &str) {
        println!("ok: {}", message);
    }

    // Printed lines cannot be taken back
    fn hide_success(&self) {}

    fn fill_form(&self, draft: &BookDraft) {
        self.slot().draft = draft.clone();
    }

    fn reset_form(&self) {
        let mut slot = self.slot();
        slot.draft = BookDraft::default();
        slot.mode = FormMode::Create;
    }

    fn set_mode(&self, mode: FormMode) {
        self.slot().mode = mode;
        if mode == FormMode::Edit {
            println!("editing: `submit` to {}, `cancel` to discard", mode.submit_label().to_lowercase());
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        let read = tokio::task::block_in_place(|| io::stdin().lock().read_line(&mut answer));
        match read {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookId;

    #[test]
    fn test_format_table_aligns_columns() {
        let rows = vec![BookRow {
            id: BookId::from(12),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            price: "1200".to_string(),
            publish_date: "1965-08-01".to_string(),
        }];

        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID | Title | Author        | ISBN"));
        assert!(lines[2].starts_with("12 | Dune  | Frank Herbert | 9780441013593"));
    }

    #[test]
    fn test_form_slot_follows_view_calls() {
        let view = TerminalView::new(false);
        let draft = BookDraft::collect("A", "B", "1234567890", "1", "2024-01-01");

        view.fill_form(&draft);
        view.set_mode(FormMode::Edit);
        assert_eq!(view.current_draft(), draft);
        assert_eq!(view.mode(), FormMode::Edit);

        view.reset_form();
        assert_eq!(view.current_draft(), BookDraft::default());
        assert_eq!(view.mode(), FormMode::Create);
    }
}
